//! # Domain Services
//!
//! エンティティに属さないビジネスルール
//!
//! - **FileValidationService**: 選択ファイルの形式とサイズの検証
//! - **ProgressTracker**: 単調非減少な進捗の通知

pub mod file_validation;
pub mod progress;
