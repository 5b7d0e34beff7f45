//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - HTTPやファイルシステムについて何も知らない
//! - フレームワークに依存しない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（SelectedFile, UploadedDatasetなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（検証と進捗のルール）
//! - **error**: エラー分類

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
