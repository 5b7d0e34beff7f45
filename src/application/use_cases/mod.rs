//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **AuthenticateUseCase**: ユーザー登録、ログイン、ログアウト
//! - **UploadCoordinator**: ファイルの検証と転送戦略の選択、アップロード

pub mod authenticate;
pub mod upload_file;
