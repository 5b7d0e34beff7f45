//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **SelectedFile**: アップロード対象として選択されたファイル
//! - **UploadStrategy / ChunkPlan**: 転送戦略とチャンク分割のバリューオブジェクト
//! - **UploadedDataset**: アップロード結果のデータセット

pub mod dataset;
pub mod selected_file;
pub mod upload_job;
