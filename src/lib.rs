//! # Dataclean
//!
//! CSV/XLSX ファイルをデータクリーニングサービスにアップロードし、
//! 推論された列の型と共にプレビューするクライアント
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: ファイル検証、転送戦略、進捗、エラー分類（外部依存なし）
//! - **Application層**: セッション管理とアップロード調整（ユースケース）
//! - **Adapter層**: 外部システムとの統合（HTTP, トークンファイル, ローカルファイル）
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
