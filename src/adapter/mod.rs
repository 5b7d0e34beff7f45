//! Adapter Layer
//!
//! 外部システム（データ処理サーバー, ファイルシステム）との統合

pub mod config;
pub mod http;
pub mod local_file;
pub mod repositories;
