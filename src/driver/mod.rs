//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **console**: 進捗表示とデータセットのプレビュー
//! - **workflow**: コマンドごとのオーケストレーションと依存性注入

pub mod cli;
pub mod console;
pub mod workflow;

pub use cli::{Args, Command};
pub use workflow::ClientWorkflow;
