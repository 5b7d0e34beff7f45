//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand};

/// データクリーニングサービスのCLIクライアント
#[derive(Parser, Debug, Clone)]
#[command(name = "dataclean")]
#[command(about = "Upload CSV/XLSX files to the data cleaning service", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(
        short,
        long,
        global = true,
        default_value = "./.dataclean/config.json"
    )]
    pub config: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an account and start a session
    Register { username: String, password: String },

    /// Start a session
    Login { username: String, password: String },

    /// End the current session
    Logout,

    /// Show whether a session is active
    Status,

    /// Upload a CSV or XLSX file and preview the parsed result
    Upload {
        /// File to upload
        path: String,

        /// Number of rows to preview (defaults to `preview_rows` from the config)
        #[arg(long)]
        rows: Option<usize>,
    },
}
