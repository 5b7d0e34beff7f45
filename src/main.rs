//! Dataclean - Data Cleaning Client
//!
//! CSV/XLSX ファイルをアップロードして推論結果をプレビュー

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use dataclean::adapter::config::Config;
use dataclean::driver::{Args, ClientWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load_or_default(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = ClientWorkflow::new(config).await?;

    if workflow.execute(args.command).await {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
