//! gcp-csv-loader
//!
//! CSVファイルを Cloud Storage にアップロードし、BigQuery テーブルへロードする

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use gcp_csv_loader::adapter::config::Config;
use gcp_csv_loader::driver::{Args, CsvLoadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration (built-in defaults when no file is given)
    let config = Config::load_or_default(args.config.as_deref())?;

    let workflow = CsvLoadWorkflow::new(config);

    workflow.execute(args).await
}
