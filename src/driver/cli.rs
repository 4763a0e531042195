//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand};

use crate::adapter::config::Config;

/// CSVファイルを Cloud Storage にアップロードし、BigQuery にロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "gcp-csv-loader")]
#[command(
    about = "Upload CSV files to Cloud Storage and load them into BigQuery",
    long_about = None
)]
pub struct Args {
    /// Dry run mode - validate and print, but don't call Google Cloud
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Config file path (built-in defaults are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Google Cloud project id
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Service account key file (Application Default Credentials when omitted)
    #[arg(long, global = true)]
    pub key_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Upload a local file to a Cloud Storage bucket
    Upload(UploadArgs),
    /// Load a Cloud Storage object into a BigQuery table and wait for the job
    Load(LoadArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct UploadArgs {
    /// Destination bucket
    #[arg(long)]
    pub bucket: Option<String>,

    /// Destination object path inside the bucket
    #[arg(long)]
    pub object: Option<String>,

    /// Local file to upload
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Source object URI (gs://bucket/object)
    #[arg(long)]
    pub uri: Option<String>,

    /// Destination table (project.dataset.table or dataset.table)
    #[arg(long)]
    pub table: Option<String>,

    /// Source format (csv, json, avro, parquet, orc)
    #[arg(long)]
    pub format: Option<String>,

    /// Number of header rows to skip
    #[arg(long)]
    pub skip_leading_rows: Option<u32>,

    /// Disable schema auto-detection
    #[arg(long)]
    pub no_autodetect: bool,

    /// What to do when the table already has rows (append, truncate, empty)
    #[arg(long)]
    pub write_disposition: Option<String>,

    /// Field delimiter for CSV sources
    #[arg(long)]
    pub field_delimiter: Option<String>,

    /// Job location (e.g. US, asia-northeast1)
    #[arg(long)]
    pub location: Option<String>,

    /// Initial interval between job status checks, in milliseconds
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Give up waiting after this many seconds (the job keeps running)
    #[arg(long)]
    pub max_wait_secs: Option<u64>,
}

impl Args {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(project) = &self.project {
            config.project_id = project.clone();
        }
        if let Some(key_file) = &self.key_file {
            config.service_account_key_path = Some(key_file.clone());
        }

        match &self.command {
            Command::Upload(upload) => upload.apply_to(config),
            Command::Load(load) => load.apply_to(config),
        }
    }
}

impl UploadArgs {
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(bucket) = &self.bucket {
            config.bucket = bucket.clone();
        }
        if let Some(object) = &self.object {
            config.destination_object = object.clone();
        }
        if let Some(source) = &self.source {
            config.source_file = source.clone();
        }
        config
    }
}

impl LoadArgs {
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(uri) = &self.uri {
            config.source_uri = uri.clone();
        }
        if let Some(table) = &self.table {
            config.table = table.clone();
        }
        if let Some(format) = &self.format {
            config.source_format = format.clone();
        }
        if let Some(rows) = self.skip_leading_rows {
            config.skip_leading_rows = rows;
        }
        if self.no_autodetect {
            config.autodetect = false;
        }
        if let Some(disposition) = &self.write_disposition {
            config.write_disposition = Some(disposition.clone());
        }
        if let Some(delimiter) = &self.field_delimiter {
            config.field_delimiter = Some(delimiter.clone());
        }
        if let Some(location) = &self.location {
            config.location = Some(location.clone());
        }
        if let Some(interval) = self.poll_interval_ms {
            config.poll_interval_ms = interval;
        }
        if let Some(secs) = self.max_wait_secs {
            config.max_wait_secs = Some(secs);
        }
        config
    }
}
