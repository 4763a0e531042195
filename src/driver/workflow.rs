//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::adapter::auth::create_storage_client;
use crate::adapter::bigquery::client::{BigQueryClientFactory, RealClientFactory};
use crate::adapter::config::Config;
use crate::adapter::repositories::bigquery_load_job_repository::BigQueryLoadJobRepository;
use crate::adapter::repositories::gcs_object_repository::GcsObjectRepository;
use crate::adapter::storage::client::GcsObjectWriter;
use crate::application::dto::load_config::LoadConfig;
use crate::application::dto::upload_config::UploadConfig;
use crate::application::use_cases::load_table::{LoadReport, LoadTableUseCase};
use crate::application::use_cases::upload_file::{ensure_source_file, UploadFileUseCase};
use crate::domain::entities::object_location::UploadedObject;
use crate::domain::repositories::load_job_repository::LoadJobRepository;
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;

use super::cli::{Args, Command};

/// Confirmation line printed after a successful upload
pub fn upload_confirmation(config: &UploadConfig) -> String {
    format!(
        "Uploaded {} to {}",
        config.source_file.display(),
        config.destination.gs_uri()
    )
}

/// CSV Load Workflow
pub struct CsvLoadWorkflow {
    config: Config,
}

impl CsvLoadWorkflow {
    /// Create a new workflow instance with the loaded configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute the subcommand selected on the command line
    pub async fn execute(&self, args: Args) -> Result<()> {
        let config = args.apply_to(self.config.clone());
        info!("Dry run: {}", args.dry_run);

        match args.command {
            Command::Upload(_) => {
                let upload_config = config.to_upload_config()?;
                if args.dry_run {
                    return dry_run_upload(&upload_config).await;
                }

                let client =
                    create_storage_client(config.service_account_key_path.as_deref()).await?;
                println!("✓ Created Cloud Storage client");
                let repository = Arc::new(GcsObjectRepository::new(Arc::new(
                    GcsObjectWriter::new(client),
                )));

                run_upload(repository, &upload_config).await?;
            }
            Command::Load(_) => {
                let load_config = config.to_load_config()?;
                if args.dry_run {
                    dry_run_load(&load_config);
                    return Ok(());
                }

                let factory = RealClientFactory::new(config.service_account_key_path.clone());
                let client = factory.create_client().await?;
                println!("✓ Created BigQuery client");
                let repository = Arc::new(BigQueryLoadJobRepository::new(Arc::from(client)));

                run_load(repository, &load_config).await?;
            }
        }

        Ok(())
    }
}

/// Upload a file through `repository` and print the confirmation
pub async fn run_upload<R: ObjectStorageRepository + ?Sized>(
    repository: Arc<R>,
    config: &UploadConfig,
) -> Result<UploadedObject> {
    let use_case = UploadFileUseCase::new(repository);
    let uploaded = use_case.execute(config).await?;

    println!("{}", upload_confirmation(config));
    info!(
        "{} bytes written (generation {:?})",
        uploaded.size_bytes, uploaded.generation
    );

    Ok(uploaded)
}

/// Submit a load job through `repository` and wait for it to finish
pub async fn run_load<R: LoadJobRepository + ?Sized>(
    repository: Arc<R>,
    config: &LoadConfig,
) -> Result<LoadReport> {
    let spec = &config.spec;
    println!(
        "Loading {} into {}...",
        spec.source_uris.join(", "),
        spec.destination
    );

    let use_case = LoadTableUseCase::new(repository);
    let report = use_case.execute(config).await?;

    println!(
        "✓ Load job {} finished: {} ({} status checks, {:.1}s)",
        report.job.job_id,
        report.state,
        report.polls,
        report.elapsed.as_secs_f64()
    );

    Ok(report)
}

async fn dry_run_upload(config: &UploadConfig) -> Result<()> {
    let size = ensure_source_file(config).await?;
    println!("✓ Dry-run mode (not actually uploading)");
    println!(
        "  Would upload {} ({} bytes) to {}",
        config.source_file.display(),
        size,
        config.destination.gs_uri()
    );
    Ok(())
}

fn dry_run_load(config: &LoadConfig) {
    let spec = &config.spec;
    println!("✓ Dry-run mode (not actually submitting a load job)");
    println!("  Sources: {}", spec.source_uris.join(", "));
    println!("  Table: {}", spec.destination);
    println!("  Format: {}", spec.source_format);
    println!("  Skip leading rows: {}", spec.skip_leading_rows);
    println!("  Autodetect schema: {}", spec.autodetect);
    match spec.write_disposition {
        Some(disposition) => println!("  Write disposition: {}", disposition),
        None => println!("  Write disposition: (service default)"),
    }
    if let Some(location) = &spec.location {
        println!("  Location: {}", location);
    }
}
