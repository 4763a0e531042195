//! BigQuery Client Abstractions
//!
//! クライアントの抽象化と実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_bigquery::client::Client;
use google_cloud_bigquery::http::job::get::GetJobRequest;
use google_cloud_bigquery::http::job::Job;

#[cfg(test)]
use mockall::automock;

/// Trait for BigQuery job operations
/// This enables mocking in tests while using the real client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BigQueryJobClient: Send + Sync {
    /// Insert a new job
    async fn create_job(&self, job: &Job) -> Result<Job>;

    /// Fetch the current metadata of a job
    async fn get_job(&self, project_id: &str, job_id: &str, location: Option<String>)
        -> Result<Job>;
}

/// BigQuery client that owns the Client instance
pub struct OwnedBigQueryClient {
    client: Client,
}

impl OwnedBigQueryClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl BigQueryJobClient for OwnedBigQueryClient {
    async fn create_job(&self, job: &Job) -> Result<Job> {
        self.client
            .job()
            .create(job)
            .await
            .context("BigQuery job insert failed")
    }

    async fn get_job(
        &self,
        project_id: &str,
        job_id: &str,
        location: Option<String>,
    ) -> Result<Job> {
        self.client
            .job()
            .get(project_id, job_id, &GetJobRequest { location })
            .await
            .context("BigQuery job get failed")
    }
}

/// Factory for creating BigQuery clients
#[async_trait]
pub trait BigQueryClientFactory: Send + Sync {
    async fn create_client(&self) -> Result<Box<dyn BigQueryJobClient>>;
}

/// Production implementation of BigQueryClientFactory
pub struct RealClientFactory {
    key_path: Option<String>,
}

impl RealClientFactory {
    pub fn new(key_path: Option<String>) -> Self {
        Self { key_path }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl BigQueryClientFactory for RealClientFactory {
    async fn create_client(&self) -> Result<Box<dyn BigQueryJobClient>> {
        let (client, _project_id) =
            crate::adapter::auth::create_bigquery_client(self.key_path.as_deref()).await?;
        Ok(Box::new(OwnedBigQueryClient::new(client)))
    }
}
