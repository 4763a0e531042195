//! BigQuery Load Job Repository Implementation
//!
//! LoadJobRepositoryのBigQuery実装（一時的なエラーはリトライ）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::adapter::bigquery::client::BigQueryJobClient;
use crate::adapter::bigquery::models::{
    generate_job_id, to_job_handle, to_load_job, to_load_job_state,
};
use crate::adapter::bigquery::retry::{
    calculate_retry_delay, error_chain_to_string, existing_job_location, is_already_exists_error,
    is_retryable_error, MAX_RETRIES,
};
use crate::domain::entities::load_job::{JobHandle, LoadJobSpec, LoadJobState};
use crate::domain::repositories::load_job_repository::LoadJobRepository;

/// BigQueryロードジョブリポジトリ
pub struct BigQueryLoadJobRepository {
    client: Arc<dyn BigQueryJobClient>,
    backoff: fn(u32) -> u64,
}

impl BigQueryLoadJobRepository {
    /// 新しいリポジトリを作成
    pub fn new(client: Arc<dyn BigQueryJobClient>) -> Self {
        Self {
            client,
            backoff: calculate_retry_delay,
        }
    }

    /// リトライ間隔（ミリ秒）の計算方法を差し替える
    pub fn with_backoff(mut self, backoff: fn(u32) -> u64) -> Self {
        self.backoff = backoff;
        self
    }

    async fn wait_before_retry(&self, what: &str, retry_count: u32, error_msg: &str) {
        let delay = (self.backoff)(retry_count);
        println!(
            "⚠ {} failed (attempt {}), retrying in {}ms: {}",
            what, retry_count, delay, error_msg
        );
        sleep(Duration::from_millis(delay)).await;
    }
}

#[async_trait]
impl LoadJobRepository for BigQueryLoadJobRepository {
    async fn submit(&self, spec: &LoadJobSpec) -> Result<JobHandle> {
        let job = to_load_job(spec, &generate_job_id());
        let mut retry_count = 0;

        loop {
            match self.client.create_job(&job).await {
                Ok(created) => {
                    let handle = to_job_handle(&created);
                    info!(
                        "Created load job {} in project {}",
                        handle.job_id, handle.project_id
                    );
                    return Ok(handle);
                }
                Err(e) => {
                    let error_msg = error_chain_to_string(&e);

                    // 前回の送信が実は届いていた
                    if retry_count > 0 && is_already_exists_error(&error_msg) {
                        info!(
                            "Load job {} already exists, using it",
                            job.job_reference.job_id
                        );
                        let mut handle = to_job_handle(&job);
                        if handle.location.is_none() {
                            handle.location = existing_job_location(
                                &error_msg,
                                &handle.project_id,
                                &handle.job_id,
                            );
                        }
                        if handle.location.is_none() {
                            warn!(
                                "Location of load job {} is unknown; pass --location if status queries fail",
                                handle.job_id
                            );
                        }
                        return Ok(handle);
                    }

                    if is_retryable_error(&error_msg) && retry_count < MAX_RETRIES {
                        retry_count += 1;
                        self.wait_before_retry("Job submission", retry_count, &error_msg)
                            .await;
                        continue;
                    }

                    return Err(e).context("Failed to submit load job to BigQuery");
                }
            }
        }
    }

    async fn state(&self, job: &JobHandle) -> Result<LoadJobState> {
        let mut retry_count = 0;

        loop {
            match self
                .client
                .get_job(&job.project_id, &job.job_id, job.location.clone())
                .await
            {
                Ok(current) => return Ok(to_load_job_state(&current)),
                Err(e) => {
                    let error_msg = error_chain_to_string(&e);

                    if is_retryable_error(&error_msg) && retry_count < MAX_RETRIES {
                        retry_count += 1;
                        self.wait_before_retry("Job status query", retry_count, &error_msg)
                            .await;
                        continue;
                    }

                    return Err(e).context("Failed to get load job status from BigQuery");
                }
            }
        }
    }
}
