//! Cloud Storage Client Abstractions
//!
//! クライアントの抽象化と実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_storage::client::Storage;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// Metadata returned by the service after a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenObject {
    pub size: i64,
    pub generation: i64,
}

/// Trait for Cloud Storage object writes
/// This enables mocking in tests while using the real client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectWriter: Send + Sync {
    /// Stream the local file at `source` to `object` in `bucket`, replacing any existing object
    async fn write(&self, bucket: &str, object: &str, source: &Path) -> Result<WrittenObject>;
}

/// Cloud Storage client that owns the Storage instance
pub struct GcsObjectWriter {
    client: Storage,
}

impl GcsObjectWriter {
    pub fn new(client: Storage) -> Self {
        Self { client }
    }
}

/// Resource name the Storage API expects for a bucket
pub fn bucket_resource_name(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl ObjectWriter for GcsObjectWriter {
    async fn write(&self, bucket: &str, object: &str, source: &Path) -> Result<WrittenObject> {
        let file = tokio::fs::File::open(source)
            .await
            .with_context(|| format!("Failed to open source file: {}", source.display()))?;

        // Resumable upload; the file is read in chunks, never held in memory whole
        let written = self
            .client
            .write_object(bucket_resource_name(bucket), object, file)
            .send_buffered()
            .await
            .context("Cloud Storage write failed")?;

        Ok(WrittenObject {
            size: written.size,
            generation: written.generation,
        })
    }
}
