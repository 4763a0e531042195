//! Cloud Storage Object Repository Implementation
//!
//! ObjectStorageRepositoryのCloud Storage実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::adapter::storage::client::ObjectWriter;
use crate::domain::entities::object_location::{ObjectLocation, UploadedObject};
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;

/// Cloud Storageオブジェクトリポジトリ
pub struct GcsObjectRepository {
    writer: Arc<dyn ObjectWriter>,
}

impl GcsObjectRepository {
    /// 新しいリポジトリを作成
    pub fn new(writer: Arc<dyn ObjectWriter>) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl ObjectStorageRepository for GcsObjectRepository {
    async fn upload_file(
        &self,
        source: &Path,
        destination: &ObjectLocation,
    ) -> Result<UploadedObject> {
        let local_size = tokio::fs::metadata(source)
            .await
            .with_context(|| format!("Failed to read source file: {}", source.display()))?
            .len();

        info!(
            "Uploading {} ({} bytes) to {}",
            source.display(),
            local_size,
            destination
        );

        let written = self
            .writer
            .write(destination.bucket(), destination.object(), source)
            .await?;

        let size_bytes = u64::try_from(written.size).unwrap_or(0);
        if size_bytes != local_size {
            warn!(
                "Size mismatch for {}: local {} bytes, stored {} bytes",
                destination, local_size, size_bytes
            );
        }

        Ok(UploadedObject {
            location: destination.clone(),
            size_bytes,
            generation: Some(written.generation),
        })
    }
}
