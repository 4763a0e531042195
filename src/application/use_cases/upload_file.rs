//! # Upload File Use Case
//!
//! ファイルアップロードユースケース

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::object_location::UploadedObject;
use crate::domain::error::LoaderError;
use crate::domain::repositories::object_storage_repository::ObjectStorageRepository;

/// ファイルアップロードユースケース
///
/// ローカルファイルを指定されたバケットのオブジェクトパスへアップロードする
pub struct UploadFileUseCase<R: ObjectStorageRepository + ?Sized> {
    storage_repository: Arc<R>,
}

impl<R: ObjectStorageRepository + ?Sized> UploadFileUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `storage_repository` - オブジェクトストレージリポジトリ
    pub fn new(storage_repository: Arc<R>) -> Self {
        Self { storage_repository }
    }

    /// ファイルをアップロードする
    ///
    /// # Arguments
    ///
    /// * `config` - アップロード設定
    ///
    /// # Returns
    ///
    /// アップロードされたオブジェクトのメタデータ
    ///
    /// # Errors
    ///
    /// アップロード元ファイルが存在しない場合、またはアップロードに失敗した場合にエラーを返す
    pub async fn execute(&self, config: &UploadConfig) -> Result<UploadedObject> {
        ensure_source_file(config).await?;

        self.storage_repository
            .upload_file(&config.source_file, &config.destination)
            .await
            .with_context(|| {
                format!(
                    "Failed to upload {} to {}",
                    config.source_file.display(),
                    config.destination
                )
            })
    }
}

/// アップロード元が通常ファイルとして存在することを確認
///
/// 存在しない場合と通常ファイルでない場合は`SourceFileNotFound`、
/// それ以外のI/Oエラー（権限不足など）はそのまま返す
pub async fn ensure_source_file(config: &UploadConfig) -> Result<u64> {
    match tokio::fs::metadata(&config.source_file).await {
        Ok(metadata) if metadata.is_file() => Ok(metadata.len()),
        Ok(_) => Err(LoaderError::SourceFileNotFound(config.source_file.clone()).into()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LoaderError::SourceFileNotFound(config.source_file.clone()).into())
        }
        Err(e) => Err(e).with_context(|| {
            format!(
                "Failed to read metadata of {}",
                config.source_file.display()
            )
        }),
    }
}
