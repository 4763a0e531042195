//! # Object Storage Repository Trait
//!
//! ローカルファイルのオブジェクトストレージへのアップロードを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::object_location::{ObjectLocation, UploadedObject};

/// オブジェクトストレージリポジトリ
#[async_trait]
pub trait ObjectStorageRepository: Send + Sync {
    /// ローカルファイルをアップロードする
    ///
    /// # Arguments
    ///
    /// * `source` - アップロード元のローカルファイル
    /// * `destination` - アップロード先のバケットとオブジェクトパス
    ///
    /// # Returns
    ///
    /// アップロードされたオブジェクトのメタデータ
    ///
    /// # Errors
    ///
    /// ファイルの読み込みまたはアップロードに失敗した場合にエラーを返す
    async fn upload_file(&self, source: &Path, destination: &ObjectLocation)
        -> Result<UploadedObject>;
}
