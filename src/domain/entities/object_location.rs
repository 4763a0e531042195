//! # ObjectLocation Value Object
//!
//! Cloud Storage 上のオブジェクトの位置を表すバリューオブジェクト

use std::fmt;

use crate::domain::error::LoaderError;

const GCS_SCHEME: &str = "gs://";

/// Cloud Storage オブジェクトの位置
///
/// バケット名とオブジェクトパスの組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    bucket: String,
    object: String,
}

impl ObjectLocation {
    /// 新しいオブジェクト位置を作成
    ///
    /// # Errors
    ///
    /// バケット名またはオブジェクトパスが空の場合にエラーを返す
    pub fn new(bucket: impl Into<String>, object: impl Into<String>) -> Result<Self, LoaderError> {
        let bucket = bucket.into();
        let object = object.into();

        if bucket.is_empty() || bucket.contains('/') || object.is_empty() {
            return Err(LoaderError::InvalidGcsUri(format!(
                "{}{}/{}",
                GCS_SCHEME, bucket, object
            )));
        }

        Ok(Self { bucket, object })
    }

    /// `gs://bucket/path/to/object` 形式のURIをパースします。
    ///
    /// # 例
    ///
    /// ```
    /// use gcp_csv_loader::domain::entities::object_location::ObjectLocation;
    ///
    /// let location = ObjectLocation::parse("gs://my-bucket/Gold/data.csv").unwrap();
    /// assert_eq!(location.bucket(), "my-bucket");
    /// assert_eq!(location.object(), "Gold/data.csv");
    ///
    /// assert!(ObjectLocation::parse("https://example.com/data.csv").is_err());
    /// ```
    pub fn parse(uri: &str) -> Result<Self, LoaderError> {
        let rest = uri
            .strip_prefix(GCS_SCHEME)
            .ok_or_else(|| LoaderError::InvalidGcsUri(uri.to_string()))?;

        let (bucket, object) = rest
            .split_once('/')
            .ok_or_else(|| LoaderError::InvalidGcsUri(uri.to_string()))?;

        Self::new(bucket, object).map_err(|_| LoaderError::InvalidGcsUri(uri.to_string()))
    }

    /// バケット名
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// バケット内のオブジェクトパス
    pub fn object(&self) -> &str {
        &self.object
    }

    /// `gs://` 形式のURI
    pub fn gs_uri(&self) -> String {
        format!("{}{}/{}", GCS_SCHEME, self.bucket, self.object)
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gs_uri())
    }
}

/// アップロード済みオブジェクトのメタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    /// アップロード先
    pub location: ObjectLocation,
    /// オブジェクトサイズ（バイト）
    pub size_bytes: u64,
    /// オブジェクトの世代番号
    pub generation: Option<i64>,
}
