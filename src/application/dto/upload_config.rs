//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

use std::path::PathBuf;

use crate::domain::entities::object_location::ObjectLocation;

/// アップロード設定
///
/// ローカルファイルを Cloud Storage にアップロードするのに必要な設定情報
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// アップロード元のローカルファイル
    pub source_file: PathBuf,
    /// アップロード先
    pub destination: ObjectLocation,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use gcp_csv_loader::application::dto::upload_config::UploadConfig;
    /// use gcp_csv_loader::domain::entities::object_location::ObjectLocation;
    ///
    /// let config = UploadConfig::new(
    ///     "final_insurance_data.csv",
    ///     ObjectLocation::new("behavior-based-claim-severity-data", "Gold/final_insurance_data.csv").unwrap(),
    /// );
    ///
    /// assert_eq!(
    ///     config.destination.gs_uri(),
    ///     "gs://behavior-based-claim-severity-data/Gold/final_insurance_data.csv"
    /// );
    /// ```
    pub fn new(source_file: impl Into<PathBuf>, destination: ObjectLocation) -> Self {
        Self {
            source_file: source_file.into(),
            destination,
        }
    }
}
