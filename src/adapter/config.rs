//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::application::dto::load_config::LoadConfig;
use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::load_job::{LoadJobSpec, SourceFormat, WriteDisposition};
use crate::domain::entities::object_location::ObjectLocation;
use crate::domain::entities::table_id::TableId;
use crate::domain::services::poll_schedule::{PollSchedule, MAX_POLL_INTERVAL_MS};

pub const DEFAULT_PROJECT_ID: &str = "behavior-based-claim";
pub const DEFAULT_BUCKET: &str = "behavior-based-claim-severity-data";
pub const DEFAULT_DESTINATION_OBJECT: &str = "Gold/final_insurance_data.csv";
pub const DEFAULT_SOURCE_FILE: &str = "final_insurance_data.csv";
pub const DEFAULT_SOURCE_URI: &str =
    "gs://behavior-based-claim-severity-data/Insuranceclaimsdata.csv";
pub const DEFAULT_TABLE: &str = "behavior-based-claim.InsuranceClaimDataset.insurance_claims";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Tool configuration.
///
/// Every field has a default, so a partial file (or no file at all) works.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub project_id: String,

    // Authentication
    // Falls back to Application Default Credentials when unset
    pub service_account_key_path: Option<String>,

    // Upload
    pub bucket: String,
    pub destination_object: String,
    pub source_file: String,

    // Load job
    pub source_uri: String,
    pub table: String,
    pub source_format: String,
    pub skip_leading_rows: u32,
    pub autodetect: bool,
    pub write_disposition: Option<String>,
    pub field_delimiter: Option<String>,
    pub location: Option<String>,
    pub poll_interval_ms: u64,
    pub max_wait_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            service_account_key_path: None,
            bucket: DEFAULT_BUCKET.to_string(),
            destination_object: DEFAULT_DESTINATION_OBJECT.to_string(),
            source_file: DEFAULT_SOURCE_FILE.to_string(),
            source_uri: DEFAULT_SOURCE_URI.to_string(),
            table: DEFAULT_TABLE.to_string(),
            source_format: "csv".to_string(),
            skip_leading_rows: 1,
            autodetect: true,
            write_disposition: None,
            field_delimiter: None,
            location: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_wait_secs: None,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_upload_config(&self) -> Result<UploadConfig> {
        let destination = ObjectLocation::new(&self.bucket, &self.destination_object)?;
        let source_file = shellexpand::tilde(&self.source_file).to_string();
        Ok(UploadConfig::new(source_file, destination))
    }

    pub fn to_load_config(&self) -> Result<LoadConfig> {
        let destination = TableId::parse_with_default_project(&self.table, &self.project_id)?;

        let mut spec = LoadJobSpec::csv(&self.source_uri, destination);
        spec.source_format = self.source_format.parse::<SourceFormat>()?;
        spec.skip_leading_rows = self.skip_leading_rows;
        spec.autodetect = self.autodetect;
        spec.write_disposition = self
            .write_disposition
            .as_deref()
            .map(|value| value.parse::<WriteDisposition>())
            .transpose()?;
        spec.field_delimiter = self.field_delimiter.clone();
        spec.location = self.location.clone();

        Ok(LoadConfig::new(spec)
            .with_poll_schedule(PollSchedule::new(
                self.poll_interval_ms,
                MAX_POLL_INTERVAL_MS,
            ))
            .with_max_wait(self.max_wait_secs.map(Duration::from_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::LoaderError;

    #[test]
    fn test_default_upload_config() {
        let upload = Config::default().to_upload_config().unwrap();
        assert_eq!(
            upload.destination.gs_uri(),
            "gs://behavior-based-claim-severity-data/Gold/final_insurance_data.csv"
        );
        assert_eq!(
            upload.source_file,
            std::path::PathBuf::from("final_insurance_data.csv")
        );
    }

    #[test]
    fn test_default_load_config() {
        let load = Config::default().to_load_config().unwrap();
        let spec = load.spec;

        assert_eq!(
            spec.source_uris,
            vec!["gs://behavior-based-claim-severity-data/Insuranceclaimsdata.csv".to_string()]
        );
        assert_eq!(
            spec.destination,
            TableId::new("behavior-based-claim", "InsuranceClaimDataset", "insurance_claims")
        );
        assert_eq!(spec.source_format, SourceFormat::Csv);
        assert_eq!(spec.skip_leading_rows, 1);
        assert!(spec.autodetect);
        assert!(spec.write_disposition.is_none());
        assert!(load.max_wait.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "bucket": "other-bucket", "write_disposition": "truncate", "max_wait_secs": 600 }"#,
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();

        assert_eq!(config.bucket, "other-bucket");
        assert_eq!(config.project_id, DEFAULT_PROJECT_ID);
        assert_eq!(config.destination_object, DEFAULT_DESTINATION_OBJECT);

        let load = config.to_load_config().unwrap();
        assert_eq!(load.spec.write_disposition, Some(WriteDisposition::Truncate));
        assert_eq!(load.max_wait, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/gcp-csv-loader/config.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_short_table_uses_project() {
        let config = Config {
            project_id: "my-project".to_string(),
            table: "claims.raw".to_string(),
            ..Config::default()
        };

        let load = config.to_load_config().unwrap();
        assert_eq!(load.spec.destination, TableId::new("my-project", "claims", "raw"));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let config = Config {
            source_format: "xlsx".to_string(),
            ..Config::default()
        };

        let err = config.to_load_config().unwrap_err();
        assert_eq!(
            err.downcast_ref::<LoaderError>(),
            Some(&LoaderError::UnknownSourceFormat("xlsx".to_string()))
        );
    }

    #[test]
    fn test_empty_bucket_rejected() {
        let config = Config {
            bucket: String::new(),
            ..Config::default()
        };

        assert!(config.to_upload_config().is_err());
    }
}
