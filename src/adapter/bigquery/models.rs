//! BigQuery Job Models
//!
//! ドメインのロードジョブ設定と BigQuery API のジョブ表現の相互変換

use chrono::Utc;
use google_cloud_bigquery::http::job::{
    Job, JobConfiguration, JobConfigurationLoad, JobReference, JobState, JobType,
    WriteDisposition as BqWriteDisposition,
};
use google_cloud_bigquery::http::table::{SourceFormat as BqSourceFormat, TableReference};

use crate::domain::entities::load_job::{
    JobHandle, LoadJobSpec, LoadJobState, SourceFormat, WriteDisposition,
};

const JOB_ID_PREFIX: &str = "gcp_csv_loader";

/// Generate a unique job id
///
/// Job ids may only contain letters, digits, underscores and dashes.
pub fn generate_job_id() -> String {
    format!(
        "{}_{}_{}",
        JOB_ID_PREFIX,
        Utc::now().format("%Y%m%d%H%M%S"),
        uuid::Uuid::new_v4().simple()
    )
}

fn to_bq_source_format(format: SourceFormat) -> BqSourceFormat {
    match format {
        SourceFormat::Csv => BqSourceFormat::Csv,
        SourceFormat::NewlineDelimitedJson => BqSourceFormat::NewlineDelimitedJson,
        SourceFormat::Avro => BqSourceFormat::Avro,
        SourceFormat::Parquet => BqSourceFormat::Parquet,
        SourceFormat::Orc => BqSourceFormat::Orc,
    }
}

fn to_bq_write_disposition(disposition: WriteDisposition) -> BqWriteDisposition {
    match disposition {
        WriteDisposition::Append => BqWriteDisposition::WriteAppend,
        WriteDisposition::Truncate => BqWriteDisposition::WriteTruncate,
        WriteDisposition::Empty => BqWriteDisposition::WriteEmpty,
    }
}

/// Build the load job resource for `spec`
///
/// The job runs in the destination table's project.
pub fn to_load_job(spec: &LoadJobSpec, job_id: &str) -> Job {
    let load = JobConfigurationLoad {
        source_uris: spec.source_uris.clone(),
        destination_table: TableReference {
            project_id: spec.destination.project_id.clone(),
            dataset_id: spec.destination.dataset_id.clone(),
            table_id: spec.destination.table_id.clone(),
        },
        source_format: Some(to_bq_source_format(spec.source_format)),
        skip_leading_rows: Some(spec.skip_leading_rows as i64),
        autodetect: Some(spec.autodetect),
        write_disposition: spec.write_disposition.map(to_bq_write_disposition),
        field_delimiter: spec.field_delimiter.clone(),
        ..Default::default()
    };

    Job {
        job_reference: JobReference {
            project_id: spec.destination.project_id.clone(),
            job_id: job_id.to_string(),
            location: spec.location.clone(),
        },
        configuration: JobConfiguration {
            job: JobType::Load(load),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Reference to the job the service actually created
///
/// The service fills in the location when the request left it empty.
pub fn to_job_handle(job: &Job) -> JobHandle {
    JobHandle {
        project_id: job.job_reference.project_id.clone(),
        job_id: job.job_reference.job_id.clone(),
        location: job.job_reference.location.clone(),
    }
}

/// Map the job status onto the domain state
///
/// A `DONE` job with an `errorResult` has failed.
pub fn to_load_job_state(job: &Job) -> LoadJobState {
    let status = &job.status;
    match status.state {
        JobState::Pending => LoadJobState::Pending,
        JobState::Running => LoadJobState::Running,
        JobState::Done => match &status.error_result {
            None => LoadJobState::Done,
            Some(error) => LoadJobState::Failed {
                reason: error.reason.clone().unwrap_or_else(|| "unknown".to_string()),
                message: error.message.clone().unwrap_or_default(),
                errors: status
                    .errors
                    .iter()
                    .flatten()
                    .filter_map(|e| e.message.clone())
                    .collect(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table_id::TableId;

    fn claims_spec() -> LoadJobSpec {
        LoadJobSpec::csv(
            "gs://behavior-based-claim-severity-data/Insuranceclaimsdata.csv",
            TableId::new("behavior-based-claim", "InsuranceClaimDataset", "insurance_claims"),
        )
    }

    fn load_config(job: &Job) -> &JobConfigurationLoad {
        match &job.configuration.job {
            JobType::Load(load) => load,
            _ => panic!("expected a load job"),
        }
    }

    #[test]
    fn test_generate_job_id_format() {
        let id = generate_job_id();
        assert!(id.starts_with("gcp_csv_loader_"));
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        assert_ne!(id, generate_job_id());
    }

    #[test]
    fn test_to_load_job_csv_defaults() {
        let job = to_load_job(&claims_spec(), "job_1");

        assert_eq!(job.job_reference.project_id, "behavior-based-claim");
        assert_eq!(job.job_reference.job_id, "job_1");
        assert!(job.job_reference.location.is_none());

        let load = load_config(&job);
        assert_eq!(
            load.source_uris,
            vec!["gs://behavior-based-claim-severity-data/Insuranceclaimsdata.csv".to_string()]
        );
        assert_eq!(load.destination_table.dataset_id, "InsuranceClaimDataset");
        assert_eq!(load.destination_table.table_id, "insurance_claims");
        assert!(matches!(load.source_format, Some(BqSourceFormat::Csv)));
        assert_eq!(load.skip_leading_rows, Some(1));
        assert_eq!(load.autodetect, Some(true));
        assert!(load.write_disposition.is_none());
    }

    #[test]
    fn test_to_load_job_overrides() {
        let mut spec = claims_spec();
        spec.write_disposition = Some(WriteDisposition::Truncate);
        spec.field_delimiter = Some("|".to_string());
        spec.location = Some("asia-northeast1".to_string());

        let job = to_load_job(&spec, "job_2");

        assert_eq!(
            job.job_reference.location,
            Some("asia-northeast1".to_string())
        );
        let load = load_config(&job);
        assert!(matches!(
            load.write_disposition,
            Some(BqWriteDisposition::WriteTruncate)
        ));
        assert_eq!(load.field_delimiter, Some("|".to_string()));
    }

    #[test]
    fn test_to_job_handle() {
        let mut job = to_load_job(&claims_spec(), "job_3");
        job.job_reference.location = Some("US".to_string());

        let handle = to_job_handle(&job);

        assert_eq!(
            handle,
            JobHandle {
                project_id: "behavior-based-claim".to_string(),
                job_id: "job_3".to_string(),
                location: Some("US".to_string()),
            }
        );
    }

    #[test]
    fn test_to_load_job_state_running() {
        let mut job = to_load_job(&claims_spec(), "job_4");
        job.status.state = JobState::Running;
        assert_eq!(to_load_job_state(&job), LoadJobState::Running);

        job.status.state = JobState::Pending;
        assert_eq!(to_load_job_state(&job), LoadJobState::Pending);
    }

    #[test]
    fn test_to_load_job_state_done() {
        let mut job = to_load_job(&claims_spec(), "job_5");
        job.status.state = JobState::Done;
        assert_eq!(to_load_job_state(&job), LoadJobState::Done);
    }

    #[test]
    fn test_to_load_job_state_failed() {
        let mut job = to_load_job(&claims_spec(), "job_6");
        job.status = serde_json::from_value(serde_json::json!({
            "state": "DONE",
            "errorResult": { "reason": "invalid", "message": "Error while reading data" },
            "errors": [
                { "reason": "invalid", "message": "Error while reading data" },
                { "reason": "invalid", "message": "Could not parse 'abc' as DOUBLE" }
            ]
        }))
        .unwrap();

        assert_eq!(
            to_load_job_state(&job),
            LoadJobState::Failed {
                reason: "invalid".to_string(),
                message: "Error while reading data".to_string(),
                errors: vec![
                    "Error while reading data".to_string(),
                    "Could not parse 'abc' as DOUBLE".to_string(),
                ],
            }
        );
    }
}
