//! # Domain Errors
//!
//! ドメイン層で発生するエラーの定義

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// ロード処理のドメインエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoaderError {
    /// `gs://bucket/object` 形式ではないURI
    #[error("invalid Cloud Storage URI '{0}': expected gs://<bucket>/<object>")]
    InvalidGcsUri(String),

    /// `project.dataset.table` 形式ではないテーブルID
    #[error("invalid table id '{0}': expected <project>.<dataset>.<table>")]
    InvalidTableId(String),

    /// 未対応のソースフォーマット
    #[error("unknown source format '{0}'")]
    UnknownSourceFormat(String),

    /// 未対応の書き込み方式
    #[error("unknown write disposition '{0}': expected append, truncate or empty")]
    UnknownWriteDisposition(String),

    /// アップロード元ファイルが存在しない
    #[error("source file not found: {}", .0.display())]
    SourceFileNotFound(PathBuf),

    /// ロードジョブにソースURIが指定されていない
    #[error("load job has no source URIs")]
    NoSourceUris,

    /// ロードジョブが失敗状態で終了した
    #[error("load job {job_id} failed: {reason}: {message}")]
    LoadJobFailed {
        job_id: String,
        reason: String,
        message: String,
    },

    /// 待機時間内にロードジョブが完了しなかった
    #[error("load job {job_id} did not finish within {max_wait:?}")]
    LoadJobTimedOut { job_id: String, max_wait: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_uri_message() {
        let err = LoaderError::InvalidGcsUri("s3://bucket/key".to_string());
        assert_eq!(
            err.to_string(),
            "invalid Cloud Storage URI 's3://bucket/key': expected gs://<bucket>/<object>"
        );
    }

    #[test]
    fn test_source_file_not_found_message() {
        let err = LoaderError::SourceFileNotFound(PathBuf::from("data/missing.csv"));
        assert_eq!(err.to_string(), "source file not found: data/missing.csv");
    }

    #[test]
    fn test_load_job_timed_out_message() {
        let err = LoaderError::LoadJobTimedOut {
            job_id: "job-1".to_string(),
            max_wait: Duration::from_secs(60),
        };
        assert_eq!(err.to_string(), "load job job-1 did not finish within 60s");
    }

    #[test]
    fn test_load_job_failed_message() {
        let err = LoaderError::LoadJobFailed {
            job_id: "job-1".to_string(),
            reason: "invalid".to_string(),
            message: "Error while reading data".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "load job job-1 failed: invalid: Error while reading data"
        );
    }
}
