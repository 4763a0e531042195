//! # LoadJob Value Objects
//!
//! BigQuery ロードジョブの設定と状態

use std::fmt;
use std::str::FromStr;

use super::object_location::ObjectLocation;
use super::table_id::TableId;
use crate::domain::error::LoaderError;

/// ソースファイルのフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Csv,
    NewlineDelimitedJson,
    Avro,
    Parquet,
    Orc,
}

impl FromStr for SourceFormat {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" | "ndjson" | "newline_delimited_json" => Ok(Self::NewlineDelimitedJson),
            "avro" => Ok(Self::Avro),
            "parquet" => Ok(Self::Parquet),
            "orc" => Ok(Self::Orc),
            _ => Err(LoaderError::UnknownSourceFormat(s.to_string())),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "CSV",
            Self::NewlineDelimitedJson => "NEWLINE_DELIMITED_JSON",
            Self::Avro => "AVRO",
            Self::Parquet => "PARQUET",
            Self::Orc => "ORC",
        };
        f.write_str(name)
    }
}

/// 既存データがあるテーブルへの書き込み方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDisposition {
    /// 既存の行に追記
    Append,
    /// 既存の行を置き換え
    Truncate,
    /// テーブルが空の場合のみ書き込む
    Empty,
}

impl FromStr for WriteDisposition {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "append" | "write_append" => Ok(Self::Append),
            "truncate" | "write_truncate" => Ok(Self::Truncate),
            "empty" | "write_empty" => Ok(Self::Empty),
            _ => Err(LoaderError::UnknownWriteDisposition(s.to_string())),
        }
    }
}

impl fmt::Display for WriteDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Append => "WRITE_APPEND",
            Self::Truncate => "WRITE_TRUNCATE",
            Self::Empty => "WRITE_EMPTY",
        };
        f.write_str(name)
    }
}

/// ロードジョブの設定
///
/// Cloud Storage 上のファイルを BigQuery テーブルへ取り込むジョブを表す
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadJobSpec {
    pub source_uris: Vec<String>,
    pub destination: TableId,
    pub source_format: SourceFormat,
    pub skip_leading_rows: u32,
    pub autodetect: bool,
    /// 未指定の場合はサービス側のデフォルト（追記）に従う
    pub write_disposition: Option<WriteDisposition>,
    pub field_delimiter: Option<String>,
    /// ジョブを実行するロケーション（例: "US", "asia-northeast1"）
    pub location: Option<String>,
}

impl LoadJobSpec {
    /// ヘッダー1行をスキップし、スキーマを自動検出するCSVロードジョブを作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use gcp_csv_loader::domain::entities::load_job::{LoadJobSpec, SourceFormat};
    /// use gcp_csv_loader::domain::entities::table_id::TableId;
    ///
    /// let spec = LoadJobSpec::csv(
    ///     "gs://bucket/claims.csv",
    ///     TableId::new("project", "dataset", "claims"),
    /// );
    ///
    /// assert_eq!(spec.source_format, SourceFormat::Csv);
    /// assert_eq!(spec.skip_leading_rows, 1);
    /// assert!(spec.autodetect);
    /// assert!(spec.write_disposition.is_none());
    /// ```
    pub fn csv(source_uri: impl Into<String>, destination: TableId) -> Self {
        Self {
            source_uris: vec![source_uri.into()],
            destination,
            source_format: SourceFormat::Csv,
            skip_leading_rows: 1,
            autodetect: true,
            write_disposition: None,
            field_delimiter: None,
            location: None,
        }
    }

    /// ソースURIがすべて `gs://bucket/object` 形式であることを検証
    ///
    /// # Errors
    ///
    /// ソースURIが空、または不正なURIを含む場合にエラーを返す
    pub fn validate(&self) -> Result<(), LoaderError> {
        if self.source_uris.is_empty() {
            return Err(LoaderError::NoSourceUris);
        }
        for uri in &self.source_uris {
            ObjectLocation::parse(uri)?;
        }
        Ok(())
    }
}

/// 送信済みジョブへの参照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub project_id: String,
    pub job_id: String,
    pub location: Option<String>,
}

/// ロードジョブの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadJobState {
    Pending,
    Running,
    Done,
    Failed {
        reason: String,
        message: String,
        /// 行単位などの詳細エラー
        errors: Vec<String>,
    },
}

impl LoadJobState {
    /// 終了状態（成功または失敗）かどうか
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed { .. })
    }
}

impl fmt::Display for LoadJobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("PENDING"),
            Self::Running => f.write_str("RUNNING"),
            Self::Done => f.write_str("DONE"),
            Self::Failed { reason, .. } => write!(f, "FAILED ({})", reason),
        }
    }
}
