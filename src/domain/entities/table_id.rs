//! # TableId Value Object
//!
//! BigQuery テーブルの完全修飾名

use std::fmt;

use crate::domain::error::LoaderError;

/// BigQuery テーブルID（`project.dataset.table`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableId {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

impl TableId {
    /// 新しいテーブルIDを作成
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }

    /// `project.dataset.table` 形式の文字列をパースします。
    ///
    /// # 例
    ///
    /// ```
    /// use gcp_csv_loader::domain::entities::table_id::TableId;
    ///
    /// let table = TableId::parse("behavior-based-claim.InsuranceClaimDataset.insurance_claims").unwrap();
    /// assert_eq!(table.project_id, "behavior-based-claim");
    /// assert_eq!(table.dataset_id, "InsuranceClaimDataset");
    /// assert_eq!(table.table_id, "insurance_claims");
    /// ```
    pub fn parse(value: &str) -> Result<Self, LoaderError> {
        let parts: Vec<&str> = value.split('.').collect();
        match parts.as_slice() {
            [project, dataset, table]
                if !project.is_empty() && !dataset.is_empty() && !table.is_empty() =>
            {
                Ok(Self::new(*project, *dataset, *table))
            }
            _ => Err(LoaderError::InvalidTableId(value.to_string())),
        }
    }

    /// `dataset.table` 形式も受け付け、プロジェクトを補完してパース
    pub fn parse_with_default_project(value: &str, project_id: &str) -> Result<Self, LoaderError> {
        let parts: Vec<&str> = value.split('.').collect();
        match parts.as_slice() {
            [dataset, table] if !project_id.is_empty() && !dataset.is_empty() && !table.is_empty() => {
                Ok(Self::new(project_id, *dataset, *table))
            }
            _ => Self::parse(value),
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project_id, self.dataset_id, self.table_id)
    }
}
