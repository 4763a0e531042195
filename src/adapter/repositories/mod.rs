//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod bigquery_load_job_repository;
pub mod gcs_object_repository;
