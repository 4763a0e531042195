//! Adapter Layer
//!
//! 外部システム（Cloud Storage, BigQuery, ファイルシステム）との統合

pub mod auth;
pub mod bigquery;
pub mod config;
pub mod repositories;
pub mod storage;
