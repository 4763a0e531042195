//! # Domain Entities
//!
//! 値オブジェクトを定義するモジュール
//!
//! ## 値オブジェクト
//!
//! - **ObjectLocation**: Cloud Storage 上のオブジェクトの位置
//! - **TableId**: BigQuery テーブルの完全修飾名
//! - **LoadJobSpec**: ロードジョブの設定と状態

pub mod load_job;
pub mod object_location;
pub mod table_id;
