//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **UploadFileUseCase**: ローカルファイルの Cloud Storage へのアップロード
//! - **LoadTableUseCase**: ロードジョブの送信と完了待ち

pub mod load_table;
pub mod upload_file;
