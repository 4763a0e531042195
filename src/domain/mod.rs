//! # Domain Layer
//!
//! このモジュールはロード処理の核心的なルールと値オブジェクトを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（GCP SDKの型はここに現れない）
//! - Cloud Storage や BigQuery について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: 値オブジェクト（ObjectLocation, TableId, LoadJobSpecなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（ポーリング間隔の計算）
//! - **error**: ドメインエラー

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
