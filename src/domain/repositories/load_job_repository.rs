//! # Load Job Repository Trait
//!
//! ロードジョブの送信と状態取得を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::load_job::{JobHandle, LoadJobSpec, LoadJobState};

/// ロードジョブリポジトリ
#[async_trait]
pub trait LoadJobRepository: Send + Sync {
    /// ロードジョブを送信する
    ///
    /// # Arguments
    ///
    /// * `spec` - ロードジョブの設定
    ///
    /// # Returns
    ///
    /// 送信されたジョブへの参照
    async fn submit(&self, spec: &LoadJobSpec) -> Result<JobHandle>;

    /// ジョブの現在の状態を取得する
    ///
    /// # Arguments
    ///
    /// * `job` - 送信済みジョブへの参照
    async fn state(&self, job: &JobHandle) -> Result<LoadJobState>;
}
