//! # Load Configuration DTO
//!
//! ロードジョブ実行設定のData Transfer Object

use std::time::Duration;

use crate::domain::entities::load_job::LoadJobSpec;
use crate::domain::services::poll_schedule::PollSchedule;

/// ロード設定
///
/// ジョブの内容と、完了を待つ際のポーリング方法
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// ロードジョブの設定
    pub spec: LoadJobSpec,
    /// ジョブ状態のポーリング間隔
    pub poll_schedule: PollSchedule,
    /// 完了を待つ最大時間（未指定の場合は無制限）
    pub max_wait: Option<Duration>,
}

impl LoadConfig {
    /// デフォルトのポーリング設定で作成
    pub fn new(spec: LoadJobSpec) -> Self {
        Self {
            spec,
            poll_schedule: PollSchedule::default(),
            max_wait: None,
        }
    }

    /// ポーリング間隔を指定
    pub fn with_poll_schedule(mut self, poll_schedule: PollSchedule) -> Self {
        self.poll_schedule = poll_schedule;
        self
    }

    /// 最大待機時間を指定
    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }
}
