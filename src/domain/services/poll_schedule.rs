//! # Poll Schedule Service
//!
//! ジョブ状態のポーリング間隔を計算するドメインサービス

use std::time::Duration;

/// ポーリング間隔の上限（32秒）
pub const MAX_POLL_INTERVAL_MS: u64 = 32_000;

/// ポーリングスケジュール
///
/// 初回間隔から倍々に伸ばし、上限で頭打ちにする
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    initial_ms: u64,
    max_ms: u64,
}

impl PollSchedule {
    /// 新しいスケジュールを作成
    ///
    /// 初回間隔が0の場合は1ミリ秒として扱う
    pub fn new(initial_ms: u64, max_ms: u64) -> Self {
        let initial_ms = initial_ms.max(1);
        Self {
            initial_ms,
            max_ms: max_ms.max(initial_ms),
        }
    }

    /// n回目（1始まり）のポーリング前に待つ時間を返します。
    ///
    /// # 例
    ///
    /// ```
    /// use std::time::Duration;
    /// use gcp_csv_loader::domain::services::poll_schedule::PollSchedule;
    ///
    /// let schedule = PollSchedule::new(1000, 4000);
    /// assert_eq!(schedule.delay(1), Duration::from_millis(1000));
    /// assert_eq!(schedule.delay(2), Duration::from_millis(2000));
    /// assert_eq!(schedule.delay(3), Duration::from_millis(4000));
    /// assert_eq!(schedule.delay(10), Duration::from_millis(4000));
    /// ```
    pub fn delay(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(32);
        let ms = self
            .initial_ms
            .checked_mul(1u64 << shift)
            .unwrap_or(self.max_ms)
            .min(self.max_ms);
        Duration::from_millis(ms)
    }
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self::new(1000, MAX_POLL_INTERVAL_MS)
    }
}
