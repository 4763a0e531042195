//! # Load Table Use Case
//!
//! テーブルロードユースケース

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;

use crate::application::dto::load_config::LoadConfig;
use crate::domain::entities::load_job::{JobHandle, LoadJobState};
use crate::domain::error::LoaderError;
use crate::domain::repositories::load_job_repository::LoadJobRepository;

/// ロード結果のレポート
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// 送信されたジョブ
    pub job: JobHandle,
    /// 最終状態（常に `Done`）
    pub state: LoadJobState,
    /// 状態を取得した回数
    pub polls: u32,
    /// 送信から完了までの経過時間
    pub elapsed: Duration,
}

/// テーブルロードユースケース
///
/// ロードジョブを送信し、終了状態になるまで待機する
pub struct LoadTableUseCase<R: LoadJobRepository + ?Sized> {
    job_repository: Arc<R>,
}

impl<R: LoadJobRepository + ?Sized> LoadTableUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `job_repository` - ロードジョブリポジトリ
    pub fn new(job_repository: Arc<R>) -> Self {
        Self { job_repository }
    }

    /// ロードジョブを送信して完了を待つ
    ///
    /// # Arguments
    ///
    /// * `config` - ロード設定
    ///
    /// # Returns
    ///
    /// 完了したジョブのレポート
    ///
    /// # Errors
    ///
    /// 設定が不正な場合、送信・状態取得に失敗した場合、ジョブが失敗状態で終了した場合、
    /// または最大待機時間を超えた場合にエラーを返す
    pub async fn execute(&self, config: &LoadConfig) -> Result<LoadReport> {
        config.spec.validate()?;

        let started = Instant::now();
        let job = self
            .job_repository
            .submit(&config.spec)
            .await
            .with_context(|| format!("Failed to submit load job into {}", config.spec.destination))?;

        info!(
            "Submitted load job {} ({} -> {})",
            job.job_id,
            config.spec.source_uris.join(", "),
            config.spec.destination
        );

        let mut polls = 0u32;
        loop {
            let state = self
                .job_repository
                .state(&job)
                .await
                .with_context(|| format!("Failed to get state of load job {}", job.job_id))?;
            polls += 1;

            match state {
                LoadJobState::Done => {
                    return Ok(LoadReport {
                        job,
                        state: LoadJobState::Done,
                        polls,
                        elapsed: started.elapsed(),
                    });
                }
                LoadJobState::Failed {
                    reason,
                    message,
                    errors,
                } => {
                    for error in &errors {
                        log::warn!("Load job {} error: {}", job.job_id, error);
                    }
                    return Err(LoaderError::LoadJobFailed {
                        job_id: job.job_id,
                        reason,
                        message,
                    }
                    .into());
                }
                LoadJobState::Pending | LoadJobState::Running => {}
            }

            let mut delay = config.poll_schedule.delay(polls);
            if let Some(max_wait) = config.max_wait {
                // 期限ちょうどに最後の確認を行い、それでも未完了なら諦める
                let elapsed = started.elapsed();
                if elapsed >= max_wait {
                    return Err(LoaderError::LoadJobTimedOut {
                        job_id: job.job_id,
                        max_wait,
                    }
                    .into());
                }
                delay = delay.min(max_wait - elapsed);
            }

            debug!(
                "Load job {} is {}, checking again in {}ms",
                job.job_id,
                state,
                delay.as_millis()
            );
            sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::domain::entities::load_job::LoadJobSpec;
    use crate::domain::entities::table_id::TableId;
    use crate::domain::services::poll_schedule::PollSchedule;

    /// 事前に決めた状態を順番に返すモック
    struct MockJobRepository {
        states: Mutex<VecDeque<Result<LoadJobState>>>,
        submitted: Mutex<Vec<LoadJobSpec>>,
        fail_submit: bool,
    }

    impl MockJobRepository {
        fn new(states: Vec<Result<LoadJobState>>) -> Self {
            Self {
                states: Mutex::new(states.into()),
                submitted: Mutex::new(Vec::new()),
                fail_submit: false,
            }
        }
    }

    #[async_trait]
    impl LoadJobRepository for MockJobRepository {
        async fn submit(&self, spec: &LoadJobSpec) -> Result<JobHandle> {
            if self.fail_submit {
                anyhow::bail!("Access Denied: Project behavior-based-claim");
            }
            self.submitted.lock().unwrap().push(spec.clone());
            Ok(JobHandle {
                project_id: spec.destination.project_id.clone(),
                job_id: "job-001".to_string(),
                location: spec.location.clone(),
            })
        }

        async fn state(&self, _job: &JobHandle) -> Result<LoadJobState> {
            self.states
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(LoadJobState::Running))
        }
    }

    fn test_config() -> LoadConfig {
        let spec = LoadJobSpec::csv(
            "gs://behavior-based-claim-severity-data/Insuranceclaimsdata.csv",
            TableId::new("behavior-based-claim", "InsuranceClaimDataset", "insurance_claims"),
        );
        LoadConfig::new(spec).with_poll_schedule(PollSchedule::new(1, 1))
    }

    #[tokio::test]
    async fn test_load_waits_until_done() {
        let repo = Arc::new(MockJobRepository::new(vec![
            Ok(LoadJobState::Pending),
            Ok(LoadJobState::Running),
            Ok(LoadJobState::Done),
        ]));
        let use_case = LoadTableUseCase::new(repo.clone());

        let report = use_case.execute(&test_config()).await.unwrap();

        assert_eq!(report.state, LoadJobState::Done);
        assert_eq!(report.polls, 3);
        assert_eq!(report.job.job_id, "job-001");
        assert_eq!(report.job.project_id, "behavior-based-claim");

        let submitted = repo.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].skip_leading_rows, 1);
        assert!(submitted[0].autodetect);
    }

    #[tokio::test]
    async fn test_load_done_immediately() {
        let repo = Arc::new(MockJobRepository::new(vec![Ok(LoadJobState::Done)]));
        let use_case = LoadTableUseCase::new(repo);

        let report = use_case.execute(&test_config()).await.unwrap();

        assert_eq!(report.polls, 1);
    }

    #[tokio::test]
    async fn test_load_failed_job() {
        let repo = Arc::new(MockJobRepository::new(vec![
            Ok(LoadJobState::Running),
            Ok(LoadJobState::Failed {
                reason: "invalid".to_string(),
                message: "Error while reading data, error message: CSV table encountered too many errors".to_string(),
                errors: vec!["Error while reading data".to_string()],
            }),
        ]));
        let use_case = LoadTableUseCase::new(repo);

        let err = use_case.execute(&test_config()).await.unwrap_err();

        match err.downcast_ref::<LoaderError>() {
            Some(LoaderError::LoadJobFailed { job_id, reason, .. }) => {
                assert_eq!(job_id, "job-001");
                assert_eq!(reason, "invalid");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_state_error_propagates() {
        let repo = Arc::new(MockJobRepository::new(vec![Err(anyhow::anyhow!(
            "401 Unauthorized"
        ))]));
        let use_case = LoadTableUseCase::new(repo);

        let err = use_case.execute(&test_config()).await.unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("job-001"));
        assert!(message.contains("401 Unauthorized"));
    }

    #[tokio::test]
    async fn test_load_submit_error_propagates() {
        let mut repo = MockJobRepository::new(vec![]);
        repo.fail_submit = true;
        let use_case = LoadTableUseCase::new(Arc::new(repo));

        let err = use_case.execute(&test_config()).await.unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("behavior-based-claim.InsuranceClaimDataset.insurance_claims"));
        assert!(message.contains("Access Denied"));
    }

    #[tokio::test]
    async fn test_load_waits_full_budget_before_timing_out() {
        let repo = Arc::new(MockJobRepository::new(vec![]));
        let use_case = LoadTableUseCase::new(repo);

        let max_wait = Duration::from_millis(50);
        let config = LoadConfig::new(test_config().spec)
            .with_poll_schedule(PollSchedule::new(10, 20))
            .with_max_wait(Some(max_wait));

        let started = Instant::now();
        let err = use_case.execute(&config).await.unwrap_err();

        assert!(started.elapsed() >= max_wait);
        assert_eq!(
            err.downcast_ref::<LoaderError>(),
            Some(&LoaderError::LoadJobTimedOut {
                job_id: "job-001".to_string(),
                max_wait,
            })
        );
    }

    #[tokio::test]
    async fn test_load_finishing_before_deadline_is_not_timed_out() {
        // 次のポーリング間隔は期限より長いが、期限で切り詰めて再確認する
        let repo = Arc::new(MockJobRepository::new(vec![
            Ok(LoadJobState::Running),
            Ok(LoadJobState::Done),
        ]));
        let use_case = LoadTableUseCase::new(repo);

        let config = LoadConfig::new(test_config().spec)
            .with_poll_schedule(PollSchedule::new(60_000, 60_000))
            .with_max_wait(Some(Duration::from_millis(30)));

        let report = use_case.execute(&config).await.unwrap();

        assert_eq!(report.state, LoadJobState::Done);
        assert_eq!(report.polls, 2);
    }

    #[tokio::test]
    async fn test_load_times_out() {
        let repo = Arc::new(MockJobRepository::new(vec![]));
        let use_case = LoadTableUseCase::new(repo);

        let config = test_config().with_max_wait(Some(Duration::ZERO));
        let err = use_case.execute(&config).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LoaderError>(),
            Some(LoaderError::LoadJobTimedOut { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_invalid_spec_is_not_submitted() {
        let repo = Arc::new(MockJobRepository::new(vec![]));
        let use_case = LoadTableUseCase::new(repo.clone());

        let mut config = test_config();
        config.spec.source_uris = vec!["Insuranceclaimsdata.csv".to_string()];

        let err = use_case.execute(&config).await.unwrap_err();

        assert_eq!(
            err.downcast_ref::<LoaderError>(),
            Some(&LoaderError::InvalidGcsUri("Insuranceclaimsdata.csv".to_string()))
        );
        assert!(repo.submitted.lock().unwrap().is_empty());
    }
}
