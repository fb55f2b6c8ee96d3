//! Final Report Use Cases

use std::sync::Arc;

use kernel::id::UserId;
use report::{ReportGenerator, TextGenerator, aggregate};

use crate::domain::entity::FinalReport;
use crate::domain::repository::{AttemptRepository, ReportRepository, UserRepository};
use crate::error::{TrainerError, TrainerResult};

/// Aggregate a user's attempts, attach the AI analysis and store the report.
///
/// AI failures never fail the request: the stored analysis is then the
/// fallback, with its `error` field set.
pub struct GenerateReportUseCase<U, A, R, G>
where
    U: UserRepository,
    A: AttemptRepository,
    R: ReportRepository,
    G: TextGenerator + Sync,
{
    user_repo: Arc<U>,
    attempt_repo: Arc<A>,
    report_repo: Arc<R>,
    generator: ReportGenerator<G>,
}

impl<U, A, R, G> GenerateReportUseCase<U, A, R, G>
where
    U: UserRepository,
    A: AttemptRepository,
    R: ReportRepository,
    G: TextGenerator + Sync,
{
    pub fn new(
        user_repo: Arc<U>,
        attempt_repo: Arc<A>,
        report_repo: Arc<R>,
        generator: ReportGenerator<G>,
    ) -> Self {
        Self {
            user_repo,
            attempt_repo,
            report_repo,
            generator,
        }
    }

    pub async fn execute(&self, user_id: &UserId) -> TrainerResult<FinalReport> {
        self.user_repo
            .find_user(user_id)
            .await?
            .ok_or(TrainerError::UserNotFound)?;

        let attempts = self.attempt_repo.list_attempts(user_id).await?;
        if attempts.is_empty() {
            return Err(TrainerError::NoAttempts);
        }

        let samples: Vec<_> = attempts.iter().map(|a| a.to_sample()).collect();
        let stats = aggregate(&samples);

        let analysis = self.generator.generate(&stats).await;
        let ai_fallback = analysis.is_fallback();

        let report = self
            .report_repo
            .upsert_report(&FinalReport::new(*user_id, stats, Some(analysis)))
            .await?;

        tracing::info!(
            user_id = %user_id,
            attempts = report.stats.attempt_count,
            ai_fallback,
            "Final report generated"
        );

        Ok(report)
    }
}

pub struct GetReportUseCase<U, R>
where
    U: UserRepository,
    R: ReportRepository,
{
    user_repo: Arc<U>,
    report_repo: Arc<R>,
}

impl<U, R> GetReportUseCase<U, R>
where
    U: UserRepository,
    R: ReportRepository,
{
    pub fn new(user_repo: Arc<U>, report_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            report_repo,
        }
    }

    pub async fn execute(&self, user_id: &UserId) -> TrainerResult<FinalReport> {
        self.user_repo
            .find_user(user_id)
            .await?
            .ok_or(TrainerError::UserNotFound)?;

        self.report_repo
            .find_report(user_id)
            .await?
            .ok_or(TrainerError::ReportNotFound)
    }
}
