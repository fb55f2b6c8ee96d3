//! Attempt Use Cases

use std::sync::Arc;

use kernel::id::UserId;
use report::catalog;

use crate::domain::entity::Attempt;
use crate::domain::repository::{AttemptRepository, ScenarioRepository, UserRepository};
use crate::error::{TrainerError, TrainerResult};

/// Longest accepted attempt, one day
pub const MAX_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

pub struct RecordAttemptInput {
    pub user_id: UserId,
    pub scenario_code: String,
    pub success: bool,
    pub duration_ms: i64,
    pub error_codes: Vec<String>,
}

/// Record one attempt
///
/// Input is validated before anything is looked up, so a malformed request
/// is a 400 even for an unknown user.
pub struct RecordAttemptUseCase<U, S, A>
where
    U: UserRepository,
    S: ScenarioRepository,
    A: AttemptRepository,
{
    user_repo: Arc<U>,
    scenario_repo: Arc<S>,
    attempt_repo: Arc<A>,
}

impl<U, S, A> RecordAttemptUseCase<U, S, A>
where
    U: UserRepository,
    S: ScenarioRepository,
    A: AttemptRepository,
{
    pub fn new(user_repo: Arc<U>, scenario_repo: Arc<S>, attempt_repo: Arc<A>) -> Self {
        Self {
            user_repo,
            scenario_repo,
            attempt_repo,
        }
    }

    pub async fn execute(&self, input: RecordAttemptInput) -> TrainerResult<Attempt> {
        if !(0..=MAX_DURATION_MS).contains(&input.duration_ms) {
            return Err(TrainerError::InvalidDuration);
        }

        if let Some(unknown) = input
            .error_codes
            .iter()
            .find(|code| !catalog::is_known_error_type(code))
        {
            return Err(TrainerError::UnknownErrorCode(unknown.clone()));
        }

        self.user_repo
            .find_user(&input.user_id)
            .await?
            .ok_or(TrainerError::UserNotFound)?;

        self.scenario_repo
            .find_scenario(&input.scenario_code)
            .await?
            .ok_or_else(|| TrainerError::ScenarioNotFound(input.scenario_code.clone()))?;

        let attempt = Attempt::new(
            input.user_id,
            input.scenario_code,
            input.success,
            input.duration_ms,
            input.error_codes,
        );

        self.attempt_repo.create_attempt(&attempt).await?;

        tracing::info!(
            user_id = %attempt.user_id,
            scenario = %attempt.scenario_code,
            success = attempt.success,
            duration_ms = attempt.duration_ms,
            "Attempt recorded"
        );

        Ok(attempt)
    }
}

pub struct ListAttemptsUseCase<U, A>
where
    U: UserRepository,
    A: AttemptRepository,
{
    user_repo: Arc<U>,
    attempt_repo: Arc<A>,
}

impl<U, A> ListAttemptsUseCase<U, A>
where
    U: UserRepository,
    A: AttemptRepository,
{
    pub fn new(user_repo: Arc<U>, attempt_repo: Arc<A>) -> Self {
        Self {
            user_repo,
            attempt_repo,
        }
    }

    pub async fn execute(&self, user_id: &UserId) -> TrainerResult<Vec<Attempt>> {
        self.user_repo
            .find_user(user_id)
            .await?
            .ok_or(TrainerError::UserNotFound)?;

        self.attempt_repo.list_attempts(user_id).await
    }
}
