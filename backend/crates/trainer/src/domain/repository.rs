//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::{Attempt, FinalReport, Scenario, User, UserSummary};
use crate::domain::value_object::Language;
use crate::error::TrainerResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn create_user(&self, user: &User) -> TrainerResult<()>;

    async fn find_user(&self, user_id: &UserId) -> TrainerResult<Option<User>>;

    /// Raise the progress marker to at least `progress`; returns the stored user
    async fn advance_progress(&self, user_id: &UserId, progress: i32)
    -> TrainerResult<Option<User>>;

    async fn set_language(&self, user_id: &UserId, language: Language)
    -> TrainerResult<Option<User>>;

    /// Newest first
    async fn list_user_summaries(&self, limit: i64, offset: i64)
    -> TrainerResult<Vec<UserSummary>>;

    async fn count_users(&self) -> TrainerResult<i64>;

    /// Delete a user with its attempts and report; false if absent
    async fn delete_user(&self, user_id: &UserId) -> TrainerResult<bool>;
}

/// Scenario repository trait
#[trait_variant::make(ScenarioRepository: Send)]
pub trait LocalScenarioRepository {
    /// In display order
    async fn list_scenarios(&self) -> TrainerResult<Vec<Scenario>>;

    async fn find_scenario(&self, code: &str) -> TrainerResult<Option<Scenario>>;
}

/// Attempt repository trait
#[trait_variant::make(AttemptRepository: Send)]
pub trait LocalAttemptRepository {
    async fn create_attempt(&self, attempt: &Attempt) -> TrainerResult<()>;

    /// Oldest first
    async fn list_attempts(&self, user_id: &UserId) -> TrainerResult<Vec<Attempt>>;
}

/// Final report repository trait
#[trait_variant::make(ReportRepository: Send)]
pub trait LocalReportRepository {
    /// Insert or overwrite; `created_at` of an existing report is kept
    async fn upsert_report(&self, report: &FinalReport) -> TrainerResult<FinalReport>;

    async fn find_report(&self, user_id: &UserId) -> TrainerResult<Option<FinalReport>>;
}

/// Liveness of the backing store
#[trait_variant::make(HealthCheck: Send)]
pub trait LocalHealthCheck {
    async fn ping(&self) -> TrainerResult<()>;
}

/// Everything the trainer routes need from one store
pub trait TrainerRepository:
    UserRepository
    + ScenarioRepository
    + AttemptRepository
    + ReportRepository
    + HealthCheck
    + Send
    + Sync
    + 'static
{
}

impl<T> TrainerRepository for T where
    T: UserRepository
        + ScenarioRepository
        + AttemptRepository
        + ReportRepository
        + HealthCheck
        + Send
        + Sync
        + 'static
{
}
