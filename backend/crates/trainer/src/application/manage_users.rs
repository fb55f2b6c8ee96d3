//! Admin Use Cases

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::{Attempt, FinalReport, User, UserSummary};
use crate::domain::repository::{AttemptRepository, ReportRepository, UserRepository};
use crate::error::{TrainerError, TrainerResult};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;

#[derive(Debug, Default)]
pub struct ListUsersInput {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug)]
pub struct ListUsersOutput {
    pub users: Vec<UserSummary>,
    pub total: i64,
    pub limit: u32,
    pub offset: u32,
}

/// Page through users, newest first. `limit` is clamped to 1..=200.
pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: ListUsersInput) -> TrainerResult<ListUsersOutput> {
        let limit = input.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = input.offset.unwrap_or(0);

        let users = self
            .user_repo
            .list_user_summaries(i64::from(limit), i64::from(offset))
            .await?;
        let total = self.user_repo.count_users().await?;

        Ok(ListUsersOutput {
            users,
            total,
            limit,
            offset,
        })
    }
}

#[derive(Debug)]
pub struct UserDetail {
    pub user: User,
    pub attempts: Vec<Attempt>,
    pub report: Option<FinalReport>,
}

pub struct UserDetailUseCase<U, A, R>
where
    U: UserRepository,
    A: AttemptRepository,
    R: ReportRepository,
{
    user_repo: Arc<U>,
    attempt_repo: Arc<A>,
    report_repo: Arc<R>,
}

impl<U, A, R> UserDetailUseCase<U, A, R>
where
    U: UserRepository,
    A: AttemptRepository,
    R: ReportRepository,
{
    pub fn new(user_repo: Arc<U>, attempt_repo: Arc<A>, report_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            attempt_repo,
            report_repo,
        }
    }

    pub async fn execute(&self, user_id: &UserId) -> TrainerResult<UserDetail> {
        let user = self
            .user_repo
            .find_user(user_id)
            .await?
            .ok_or(TrainerError::UserNotFound)?;

        let attempts = self.attempt_repo.list_attempts(user_id).await?;
        let report = self.report_repo.find_report(user_id).await?;

        Ok(UserDetail {
            user,
            attempts,
            report,
        })
    }
}

/// Remove a user together with attempts and report
pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, admin: &str) -> TrainerResult<()> {
        if !self.user_repo.delete_user(user_id).await? {
            return Err(TrainerError::UserNotFound);
        }

        tracing::warn!(user_id = %user_id, admin = %admin, "User deleted by admin");

        Ok(())
    }
}
