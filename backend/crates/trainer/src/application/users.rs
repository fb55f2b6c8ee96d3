//! User Use Cases

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Language, UserName};
use crate::error::{TrainerError, TrainerResult};

pub struct CreateUserInput {
    pub username: String,
    pub language: Language,
    pub consent: bool,
}

/// Register a player
pub struct CreateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: CreateUserInput) -> TrainerResult<User> {
        if !input.consent {
            return Err(TrainerError::ConsentRequired);
        }

        let user_name = UserName::new(&input.username)?;
        let user = User::new(user_name, input.language);

        self.user_repo.create_user(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            language = user.language.as_str(),
            "User created"
        );

        Ok(user)
    }
}

pub struct GetUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> TrainerResult<User> {
        self.user_repo
            .find_user(user_id)
            .await?
            .ok_or(TrainerError::UserNotFound)
    }
}

/// Record how far a player got. Lower values than the stored one are a no-op.
pub struct UpdateProgressUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProgressUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, progress: i32) -> TrainerResult<User> {
        if progress < 0 {
            return Err(TrainerError::InvalidProgress);
        }

        let user = self
            .user_repo
            .advance_progress(user_id, progress)
            .await?
            .ok_or(TrainerError::UserNotFound)?;

        tracing::debug!(user_id = %user_id, progress = user.progress, "Progress updated");

        Ok(user)
    }
}

pub struct UpdateLanguageUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateLanguageUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, language: Language) -> TrainerResult<User> {
        self.user_repo
            .set_language(user_id, language)
            .await?
            .ok_or(TrainerError::UserNotFound)
    }
}
