//! Trainer Error Types
//!
//! Trainer-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::UserNameError;

pub type TrainerResult<T> = Result<T, TrainerError>;

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error(transparent)]
    InvalidUserName(#[from] UserNameError),

    #[error("Consent is required to take part")]
    ConsentRequired,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Body that is not JSON or does not match the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Progress cannot be negative")]
    InvalidProgress,

    #[error("Duration is out of range")]
    InvalidDuration,

    #[error("Unknown error type: {0}")]
    UnknownErrorCode(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Report not found")]
    ReportNotFound,

    /// A report needs at least one attempt to aggregate
    #[error("User has no attempts yet")]
    NoAttempts,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrainerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrainerError::InvalidUserName(_)
            | TrainerError::ConsentRequired
            | TrainerError::InvalidId(_)
            | TrainerError::InvalidBody(_)
            | TrainerError::InvalidQuery(_)
            | TrainerError::InvalidProgress
            | TrainerError::InvalidDuration
            | TrainerError::UnknownErrorCode(_) => ErrorKind::BadRequest,
            TrainerError::UserNotFound
            | TrainerError::ScenarioNotFound(_)
            | TrainerError::ReportNotFound => ErrorKind::NotFound,
            TrainerError::NoAttempts => ErrorKind::Conflict,
            TrainerError::Database(_) | TrainerError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            TrainerError::InvalidUserName(_) => "invalid_username",
            TrainerError::ConsentRequired => "consent_required",
            TrainerError::InvalidId(_) => "invalid_id",
            TrainerError::InvalidBody(_) => "invalid_body",
            TrainerError::InvalidQuery(_) => "invalid_query",
            TrainerError::InvalidProgress => "invalid_progress",
            TrainerError::InvalidDuration => "invalid_duration",
            TrainerError::UnknownErrorCode(_) => "unknown_error_code",
            TrainerError::UserNotFound => "user_not_found",
            TrainerError::ScenarioNotFound(_) => "scenario_not_found",
            TrainerError::ReportNotFound => "report_not_found",
            TrainerError::NoAttempts => "no_attempts",
            TrainerError::Database(_) => "database",
            TrainerError::Internal(_) => "internal",
        }
    }

    fn log(&self) {
        match self {
            TrainerError::Database(e) => {
                tracing::error!(error = %e, "Trainer database error");
            }
            TrainerError::Internal(msg) => {
                tracing::error!(message = %msg, "Trainer internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Trainer request rejected");
            }
        }
    }
}

impl From<TrainerError> for AppError {
    fn from(err: TrainerError) -> Self {
        let reason = err.reason();
        match err {
            // status follows the Postgres error class
            TrainerError::Database(e) => AppError::from(e).with_reason(reason),
            TrainerError::Internal(_) => AppError::internal("Internal error").with_reason(reason),
            TrainerError::NoAttempts => AppError::new(err.kind(), err.to_string())
                .with_reason(reason)
                .with_action("Complete at least one scenario first"),
            other => AppError::new(other.kind(), other.to_string()).with_reason(reason),
        }
    }
}

impl IntoResponse for TrainerError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
