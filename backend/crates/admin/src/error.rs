//! Admin Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Client-facing messages stay generic.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AdminAuthResult<T> = Result<T, AdminAuthError>;

#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Wrong username or password; which one is never revealed
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Login body that is not JSON or misses a field
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Authentication required")]
    TokenMissing,

    /// Malformed, wrongly signed, or otherwise unusable token
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    /// Valid token whose role is not admin
    #[error("Admin role required")]
    InsufficientRole,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminAuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminAuthError::InvalidCredentials
            | AdminAuthError::TokenMissing
            | AdminAuthError::TokenInvalid
            | AdminAuthError::TokenExpired => ErrorKind::Unauthorized,
            AdminAuthError::InvalidBody(_) => ErrorKind::BadRequest,
            AdminAuthError::InsufficientRole => ErrorKind::Forbidden,
            AdminAuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable reason string rendered in the response body
    pub fn reason(&self) -> &'static str {
        match self {
            AdminAuthError::InvalidCredentials => "invalid_credentials",
            AdminAuthError::InvalidBody(_) => "invalid_body",
            AdminAuthError::TokenMissing => "token_missing",
            AdminAuthError::TokenInvalid => "token_invalid",
            AdminAuthError::TokenExpired => "token_expired",
            AdminAuthError::InsufficientRole => "insufficient_role",
            AdminAuthError::Internal(_) => "internal",
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = match self {
            // internal detail stays in the log
            AdminAuthError::Internal(_) => AppError::internal("Internal error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
        .with_reason(self.reason());

        match self {
            AdminAuthError::TokenExpired => err.with_action("Sign in again"),
            _ => err,
        }
    }

    fn log(&self) {
        match self {
            AdminAuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Admin auth internal error");
            }
            AdminAuthError::InsufficientRole => {
                tracing::warn!("Token with non-admin role presented to admin route");
            }
            AdminAuthError::TokenInvalid => {
                tracing::warn!("Invalid admin token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Admin auth error");
            }
        }
    }
}

impl IntoResponse for AdminAuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AdminAuthError {
    fn from(rejection: JsonRejection) -> Self {
        AdminAuthError::InvalidBody(rejection.body_text())
    }
}

impl From<platform::client::BearerError> for AdminAuthError {
    fn from(err: platform::client::BearerError) -> Self {
        match err {
            platform::client::BearerError::Missing => AdminAuthError::TokenMissing,
            platform::client::BearerError::Malformed => AdminAuthError::TokenInvalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AdminAuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AdminAuthError::InvalidBody("x".into()).kind().status_code(), 400);
        assert_eq!(AdminAuthError::TokenMissing.kind().status_code(), 401);
        assert_eq!(AdminAuthError::TokenInvalid.kind().status_code(), 401);
        assert_eq!(AdminAuthError::TokenExpired.kind().status_code(), 401);
        assert_eq!(AdminAuthError::InsufficientRole.kind().status_code(), 403);
        assert_eq!(AdminAuthError::Internal("x".into()).kind().status_code(), 500);
    }

    #[test]
    fn test_expired_is_distinguishable() {
        let expired = AdminAuthError::TokenExpired.to_app_error();
        let invalid = AdminAuthError::TokenInvalid.to_app_error();
        assert_eq!(expired.status_code(), invalid.status_code());
        assert_ne!(expired.reason(), invalid.reason());
        assert_ne!(expired.message(), invalid.message());
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let err = AdminAuthError::Internal("jwt secret too short".into()).to_app_error();
        assert!(!err.message().contains("secret"));
    }
}
