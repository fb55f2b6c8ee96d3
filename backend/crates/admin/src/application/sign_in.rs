//! Sign In Use Case
//!
//! Checks the operator credentials and issues an admin token.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::crypto::constant_time_eq;
use platform::password::ClearTextPassword;

use crate::application::config::AdminAuthConfig;
use crate::domain::claims::AdminClaims;
use crate::error::{AdminAuthError, AdminAuthResult};
use crate::infra::jwt::JwtCodec;

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
    /// Best-known caller address, for the audit log only
    pub client_ip: Option<IpAddr>,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub username: String,
}

/// Sign in use case
pub struct SignInUseCase {
    config: Arc<AdminAuthConfig>,
    codec: Arc<JwtCodec>,
}

impl SignInUseCase {
    pub fn new(config: Arc<AdminAuthConfig>, codec: Arc<JwtCodec>) -> Self {
        Self { config, codec }
    }

    pub async fn execute(&self, input: SignInInput) -> AdminAuthResult<SignInOutput> {
        let username = input.username.trim().to_string();
        let username_ok =
            constant_time_eq(username.as_bytes(), self.config.admin_username.as_bytes());

        // Unknown usernames still pay for a full verification
        let hash = if username_ok {
            self.config.password_hash.clone()
        } else {
            self.config.dummy_hash.clone()
        };

        let password = ClearTextPassword::new(input.password)
            .unwrap_or_else(|_| ClearTextPassword::placeholder());

        let password_ok = tokio::task::spawn_blocking(move || hash.verify(&password))
            .await
            .map_err(|e| AdminAuthError::Internal(format!("Password verification task failed: {e}")))?;

        if !(username_ok && password_ok) {
            tracing::warn!(
                client_ip = ?input.client_ip,
                "Admin sign-in rejected"
            );
            return Err(AdminAuthError::InvalidCredentials);
        }

        let claims = AdminClaims::new_admin(username.clone(), Utc::now(), self.config.token_ttl);
        let token = self.codec.encode(&claims)?;

        tracing::info!(
            admin = %username,
            client_ip = ?input.client_ip,
            expires_at = %claims.expires_at(),
            "Admin signed in"
        );

        Ok(SignInOutput {
            token,
            expires_at: claims.expires_at(),
            username,
        })
    }
}
