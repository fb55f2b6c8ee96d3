//! Application Configuration
//!
//! Configuration for the admin auth application layer.

use std::fmt;
use std::time::Duration;

use platform::password::{PasswordHashError, StoredPasswordHash};

use crate::infra::jwt::MIN_SECRET_LEN;

/// Default admin token lifetime (2 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(2 * 3600);

#[derive(Debug, thiserror::Error)]
pub enum AdminConfigError {
    #[error("JWT secret must be at least {MIN_SECRET_LEN} bytes (got {0})")]
    SecretTooShort(usize),

    #[error("Admin username cannot be empty")]
    EmptyUsername,

    #[error(transparent)]
    Hash(#[from] PasswordHashError),
}

/// Admin auth configuration
#[derive(Clone)]
pub struct AdminAuthConfig {
    /// The single operator account name
    pub admin_username: String,
    /// Stored hash of the operator password
    pub password_hash: StoredPasswordHash,
    /// Same scheme and cost as `password_hash`, verified for unknown usernames
    pub dummy_hash: StoredPasswordHash,
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
}

impl AdminAuthConfig {
    pub fn new(
        admin_username: impl Into<String>,
        password_hash: StoredPasswordHash,
        jwt_secret: impl Into<Vec<u8>>,
        token_ttl: Duration,
    ) -> Result<Self, AdminConfigError> {
        let admin_username = admin_username.into();
        if admin_username.trim().is_empty() {
            return Err(AdminConfigError::EmptyUsername);
        }

        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AdminConfigError::SecretTooShort(jwt_secret.len()));
        }

        let dummy_hash = password_hash.dummy_like()?;

        Ok(Self {
            admin_username,
            password_hash,
            dummy_hash,
            jwt_secret,
            token_ttl,
        })
    }

    /// Token TTL in whole seconds
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl.as_secs()
    }
}

impl fmt::Debug for AdminAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAuthConfig")
            .field("admin_username", &self.admin_username)
            .field("password_scheme", &self.password_hash.scheme())
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
