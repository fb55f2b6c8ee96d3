//! Password Hashing and Verification
//!
//! Verifies a clear-text password against a stored admin hash. Three
//! encodings are accepted, detected from the stored string:
//! - bcrypt (`$2a$`, `$2b$`, `$2y$`)
//! - Argon2 PHC strings (`$argon2id$...`)
//! - unsalted SHA-256 as 64 hex characters
//!
//! [`StoredPasswordHash::dummy_like`] builds a throwaway hash with the same
//! scheme and cost as a real one. Verifying against it costs the same as
//! verifying against the real hash, which keeps login timing flat when the
//! username is unknown.

use std::fmt;
use std::str::FromStr;

use argon2::{Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, random_bytes, sha256_hex};

/// Upper bound on accepted password length, in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Stored hash is in none of the supported encodings
    #[error("Unrecognised password hash format")]
    UnknownFormat,

    #[error("Invalid {scheme} hash: {reason}")]
    InvalidHash {
        scheme: PasswordScheme,
        reason: String,
    },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, wiped from memory on drop.
///
/// Not `Clone`, and `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Only emptiness and length are checked. Admin passwords were set
    /// out of band, so no strength policy applies at login.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = raw.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        Ok(Self(raw))
    }

    /// Stand-in used when the submitted password fails policy, so a
    /// verification still runs and costs the same.
    pub fn placeholder() -> Self {
        Self(hex::encode(random_bytes(16)))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Stored hash
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    Bcrypt,
    Argon2,
    Sha256,
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PasswordScheme::Bcrypt => "bcrypt",
            PasswordScheme::Argon2 => "argon2",
            PasswordScheme::Sha256 => "sha256",
        })
    }
}

/// A validated admin password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredPasswordHash {
    scheme: PasswordScheme,
    encoded: String,
}

impl StoredPasswordHash {
    /// Parse and validate a stored hash string.
    pub fn parse(raw: &str) -> Result<Self, PasswordHashError> {
        let raw = raw.trim();

        if raw.starts_with("$2a$") || raw.starts_with("$2b$") || raw.starts_with("$2y$") {
            bcrypt::HashParts::from_str(raw).map_err(|e| PasswordHashError::InvalidHash {
                scheme: PasswordScheme::Bcrypt,
                reason: e.to_string(),
            })?;
            return Ok(Self {
                scheme: PasswordScheme::Bcrypt,
                encoded: raw.to_string(),
            });
        }

        if raw.starts_with("$argon2") {
            PasswordHash::new(raw).map_err(|e| PasswordHashError::InvalidHash {
                scheme: PasswordScheme::Argon2,
                reason: e.to_string(),
            })?;
            return Ok(Self {
                scheme: PasswordScheme::Argon2,
                encoded: raw.to_string(),
            });
        }

        if raw.len() == 64 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(Self {
                scheme: PasswordScheme::Sha256,
                encoded: raw.to_ascii_lowercase(),
            });
        }

        Err(PasswordHashError::UnknownFormat)
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Verify a password against this hash.
    ///
    /// bcrypt and Argon2 are deliberately slow; call from a blocking context.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        match self.scheme {
            PasswordScheme::Bcrypt => {
                bcrypt::verify(password.as_bytes(), &self.encoded).unwrap_or(false)
            }
            PasswordScheme::Argon2 => match PasswordHash::new(&self.encoded) {
                Ok(parsed) => Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok(),
                Err(_) => false,
            },
            PasswordScheme::Sha256 => {
                let candidate = sha256_hex(password.as_bytes());
                constant_time_eq(candidate.as_bytes(), self.encoded.as_bytes())
            }
        }
    }

    /// Build a hash of a random secret with this hash's scheme and cost.
    pub fn dummy_like(&self) -> Result<Self, PasswordHashError> {
        let secret = hex::encode(random_bytes(24));

        let encoded = match self.scheme {
            PasswordScheme::Bcrypt => {
                let cost = bcrypt::HashParts::from_str(&self.encoded)
                    .map_err(|e| PasswordHashError::InvalidHash {
                        scheme: PasswordScheme::Bcrypt,
                        reason: e.to_string(),
                    })?
                    .get_cost();
                bcrypt::hash(&secret, cost)
                    .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
            }
            PasswordScheme::Argon2 => {
                let parsed = PasswordHash::new(&self.encoded).map_err(|e| {
                    PasswordHashError::InvalidHash {
                        scheme: PasswordScheme::Argon2,
                        reason: e.to_string(),
                    }
                })?;
                let params = Params::try_from(&parsed)
                    .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
                let salt = SaltString::generate(OsRng);
                Argon2::default()
                    .hash_password_customized(
                        secret.as_bytes(),
                        Some(parsed.algorithm),
                        parsed.version,
                        params,
                        &salt,
                    )
                    .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
                    .to_string()
            }
            PasswordScheme::Sha256 => sha256_hex(secret.as_bytes()),
        };

        Ok(Self {
            scheme: self.scheme,
            encoded,
        })
    }
}

impl FromStr for StoredPasswordHash {
    type Err = PasswordHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for StoredPasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredPasswordHash")
            .field("scheme", &self.scheme)
            .field("hash", &"[HASH]")
            .finish()
    }
}
