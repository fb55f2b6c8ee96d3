//! Admin Authentication
//!
//! Clean Architecture structure:
//! - `domain/` - token claims
//! - `application/` - configuration and use cases (sign in, verify token)
//! - `infra/` - JWT encoding/decoding
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Security Model
//! - A single operator account, configured from the environment
//! - Unknown usernames are verified against a dummy hash of identical cost
//! - HS256 tokens carrying `role = "admin"`, no expiry leeway
//! - 401 for missing/invalid/expired tokens, 403 for any other role

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::AdminAuthConfig;
pub use domain::claims::{ADMIN_ROLE, AdminClaims};
pub use error::{AdminAuthError, AdminAuthResult};
pub use infra::jwt::JwtCodec;
pub use presentation::{AdminAuthState, admin_auth_router, require_admin};
