//! Verify Token Use Case

use std::sync::Arc;

use crate::domain::claims::{ADMIN_ROLE, AdminClaims};
use crate::error::{AdminAuthError, AdminAuthResult};
use crate::infra::jwt::JwtCodec;

pub struct VerifyTokenUseCase {
    codec: Arc<JwtCodec>,
}

impl VerifyTokenUseCase {
    pub fn new(codec: Arc<JwtCodec>) -> Self {
        Self { codec }
    }

    /// Role first, then signature and expiry.
    ///
    /// A readable payload whose role is not admin is refused with 403 even
    /// when its signature would not verify. Unreadable tokens, bad
    /// signatures and expired admin tokens are 401.
    pub fn execute(&self, token: &str) -> AdminAuthResult<AdminClaims> {
        match self.codec.peek_role(token) {
            None => return Err(AdminAuthError::TokenInvalid),
            Some(role) if role.as_deref() != Some(ADMIN_ROLE) => {
                return Err(AdminAuthError::InsufficientRole);
            }
            Some(_) => {}
        }

        let claims = self.codec.decode(token)?;

        // decode re-reads the payload; keep the check on the verified copy
        if !claims.is_admin() {
            return Err(AdminAuthError::InsufficientRole);
        }

        Ok(claims)
    }
}
