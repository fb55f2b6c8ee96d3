//! HS256 token codec

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Deserialize;

use crate::domain::claims::AdminClaims;
use crate::error::{AdminAuthError, AdminAuthResult};

/// Minimum signing secret length in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Payload view used before verification
#[derive(Deserialize)]
struct RoleProbe {
    role: Option<String>,
}

/// Signs and verifies admin tokens.
///
/// Signature is checked before expiry, so a forged expired token reports
/// `TokenInvalid`, never `TokenExpired`.
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    probe: Validation,
}

impl JwtCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let mut probe = Validation::new(Algorithm::HS256);
        probe.insecure_disable_signature_validation();
        probe.validate_exp = false;
        probe.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            probe,
        }
    }

    pub fn encode(&self, claims: &AdminClaims) -> AdminAuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AdminAuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Read the `role` claim WITHOUT verifying the token.
    ///
    /// Only ever used to refuse; `None` when the payload cannot be read.
    pub fn peek_role(&self, token: &str) -> Option<Option<String>> {
        decode::<RoleProbe>(token, &self.decoding, &self.probe)
            .ok()
            .map(|data| data.claims.role)
    }

    /// Verify signature and expiry. Role is not checked here.
    pub fn decode(&self, token: &str) -> AdminAuthResult<AdminClaims> {
        decode::<AdminClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AdminAuthError::TokenExpired,
                _ => AdminAuthError::TokenInvalid,
            })
    }
}
