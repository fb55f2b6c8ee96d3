use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The only role allowed through admin routes
pub const ADMIN_ROLE: &str = "admin";

/// Claims of an admin token.
///
/// `role` is kept as a free string: tokens minted elsewhere with the same
/// secret may carry other roles, and those must decode cleanly so they can
/// be refused with 403 rather than 401.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin username
    pub sub: String,
    pub role: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl AdminClaims {
    pub fn new_admin(username: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: username.into(),
            role: ADMIN_ROLE.to_string(),
            iat,
            exp: iat.saturating_add(ttl.as_secs() as i64),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_admin_claims() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let claims = AdminClaims::new_admin("root", now, Duration::from_secs(2 * 3600));

        assert!(claims.is_admin());
        assert_eq!(claims.sub, "root");
        assert_eq!(claims.exp - claims.iat, 7200);
        assert_eq!(claims.expires_at(), Utc.with_ymd_and_hms(2026, 3, 1, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_role_is_exact_match() {
        let mut claims = AdminClaims::new_admin("root", Utc::now(), Duration::from_secs(60));
        claims.role = "Admin".to_string();
        assert!(!claims.is_admin());
        claims.role = "viewer".to_string();
        assert!(!claims.is_admin());
    }
}
