//! Admin Middleware
//!
//! Guards admin routes with a bearer token.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use platform::client::extract_bearer_token;

use crate::application::VerifyTokenUseCase;
use crate::error::AdminAuthError;
use crate::presentation::handlers::AdminAuthState;

/// Middleware that requires a valid admin token.
///
/// On success the decoded [`AdminClaims`](crate::AdminClaims) are stored in
/// request extensions.
pub async fn require_admin(
    State(state): State<AdminAuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AdminAuthError> {
    let token = extract_bearer_token(req.headers())?;

    let claims = VerifyTokenUseCase::new(state.codec.clone()).execute(token)?;

    tracing::debug!(admin = %claims.sub, path = %req.uri().path(), "Admin request authorized");

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
