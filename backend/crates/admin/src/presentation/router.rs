//! Admin Auth Router

use axum::{Router, routing::post};

use crate::presentation::handlers::{self, AdminAuthState};

/// Login route; the caller mounts it under `/api`
pub fn admin_auth_router(state: AdminAuthState) -> Router {
    Router::new()
        .route("/admin/login", post(handlers::login))
        .with_state(state)
}
