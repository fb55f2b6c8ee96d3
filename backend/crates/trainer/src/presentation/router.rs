//! Trainer Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use admin::{AdminAuthState, require_admin};
use report::{GeminiClient, ReportGenerator, TextGenerator};

use crate::domain::repository::TrainerRepository;
use crate::infra::postgres::PgTrainerRepository;
use crate::presentation::handlers::{self, TrainerAppState};

/// Create the Trainer router with PostgreSQL repository and the Gemini client
pub fn trainer_router(
    repo: PgTrainerRepository,
    generator: ReportGenerator<GeminiClient>,
    admin_state: AdminAuthState,
) -> Router {
    trainer_router_generic(repo, generator, admin_state)
}

/// Create a generic Trainer router for any repository and text generator.
///
/// Paths are relative; the caller mounts the router under `/api`.
pub fn trainer_router_generic<R, G>(
    repo: R,
    generator: ReportGenerator<G>,
    admin_state: AdminAuthState,
) -> Router
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let state = TrainerAppState {
        repo: Arc::new(repo),
        generator,
    };

    let admin_routes = Router::new()
        .route("/admin/users", get(handlers::admin_list_users::<R, G>))
        .route(
            "/admin/users/{id}",
            get(handlers::admin_user_detail::<R, G>).delete(handlers::admin_delete_user::<R, G>),
        )
        .route_layer(middleware::from_fn_with_state(admin_state, require_admin));

    Router::new()
        .route("/health", get(handlers::health::<R, G>))
        .route("/users", post(handlers::create_user::<R, G>))
        .route("/users/{id}", get(handlers::get_user::<R, G>))
        .route("/users/{id}/progress", put(handlers::update_progress::<R, G>))
        .route("/users/{id}/language", put(handlers::update_language::<R, G>))
        .route("/users/{id}/attempts", get(handlers::list_attempts::<R, G>))
        .route(
            "/users/{id}/report",
            post(handlers::generate_report::<R, G>).get(handlers::get_report::<R, G>),
        )
        .route("/scenarios", get(handlers::list_scenarios::<R, G>))
        .route("/attempts", post(handlers::record_attempt::<R, G>))
        .merge(admin_routes)
        .with_state(state)
}
