//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRequest, State};
use std::sync::Arc;

use platform::client::ClientIp;

use crate::application::config::AdminAuthConfig;
use crate::application::{SignInInput, SignInUseCase};
use crate::error::{AdminAuthError, AdminAuthResult};
use crate::infra::jwt::JwtCodec;
use crate::presentation::dto::{LoginRequest, LoginResponse};

/// Shared state for admin auth handlers and middleware
#[derive(Clone)]
pub struct AdminAuthState {
    pub config: Arc<AdminAuthConfig>,
    pub codec: Arc<JwtCodec>,
}

impl AdminAuthState {
    pub fn new(config: AdminAuthConfig) -> Self {
        let codec = JwtCodec::new(&config.jwt_secret);
        Self {
            config: Arc::new(config),
            codec: Arc::new(codec),
        }
    }
}

/// JSON body rejected as an [`AdminAuthError`] problem
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AdminAuthError))]
pub struct LoginBody<T>(pub T);

/// POST /api/admin/login
pub async fn login(
    State(state): State<AdminAuthState>,
    ClientIp(client_ip): ClientIp,
    LoginBody(req): LoginBody<LoginRequest>,
) -> AdminAuthResult<Json<LoginResponse>> {
    let use_case = SignInUseCase::new(state.config.clone(), state.codec.clone());

    let output = use_case
        .execute(SignInInput {
            username: req.username,
            password: req.password,
            client_ip,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        token_type: "Bearer",
        expires_at: output.expires_at,
        expires_in: state.config.token_ttl_secs(),
    }))
}
