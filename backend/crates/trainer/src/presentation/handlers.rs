//! HTTP Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use admin::AdminClaims;
use kernel::id::UserId;
use report::{ReportGenerator, TextGenerator};

use crate::application::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GenerateReportUseCase,
    GetReportUseCase, GetUserUseCase, ListAttemptsUseCase, ListUsersInput, ListUsersUseCase,
    RecordAttemptInput, RecordAttemptUseCase, UpdateLanguageUseCase, UpdateProgressUseCase,
    UserDetailUseCase,
};
use crate::domain::repository::TrainerRepository;
use crate::error::{TrainerError, TrainerResult};
use crate::presentation::dto::{
    AdminUserDetailResponse, AdminUserListResponse, AttemptResponse, CreateUserRequest,
    HealthResponse, ListUsersQuery, RecordAttemptRequest, ReportResponse, ScenarioResponse,
    UpdateLanguageRequest, UpdateProgressRequest, UserResponse,
};
use crate::presentation::extract::{JsonBody, PathParam, QueryParams};

/// Shared state for trainer handlers
pub struct TrainerAppState<R, G>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub generator: ReportGenerator<G>,
}

impl<R, G> Clone for TrainerAppState<R, G>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            generator: self.generator.clone(),
        }
    }
}

fn parse_user_id(raw: &str) -> TrainerResult<UserId> {
    raw.parse()
        .map_err(|_| TrainerError::InvalidId(raw.to_string()))
}

// ============================================================================
// Health
// ============================================================================

/// GET /api/health
pub async fn health<R, G>(State(state): State<TrainerAppState<R, G>>) -> impl IntoResponse
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    match state.repo.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// POST /api/users
pub async fn create_user<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> TrainerResult<impl IntoResponse>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let use_case = CreateUserUseCase::new(state.repo.clone());

    let user = use_case
        .execute(CreateUserInput {
            username: req.username,
            language: req.language,
            consent: req.consent,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users/{id}
pub async fn get_user<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    PathParam(id): PathParam<String>,
) -> TrainerResult<Json<UserResponse>>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = GetUserUseCase::new(state.repo.clone()).execute(&user_id).await?;

    Ok(Json(user.into()))
}

/// PUT /api/users/{id}/progress
pub async fn update_progress<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    PathParam(id): PathParam<String>,
    JsonBody(req): JsonBody<UpdateProgressRequest>,
) -> TrainerResult<Json<UserResponse>>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = UpdateProgressUseCase::new(state.repo.clone())
        .execute(&user_id, req.progress)
        .await?;

    Ok(Json(user.into()))
}

/// PUT /api/users/{id}/language
pub async fn update_language<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    PathParam(id): PathParam<String>,
    JsonBody(req): JsonBody<UpdateLanguageRequest>,
) -> TrainerResult<Json<UserResponse>>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = UpdateLanguageUseCase::new(state.repo.clone())
        .execute(&user_id, req.language)
        .await?;

    Ok(Json(user.into()))
}

// ============================================================================
// Scenarios & Attempts
// ============================================================================

/// GET /api/scenarios
pub async fn list_scenarios<R, G>(
    State(state): State<TrainerAppState<R, G>>,
) -> TrainerResult<Json<Vec<ScenarioResponse>>>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let scenarios = state.repo.list_scenarios().await?;

    Ok(Json(scenarios.into_iter().map(Into::into).collect()))
}

/// POST /api/attempts
pub async fn record_attempt<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    JsonBody(req): JsonBody<RecordAttemptRequest>,
) -> TrainerResult<impl IntoResponse>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let user_id = parse_user_id(&req.user_id)?;

    let use_case =
        RecordAttemptUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());

    let attempt = use_case
        .execute(RecordAttemptInput {
            user_id,
            scenario_code: req.scenario_code,
            success: req.success,
            duration_ms: req.duration_ms,
            error_codes: req.error_codes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AttemptResponse::from(attempt))))
}

/// GET /api/users/{id}/attempts
pub async fn list_attempts<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    PathParam(id): PathParam<String>,
) -> TrainerResult<Json<Vec<AttemptResponse>>>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let attempts = ListAttemptsUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&user_id)
        .await?;

    Ok(Json(attempts.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Final report
// ============================================================================

/// POST /api/users/{id}/report
pub async fn generate_report<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    PathParam(id): PathParam<String>,
) -> TrainerResult<Json<ReportResponse>>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;

    let use_case = GenerateReportUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.generator.clone(),
    );

    let report = use_case.execute(&user_id).await?;

    Ok(Json(report.into()))
}

/// GET /api/users/{id}/report
pub async fn get_report<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    PathParam(id): PathParam<String>,
) -> TrainerResult<Json<ReportResponse>>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let report = GetReportUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&user_id)
        .await?;

    Ok(Json(report.into()))
}

// ============================================================================
// Admin (behind require_admin)
// ============================================================================

/// GET /api/admin/users
pub async fn admin_list_users<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    QueryParams(query): QueryParams<ListUsersQuery>,
) -> TrainerResult<Json<AdminUserListResponse>>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let output = ListUsersUseCase::new(state.repo.clone())
        .execute(ListUsersInput {
            limit: query.limit,
            offset: query.offset,
        })
        .await?;

    Ok(Json(output.into()))
}

/// GET /api/admin/users/{id}
pub async fn admin_user_detail<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    PathParam(id): PathParam<String>,
) -> TrainerResult<Json<AdminUserDetailResponse>>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let detail = UserDetailUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone())
        .execute(&user_id)
        .await?;

    Ok(Json(detail.into()))
}

/// DELETE /api/admin/users/{id}
pub async fn admin_delete_user<R, G>(
    State(state): State<TrainerAppState<R, G>>,
    Extension(claims): Extension<AdminClaims>,
    PathParam(id): PathParam<String>,
) -> TrainerResult<StatusCode>
where
    R: TrainerRepository,
    G: TextGenerator + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    DeleteUserUseCase::new(state.repo.clone())
        .execute(&user_id, &claims.sub)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
