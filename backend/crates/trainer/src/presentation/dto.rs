//! API DTOs (Data Transfer Objects)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kernel::id::{AttemptId, UserId};
use report::{AiAnalysis, ScenarioBreakdown, catalog};
use serde::{Deserialize, Serialize};

use crate::application::{ListUsersOutput, UserDetail};
use crate::domain::entity::{Attempt, FinalReport, Scenario, User, UserSummary};
use crate::domain::value_object::Language;

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ============================================================================
// Users
// ============================================================================

/// Create user request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub language: Language,
    /// Must be true
    #[serde(default)]
    pub consent: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub progress: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLanguageRequest {
    pub language: Language,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub username: String,
    pub language: Language,
    pub consent: bool,
    pub progress: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.user_name.as_str().to_string(),
            language: user.language,
            consent: user.consent,
            progress: user.progress,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResponse {
    pub code: String,
    pub title_zh: String,
    pub title_en: String,
    pub skill: String,
    pub display_order: i32,
}

impl From<Scenario> for ScenarioResponse {
    fn from(scenario: Scenario) -> Self {
        Self {
            code: scenario.code,
            title_zh: scenario.title_zh,
            title_en: scenario.title_en,
            skill: scenario.skill,
            display_order: scenario.display_order,
        }
    }
}

// ============================================================================
// Attempts
// ============================================================================

/// Record attempt request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttemptRequest {
    pub user_id: String,
    pub scenario_code: String,
    pub success: bool,
    pub duration_ms: i64,
    /// Error-type codes from the catalog
    #[serde(default)]
    pub error_codes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResponse {
    pub attempt_id: AttemptId,
    pub user_id: UserId,
    pub scenario_code: String,
    pub success: bool,
    pub duration_ms: i64,
    pub error_codes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Attempt> for AttemptResponse {
    fn from(attempt: Attempt) -> Self {
        Self {
            attempt_id: attempt.attempt_id,
            user_id: attempt.user_id,
            scenario_code: attempt.scenario_code,
            success: attempt.success,
            duration_ms: attempt.duration_ms,
            error_codes: attempt.error_codes,
            created_at: attempt.created_at,
        }
    }
}

// ============================================================================
// Final report
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioBreakdownResponse {
    pub scenario_code: String,
    pub title_zh: &'static str,
    pub title_en: String,
    pub attempts: u32,
    pub successes: u32,
    pub total_duration_ms: u64,
    pub best_duration_ms: Option<u64>,
}

impl From<ScenarioBreakdown> for ScenarioBreakdownResponse {
    fn from(breakdown: ScenarioBreakdown) -> Self {
        let (title_zh, title_en) = catalog::scenario_label(&breakdown.scenario_code);
        Self {
            scenario_code: breakdown.scenario_code,
            title_zh,
            title_en,
            attempts: breakdown.attempts,
            successes: breakdown.successes,
            total_duration_ms: breakdown.total_duration_ms,
            best_duration_ms: breakdown.best_duration_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub user_id: UserId,
    pub attempt_count: u32,
    pub success_count: u32,
    /// 0.0..=1.0
    pub success_rate: f64,
    pub total_time_ms: u64,
    pub average_time_ms: u64,
    pub scenario_breakdown: Vec<ScenarioBreakdownResponse>,
    pub error_distribution: BTreeMap<String, u32>,
    pub skill_scores: BTreeMap<String, u8>,
    /// Field names stay snake_case, as the model produces them
    pub ai_analysis: Option<AiAnalysis>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FinalReport> for ReportResponse {
    fn from(report: FinalReport) -> Self {
        let stats = report.stats;
        Self {
            user_id: report.user_id,
            attempt_count: stats.attempt_count,
            success_count: stats.success_count,
            success_rate: stats.success_rate,
            total_time_ms: stats.total_duration_ms,
            average_time_ms: stats.average_duration_ms,
            scenario_breakdown: stats.scenarios.into_iter().map(Into::into).collect(),
            error_distribution: stats.error_distribution,
            skill_scores: stats.skill_scores,
            ai_analysis: report.ai_analysis,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserSummary {
    #[serde(flatten)]
    pub user: UserResponse,
    pub attempt_count: i64,
    pub has_report: bool,
}

impl From<UserSummary> for AdminUserSummary {
    fn from(summary: UserSummary) -> Self {
        Self {
            user: summary.user.into(),
            attempt_count: summary.attempt_count,
            has_report: summary.has_report,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserListResponse {
    pub users: Vec<AdminUserSummary>,
    pub total: i64,
    pub limit: u32,
    pub offset: u32,
}

impl From<ListUsersOutput> for AdminUserListResponse {
    fn from(output: ListUsersOutput) -> Self {
        Self {
            users: output.users.into_iter().map(Into::into).collect(),
            total: output.total,
            limit: output.limit,
            offset: output.offset,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserDetailResponse {
    pub user: UserResponse,
    pub attempts: Vec<AttemptResponse>,
    pub report: Option<ReportResponse>,
}

impl From<UserDetail> for AdminUserDetailResponse {
    fn from(detail: UserDetail) -> Self {
        Self {
            user: detail.user.into(),
            attempts: detail.attempts.into_iter().map(Into::into).collect(),
            report: detail.report.map(Into::into),
        }
    }
}
