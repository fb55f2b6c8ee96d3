//! PostgreSQL Repository Implementations

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kernel::id::{AttemptId, UserId};
use report::{AiAnalysis, ReportStats, ScenarioBreakdown};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::{Attempt, FinalReport, Scenario, User, UserSummary};
use crate::domain::repository::{
    AttemptRepository, HealthCheck, ReportRepository, ScenarioRepository, UserRepository,
};
use crate::domain::value_object::{Language, UserName};
use crate::error::{TrainerError, TrainerResult};

/// PostgreSQL-backed trainer repository
#[derive(Clone)]
pub struct PgTrainerRepository {
    pool: PgPool,
}

impl PgTrainerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "user_id, username, language, consent, progress, created_at";

const REPORT_COLUMNS: &str = r#"
    user_id,
    attempt_count,
    success_count,
    success_rate,
    total_time_ms,
    average_time_ms,
    scenario_breakdown,
    error_distribution,
    skill_scores,
    ai_analysis,
    created_at,
    updated_at
"#;

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgTrainerRepository {
    async fn create_user(&self, user: &User) -> TrainerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, language, consent, progress, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.language.as_str())
        .bind(user.consent)
        .bind(user.progress)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_user(&self, user_id: &UserId) -> TrainerResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn advance_progress(
        &self,
        user_id: &UserId,
        progress: i32,
    ) -> TrainerResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET progress = GREATEST(progress, $2) WHERE user_id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id.as_uuid())
        .bind(progress)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn set_language(
        &self,
        user_id: &UserId,
        language: Language,
    ) -> TrainerResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET language = $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id.as_uuid())
        .bind(language.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn list_user_summaries(
        &self,
        limit: i64,
        offset: i64,
    ) -> TrainerResult<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummaryRow>(
            r#"
            SELECT
                u.user_id,
                u.username,
                u.language,
                u.consent,
                u.progress,
                u.created_at,
                COUNT(a.attempt_id) AS attempt_count,
                EXISTS (SELECT 1 FROM final_reports r WHERE r.user_id = u.user_id) AS has_report
            FROM users u
            LEFT JOIN attempts a ON a.user_id = u.user_id
            GROUP BY u.user_id
            ORDER BY u.created_at DESC, u.user_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserSummaryRow::into_summary).collect()
    }

    async fn count_users(&self) -> TrainerResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn delete_user(&self, user_id: &UserId) -> TrainerResult<bool> {
        // attempts and final_reports cascade
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Scenario Repository Implementation
// ============================================================================

impl ScenarioRepository for PgTrainerRepository {
    async fn list_scenarios(&self) -> TrainerResult<Vec<Scenario>> {
        let rows = sqlx::query_as::<_, ScenarioRow>(
            "SELECT code, title_zh, title_en, skill, display_order FROM scenarios \
             ORDER BY display_order",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ScenarioRow::into_scenario).collect())
    }

    async fn find_scenario(&self, code: &str) -> TrainerResult<Option<Scenario>> {
        let row = sqlx::query_as::<_, ScenarioRow>(
            "SELECT code, title_zh, title_en, skill, display_order FROM scenarios WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ScenarioRow::into_scenario))
    }
}

// ============================================================================
// Attempt Repository Implementation
// ============================================================================

impl AttemptRepository for PgTrainerRepository {
    async fn create_attempt(&self, attempt: &Attempt) -> TrainerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO attempts (
                attempt_id,
                user_id,
                scenario_code,
                success,
                duration_ms,
                error_codes,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(attempt.attempt_id.as_uuid())
        .bind(attempt.user_id.as_uuid())
        .bind(&attempt.scenario_code)
        .bind(attempt.success)
        .bind(attempt.duration_ms)
        .bind(&attempt.error_codes)
        .bind(attempt.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_attempts(&self, user_id: &UserId) -> TrainerResult<Vec<Attempt>> {
        let rows = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT attempt_id, user_id, scenario_code, success, duration_ms, error_codes, created_at
            FROM attempts
            WHERE user_id = $1
            ORDER BY created_at, attempt_id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AttemptRow::into_attempt).collect())
    }
}

// ============================================================================
// Report Repository Implementation
// ============================================================================

impl ReportRepository for PgTrainerRepository {
    async fn upsert_report(&self, report: &FinalReport) -> TrainerResult<FinalReport> {
        let stats = &report.stats;

        let row = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            INSERT INTO final_reports (
                user_id,
                attempt_count,
                success_count,
                success_rate,
                total_time_ms,
                average_time_ms,
                scenario_breakdown,
                error_distribution,
                skill_scores,
                ai_analysis,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            ON CONFLICT (user_id) DO UPDATE SET
                attempt_count = EXCLUDED.attempt_count,
                success_count = EXCLUDED.success_count,
                success_rate = EXCLUDED.success_rate,
                total_time_ms = EXCLUDED.total_time_ms,
                average_time_ms = EXCLUDED.average_time_ms,
                scenario_breakdown = EXCLUDED.scenario_breakdown,
                error_distribution = EXCLUDED.error_distribution,
                skill_scores = EXCLUDED.skill_scores,
                ai_analysis = EXCLUDED.ai_analysis,
                updated_at = EXCLUDED.updated_at
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(report.user_id.as_uuid())
        .bind(to_i32(stats.attempt_count)?)
        .bind(to_i32(stats.success_count)?)
        .bind(stats.success_rate)
        .bind(saturating_i64(stats.total_duration_ms))
        .bind(saturating_i64(stats.average_duration_ms))
        .bind(Json(&stats.scenarios))
        .bind(Json(&stats.error_distribution))
        .bind(Json(&stats.skill_scores))
        .bind(report.ai_analysis.as_ref().map(Json))
        .bind(report.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.into_report()
    }

    async fn find_report(&self, user_id: &UserId) -> TrainerResult<Option<FinalReport>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM final_reports WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ReportRow::into_report).transpose()
    }
}

impl HealthCheck for PgTrainerRepository {
    async fn ping(&self) -> TrainerResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn to_i32(value: u32) -> TrainerResult<i32> {
    i32::try_from(value).map_err(|_| TrainerError::Internal(format!("{value} overflows INTEGER")))
}

// totals already saturate in the aggregation; BIGINT does the same
fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    language: String,
    consent: bool,
    progress: i32,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> TrainerResult<User> {
        let language = self
            .language
            .parse::<Language>()
            .map_err(TrainerError::Internal)?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.username),
            language,
            consent: self.consent,
            progress: self.progress,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserSummaryRow {
    #[sqlx(flatten)]
    user: UserRow,
    attempt_count: i64,
    has_report: bool,
}

impl UserSummaryRow {
    fn into_summary(self) -> TrainerResult<UserSummary> {
        Ok(UserSummary {
            user: self.user.into_user()?,
            attempt_count: self.attempt_count,
            has_report: self.has_report,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ScenarioRow {
    code: String,
    title_zh: String,
    title_en: String,
    skill: String,
    display_order: i32,
}

impl ScenarioRow {
    fn into_scenario(self) -> Scenario {
        Scenario {
            code: self.code,
            title_zh: self.title_zh,
            title_en: self.title_en,
            skill: self.skill,
            display_order: self.display_order,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AttemptRow {
    attempt_id: Uuid,
    user_id: Uuid,
    scenario_code: String,
    success: bool,
    duration_ms: i64,
    error_codes: Vec<String>,
    created_at: DateTime<Utc>,
}

impl AttemptRow {
    fn into_attempt(self) -> Attempt {
        Attempt {
            attempt_id: AttemptId::from_uuid(self.attempt_id),
            user_id: UserId::from_uuid(self.user_id),
            scenario_code: self.scenario_code,
            success: self.success,
            duration_ms: self.duration_ms,
            error_codes: self.error_codes,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReportRow {
    user_id: Uuid,
    attempt_count: i32,
    success_count: i32,
    success_rate: f64,
    total_time_ms: i64,
    average_time_ms: i64,
    scenario_breakdown: Json<Vec<ScenarioBreakdown>>,
    error_distribution: Json<BTreeMap<String, u32>>,
    skill_scores: Json<BTreeMap<String, u8>>,
    ai_analysis: Option<Json<AiAnalysis>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self) -> TrainerResult<FinalReport> {
        let invalid = |field: &str| TrainerError::Internal(format!("Negative {field} in final_reports"));

        let stats = ReportStats {
            attempt_count: u32::try_from(self.attempt_count).map_err(|_| invalid("attempt_count"))?,
            success_count: u32::try_from(self.success_count).map_err(|_| invalid("success_count"))?,
            success_rate: self.success_rate,
            total_duration_ms: u64::try_from(self.total_time_ms)
                .map_err(|_| invalid("total_time_ms"))?,
            average_duration_ms: u64::try_from(self.average_time_ms)
                .map_err(|_| invalid("average_time_ms"))?,
            scenarios: self.scenario_breakdown.0,
            error_distribution: self.error_distribution.0,
            skill_scores: self.skill_scores.0,
        };

        Ok(FinalReport {
            user_id: UserId::from_uuid(self.user_id),
            stats,
            ai_analysis: self.ai_analysis.map(|json| json.0),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_totals_clamp_to_bigint() {
        assert_eq!(saturating_i64(u64::MAX - 1), i64::MAX);
        assert_eq!(saturating_i64(86_400_000), 86_400_000);
    }
}
