//! Router-level tests against an in-memory store

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use admin::application::config::DEFAULT_TOKEN_TTL;
use admin::{AdminAuthConfig, AdminAuthState, AdminClaims, JwtCodec};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use chrono::Utc;
use kernel::id::UserId;
use platform::crypto::sha256_hex;
use platform::password::StoredPasswordHash;
use report::{GenerationError, ReportGenerator, TextGenerator, catalog};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::MAX_DURATION_MS;
use crate::domain::entity::{Attempt, FinalReport, Scenario, User, UserSummary};
use crate::domain::repository::{
    AttemptRepository, HealthCheck, ReportRepository, ScenarioRepository, UserRepository,
};
use crate::domain::value_object::Language;
use crate::error::{TrainerError, TrainerResult};
use crate::trainer_router_generic;

const SECRET: &[u8] = b"test-secret-test-secret-test-secret";

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct Store {
    users: Vec<User>,
    scenarios: Vec<Scenario>,
    attempts: Vec<Attempt>,
    reports: Vec<FinalReport>,
}

struct MemoryRepository {
    store: Mutex<Store>,
    healthy: bool,
}

impl MemoryRepository {
    fn seeded() -> Self {
        let scenarios = catalog::SCENARIOS
            .iter()
            .map(|entry| Scenario {
                code: entry.code.to_string(),
                title_zh: entry.label.zh.to_string(),
                title_en: entry.label.en.to_string(),
                skill: entry.skill.to_string(),
                display_order: entry.display_order,
            })
            .collect();

        Self {
            store: Mutex::new(Store {
                scenarios,
                ..Store::default()
            }),
            healthy: true,
        }
    }

    fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::seeded()
        }
    }
}

impl UserRepository for MemoryRepository {
    async fn create_user(&self, user: &User) -> TrainerResult<()> {
        self.store.lock().unwrap().users.push(user.clone());
        Ok(())
    }

    async fn find_user(&self, user_id: &UserId) -> TrainerResult<Option<User>> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.user_id == *user_id).cloned())
    }

    async fn advance_progress(
        &self,
        user_id: &UserId,
        progress: i32,
    ) -> TrainerResult<Option<User>> {
        let mut store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter_mut()
            .find(|u| u.user_id == *user_id)
            .map(|user| {
                user.advance_progress(progress);
                user.clone()
            }))
    }

    async fn set_language(
        &self,
        user_id: &UserId,
        language: Language,
    ) -> TrainerResult<Option<User>> {
        let mut store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter_mut()
            .find(|u| u.user_id == *user_id)
            .map(|user| {
                user.language = language;
                user.clone()
            }))
    }

    async fn list_user_summaries(
        &self,
        limit: i64,
        offset: i64,
    ) -> TrainerResult<Vec<UserSummary>> {
        let store = self.store.lock().unwrap();
        let mut users = store.users.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(users
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|user| UserSummary {
                attempt_count: store
                    .attempts
                    .iter()
                    .filter(|a| a.user_id == user.user_id)
                    .count() as i64,
                has_report: store.reports.iter().any(|r| r.user_id == user.user_id),
                user,
            })
            .collect())
    }

    async fn count_users(&self) -> TrainerResult<i64> {
        Ok(self.store.lock().unwrap().users.len() as i64)
    }

    async fn delete_user(&self, user_id: &UserId) -> TrainerResult<bool> {
        let mut store = self.store.lock().unwrap();
        let before = store.users.len();
        store.users.retain(|u| u.user_id != *user_id);
        store.attempts.retain(|a| a.user_id != *user_id);
        store.reports.retain(|r| r.user_id != *user_id);
        Ok(store.users.len() < before)
    }
}

impl ScenarioRepository for MemoryRepository {
    async fn list_scenarios(&self) -> TrainerResult<Vec<Scenario>> {
        let mut scenarios = self.store.lock().unwrap().scenarios.clone();
        scenarios.sort_by_key(|s| s.display_order);
        Ok(scenarios)
    }

    async fn find_scenario(&self, code: &str) -> TrainerResult<Option<Scenario>> {
        let store = self.store.lock().unwrap();
        Ok(store.scenarios.iter().find(|s| s.code == code).cloned())
    }
}

impl AttemptRepository for MemoryRepository {
    async fn create_attempt(&self, attempt: &Attempt) -> TrainerResult<()> {
        self.store.lock().unwrap().attempts.push(attempt.clone());
        Ok(())
    }

    async fn list_attempts(&self, user_id: &UserId) -> TrainerResult<Vec<Attempt>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .attempts
            .iter()
            .filter(|a| a.user_id == *user_id)
            .cloned()
            .collect())
    }
}

impl ReportRepository for MemoryRepository {
    async fn upsert_report(&self, report: &FinalReport) -> TrainerResult<FinalReport> {
        let mut store = self.store.lock().unwrap();
        let mut stored = report.clone();

        if let Some(existing) = store.reports.iter_mut().find(|r| r.user_id == report.user_id) {
            stored.created_at = existing.created_at;
            *existing = stored.clone();
        } else {
            store.reports.push(stored.clone());
        }

        Ok(stored)
    }

    async fn find_report(&self, user_id: &UserId) -> TrainerResult<Option<FinalReport>> {
        let store = self.store.lock().unwrap();
        Ok(store.reports.iter().find(|r| r.user_id == *user_id).cloned())
    }
}

impl HealthCheck for MemoryRepository {
    async fn ping(&self) -> TrainerResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(TrainerError::Internal("store offline".into()))
        }
    }
}

// ============================================================================
// Generator stub
// ============================================================================

/// Answers every prompt with the same reply; unconfigured without one
struct StubGenerator {
    reply: Option<String>,
}

impl TextGenerator for StubGenerator {
    fn is_configured(&self) -> bool {
        self.reply.is_some()
    }

    async fn generate_text(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.reply.clone().ok_or(GenerationError::MissingCredentials)
    }
}

fn good_reply() -> String {
    json!({
        "summary_zh": "你能识别仿冒域名，但在虚假空投中签署了危险授权。",
        "summary_en": "You spot spoofed domains well but signed a risky approval in the fake airdrop.",
        "recommendations_zh": ["签名前仔细阅读授权额度。"],
        "recommendations_en": ["Read approval amounts before signing."],
        "risk_profile": {
            "overall_risk_level": "medium",
            "strongest_area_zh": "网址辨识",
            "strongest_area_en": "URL inspection",
            "weakest_area_zh": "交易审查",
            "weakest_area_en": "Transaction review"
        }
    })
    .to_string()
}

// ============================================================================
// Helpers
// ============================================================================

fn admin_state() -> AdminAuthState {
    let hash = StoredPasswordHash::parse(&sha256_hex(b"pw")).unwrap();
    AdminAuthState::new(AdminAuthConfig::new("root", hash, SECRET.to_vec(), DEFAULT_TOKEN_TTL).unwrap())
}

fn app_with(repo: MemoryRepository, reply: Option<String>) -> Router {
    let generator = ReportGenerator::new(Arc::new(StubGenerator { reply }));
    trainer_router_generic(repo, generator, admin_state())
}

fn app() -> Router {
    app_with(MemoryRepository::seeded(), None)
}

fn bearer(role: &str) -> String {
    let mut claims = AdminClaims::new_admin("root", Utc::now(), Duration::from_secs(600));
    claims.role = role.to_string();
    format!("Bearer {}", JwtCodec::new(SECRET).encode(&claims).unwrap())
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    auth: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn send_raw(router: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn create_user(router: &Router, username: &str) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/users",
        Some(json!({ "username": username, "consent": true })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["userId"].as_str().unwrap().to_string()
}

async fn record(router: &Router, user_id: &str, scenario: &str, success: bool, errors: &[&str]) {
    let (status, _) = send(
        router,
        Method::POST,
        "/attempts",
        Some(json!({
            "userId": user_id,
            "scenarioCode": scenario,
            "success": success,
            "durationMs": 4000,
            "errorCodes": errors,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_store_state() {
    let (status, body) = send(&app(), Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let down = app_with(MemoryRepository::unhealthy(), None);
    let (status, body) = send(&down, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

// ============================================================================
// Users
// ============================================================================

mod user_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_user_defaults() {
        let router = app();
        let (status, body) = send(
            &router,
            Method::POST,
            "/users",
            Some(json!({ "username": "  alice  ", "consent": true })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["username"], "alice");
        assert_eq!(body["language"], "zh");
        assert_eq!(body["progress"], 0);

        let uri = format!("/users/{}", body["userId"].as_str().unwrap());
        let (status, fetched) = send(&router, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["userId"], body["userId"]);
    }

    #[tokio::test]
    async fn test_create_user_requires_consent() {
        let router = app();
        for payload in [
            json!({ "username": "bob", "consent": false }),
            json!({ "username": "bob" }),
        ] {
            let (status, body) = send(&router, Method::POST, "/users", Some(payload), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["reason"], "consent_required");
        }
    }

    #[tokio::test]
    async fn test_create_user_validates_username() {
        let router = app();
        for username in ["   ".to_string(), "x".repeat(33)] {
            let (status, body) = send(
                &router,
                Method::POST,
                "/users",
                Some(json!({ "username": username, "consent": true })),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["reason"], "invalid_username");
        }

        let (status, _) = send(
            &router,
            Method::POST,
            "/users",
            Some(json!({ "username": "名".repeat(32), "consent": true })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_bad_and_unknown_ids() {
        let router = app();

        let (status, body) = send(&router, Method::GET, "/users/not-a-uuid", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "invalid_id");

        let uri = format!("/users/{}", UserId::new());
        let (status, body) = send(&router, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["reason"], "user_not_found");
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_problem_documents() {
        let router = app();
        let user_id = create_user(&router, "dora").await;
        let progress_uri = format!("/users/{user_id}/progress");

        let cases = [
            (Method::POST, "/users", r#"{"consent":true,"language":"fr"}"#),
            (Method::POST, "/users", r#"{"username":"x","consent":"yes"}"#),
            (Method::POST, "/users", r#"{"username":"x""#),
            (Method::PUT, progress_uri.as_str(), r#"{"progress":"ten"}"#),
            (Method::POST, "/attempts", r#"{"userId":"x","scenarioCode":"fake_airdrop"}"#),
        ];

        for (method, uri, body) in cases {
            let (status, problem) = send_raw(&router, method, uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(problem["reason"], "invalid_body", "{body}");
            assert_eq!(problem["status"], 400);
            assert_eq!(problem["title"], "Bad Request");
        }
    }

    #[tokio::test]
    async fn test_progress_never_decreases() {
        let router = app();
        let user_id = create_user(&router, "carol").await;
        let uri = format!("/users/{user_id}/progress");

        let (_, body) = send(&router, Method::PUT, &uri, Some(json!({ "progress": 3 })), None).await;
        assert_eq!(body["progress"], 3);

        let (status, body) =
            send(&router, Method::PUT, &uri, Some(json!({ "progress": 1 })), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["progress"], 3);

        let (status, body) =
            send(&router, Method::PUT, &uri, Some(json!({ "progress": -1 })), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "invalid_progress");
    }

    #[tokio::test]
    async fn test_change_language() {
        let router = app();
        let user_id = create_user(&router, "dave").await;

        let (status, body) = send(
            &router,
            Method::PUT,
            &format!("/users/{user_id}/language"),
            Some(json!({ "language": "en" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["language"], "en");
    }
}

// ============================================================================
// Scenarios & attempts
// ============================================================================

mod attempt_tests {
    use super::*;

    #[tokio::test]
    async fn test_scenarios_in_display_order() {
        let (status, body) = send(&app(), Method::GET, "/scenarios", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let codes: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["code"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            codes,
            [
                "domain_spoof",
                "wallet_connect",
                "fake_airdrop",
                "malicious_approval",
                "seed_phrase",
                "fake_support"
            ]
        );
    }

    #[tokio::test]
    async fn test_attempt_rejections() {
        let router = app();
        let user_id = create_user(&router, "erin").await;

        let cases = [
            (UserId::new().to_string(), "fake_airdrop", 10, vec![], StatusCode::NOT_FOUND, "user_not_found"),
            (user_id.clone(), "no_such_level", 10, vec![], StatusCode::NOT_FOUND, "scenario_not_found"),
            (user_id.clone(), "fake_airdrop", 10, vec!["made_up"], StatusCode::BAD_REQUEST, "unknown_error_code"),
            (user_id.clone(), "fake_airdrop", -5, vec![], StatusCode::BAD_REQUEST, "invalid_duration"),
            (user_id.clone(), "fake_airdrop", MAX_DURATION_MS + 1, vec![], StatusCode::BAD_REQUEST, "invalid_duration"),
            (user_id.clone(), "fake_airdrop", i64::MAX, vec![], StatusCode::BAD_REQUEST, "invalid_duration"),
            ("nope".to_string(), "fake_airdrop", 10, vec![], StatusCode::BAD_REQUEST, "invalid_id"),
        ];

        for (uid, scenario, duration, errors, expected, reason) in cases {
            let (status, body) = send(
                &router,
                Method::POST,
                "/attempts",
                Some(json!({
                    "userId": uid,
                    "scenarioCode": scenario,
                    "success": false,
                    "durationMs": duration,
                    "errorCodes": errors,
                })),
                None,
            )
            .await;
            assert_eq!(status, expected, "{reason}");
            assert_eq!(body["reason"], reason);
        }
    }

    #[tokio::test]
    async fn test_longest_attempts_still_produce_a_report() {
        let router = app();
        let user_id = create_user(&router, "fern").await;

        for _ in 0..2 {
            let (status, _) = send(
                &router,
                Method::POST,
                "/attempts",
                Some(json!({
                    "userId": user_id,
                    "scenarioCode": "fake_airdrop",
                    "success": true,
                    "durationMs": MAX_DURATION_MS,
                    "errorCodes": [],
                })),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let uri = format!("/users/{user_id}/report");
        let (status, body) = send(&router, Method::POST, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalTimeMs"], 2 * MAX_DURATION_MS);
        assert!(body["totalTimeMs"].as_i64().is_some());
    }

    #[tokio::test]
    async fn test_attempts_listed_oldest_first() {
        let router = app();
        let user_id = create_user(&router, "frank").await;

        record(&router, &user_id, "domain_spoof", true, &[]).await;
        record(&router, &user_id, "fake_airdrop", false, &["signed_unlimited_approval"]).await;

        let (status, body) =
            send(&router, Method::GET, &format!("/users/{user_id}/attempts"), None, None).await;
        assert_eq!(status, StatusCode::OK);

        let attempts = body.as_array().unwrap();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0]["scenarioCode"], "domain_spoof");
        assert_eq!(attempts[1]["errorCodes"][0], "signed_unlimited_approval");
    }
}

// ============================================================================
// Final report
// ============================================================================

mod report_tests {
    use super::*;

    #[tokio::test]
    async fn test_report_requires_attempts() {
        let router = app();
        let user_id = create_user(&router, "gina").await;
        let uri = format!("/users/{user_id}/report");

        let (status, body) = send(&router, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["reason"], "report_not_found");

        let (status, body) = send(&router, Method::POST, &uri, None, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["reason"], "no_attempts");
    }

    #[tokio::test]
    async fn test_report_falls_back_without_llm() {
        let router = app();
        let user_id = create_user(&router, "hank").await;
        record(&router, &user_id, "domain_spoof", true, &[]).await;
        record(&router, &user_id, "fake_airdrop", false, &["signed_unlimited_approval"]).await;
        let uri = format!("/users/{user_id}/report");

        let (status, body) = send(&router, Method::POST, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["attemptCount"], 2);
        assert_eq!(body["successCount"], 1);
        assert_eq!(body["successRate"], 0.5);
        assert_eq!(body["errorDistribution"]["signed_unlimited_approval"], 1);
        assert_eq!(body["scenarioBreakdown"][0]["scenarioCode"], "domain_spoof");
        assert_eq!(body["aiAnalysis"]["risk_profile"]["overall_risk_level"], "unknown");
        assert!(body["aiAnalysis"]["error"].is_string());

        let (status, fetched) = send(&router, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["createdAt"], body["createdAt"]);
    }

    #[tokio::test]
    async fn test_regenerating_overwrites_but_keeps_created_at() {
        let router = app();
        let user_id = create_user(&router, "iris").await;
        record(&router, &user_id, "seed_phrase", false, &["revealed_seed_phrase"]).await;
        let uri = format!("/users/{user_id}/report");

        let (_, first) = send(&router, Method::POST, &uri, None, None).await;
        record(&router, &user_id, "seed_phrase", true, &[]).await;
        let (_, second) = send(&router, Method::POST, &uri, None, None).await;

        assert_eq!(first["attemptCount"], 1);
        assert_eq!(second["attemptCount"], 2);
        assert_eq!(second["createdAt"], first["createdAt"]);
    }

    #[tokio::test]
    async fn test_report_with_model_output() {
        let router = app_with(MemoryRepository::seeded(), Some(good_reply()));
        let user_id = create_user(&router, "jade").await;
        record(&router, &user_id, "fake_airdrop", false, &["signed_unlimited_approval"]).await;

        let (status, body) =
            send(&router, Method::POST, &format!("/users/{user_id}/report"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["aiAnalysis"]["risk_profile"]["overall_risk_level"], "medium");
        assert!(body["aiAnalysis"].get("error").is_none());
    }
}

// ============================================================================
// Admin
// ============================================================================

mod admin_tests {
    use super::*;

    #[tokio::test]
    async fn test_admin_routes_require_admin_token() {
        let router = app();

        let (status, body) = send(&router, Method::GET, "/admin/users", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["reason"], "token_missing");

        let (status, _) =
            send(&router, Method::GET, "/admin/users", None, Some(bearer("viewer"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let uri = format!("/admin/users/{}", UserId::new());
        let (status, _) = send(&router, Method::DELETE, &uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_lists_users_with_counts() {
        let router = app();
        let first = create_user(&router, "kim").await;
        create_user(&router, "lee").await;
        record(&router, &first, "domain_spoof", true, &[]).await;
        send(&router, Method::POST, &format!("/users/{first}/report"), None, None).await;

        let (status, body) =
            send(&router, Method::GET, "/admin/users", None, Some(bearer("admin"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["limit"], 50);

        let users = body["users"].as_array().unwrap();
        let kim = users.iter().find(|u| u["userId"] == first.as_str()).unwrap();
        assert_eq!(kim["attemptCount"], 1);
        assert_eq!(kim["hasReport"], true);
        assert_eq!(kim["username"], "kim");
    }

    #[tokio::test]
    async fn test_admin_rejects_malformed_paging() {
        let router = app();

        for uri in ["/admin/users?limit=-1", "/admin/users?offset=abc"] {
            let (status, body) = send(&router, Method::GET, uri, None, Some(bearer("admin"))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["reason"], "invalid_query");
        }
    }

    #[tokio::test]
    async fn test_admin_page_size_is_clamped() {
        let router = app();
        create_user(&router, "mo").await;

        let (_, body) = send(
            &router,
            Method::GET,
            "/admin/users?limit=1000&offset=0",
            None,
            Some(bearer("admin")),
        )
        .await;
        assert_eq!(body["limit"], 200);

        let (_, body) =
            send(&router, Method::GET, "/admin/users?limit=0", None, Some(bearer("admin"))).await;
        assert_eq!(body["limit"], 1);
        assert_eq!(body["users"].as_array().unwrap().len(), 1);

        let (_, body) =
            send(&router, Method::GET, "/admin/users?offset=5", None, Some(bearer("admin"))).await;
        assert!(body["users"].as_array().unwrap().is_empty());
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn test_admin_detail_and_cascade_delete() {
        let router = app();
        let user_id = create_user(&router, "nina").await;
        record(&router, &user_id, "fake_support", false, &["trusted_fake_support"]).await;
        send(&router, Method::POST, &format!("/users/{user_id}/report"), None, None).await;
        let uri = format!("/admin/users/{user_id}");

        let (status, body) = send(&router, Method::GET, &uri, None, Some(bearer("admin"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "nina");
        assert_eq!(body["attempts"].as_array().unwrap().len(), 1);
        assert!(body["report"].is_object());

        let (status, _) = send(&router, Method::DELETE, &uri, None, Some(bearer("admin"))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) =
            send(&router, Method::GET, &format!("/users/{user_id}/attempts"), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) =
            send(&router, Method::DELETE, &uri, None, Some(bearer("admin"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["reason"], "user_not_found");

        let (_, list) =
            send(&router, Method::GET, "/admin/users", None, Some(bearer("admin"))).await;
        assert_eq!(list["total"], 0);
    }
}
