//! Entities

use chrono::{DateTime, Utc};
use kernel::id::{AttemptId, UserId};
use report::{AiAnalysis, AttemptSample, ReportStats};

use crate::domain::value_object::{Language, UserName};

/// A player
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub language: Language,
    pub consent: bool,
    /// Index of the next scenario to play
    pub progress: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: UserName, language: Language) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            language,
            consent: true,
            progress: 0,
            created_at: Utc::now(),
        }
    }

    /// Move progress forward; never backwards
    pub fn advance_progress(&mut self, progress: i32) {
        self.progress = self.progress.max(progress);
    }
}

/// Admin listing row
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub user: User,
    pub attempt_count: i64,
    pub has_report: bool,
}

/// A training level, seeded by migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub code: String,
    pub title_zh: String,
    pub title_en: String,
    pub skill: String,
    pub display_order: i32,
}

/// One try at one scenario
#[derive(Debug, Clone)]
pub struct Attempt {
    pub attempt_id: AttemptId,
    pub user_id: UserId,
    pub scenario_code: String,
    pub success: bool,
    pub duration_ms: i64,
    pub error_codes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Attempt {
    pub fn new(
        user_id: UserId,
        scenario_code: String,
        success: bool,
        duration_ms: i64,
        error_codes: Vec<String>,
    ) -> Self {
        Self {
            attempt_id: AttemptId::new(),
            user_id,
            scenario_code,
            success,
            duration_ms,
            error_codes,
            created_at: Utc::now(),
        }
    }

    pub fn to_sample(&self) -> AttemptSample {
        AttemptSample {
            scenario_code: self.scenario_code.clone(),
            success: self.success,
            duration_ms: self.duration_ms.max(0) as u64,
            error_codes: self.error_codes.clone(),
        }
    }
}

/// The single summary report of a user
#[derive(Debug, Clone)]
pub struct FinalReport {
    pub user_id: UserId,
    pub stats: ReportStats,
    pub ai_analysis: Option<AiAnalysis>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinalReport {
    pub fn new(user_id: UserId, stats: ReportStats, ai_analysis: Option<AiAnalysis>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            stats,
            ai_analysis,
            created_at: now,
            updated_at: now,
        }
    }
}
