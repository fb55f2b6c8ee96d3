//! Attempt aggregation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::catalog;

/// The parts of an attempt the report needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSample {
    pub scenario_code: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBreakdown {
    pub scenario_code: String,
    pub attempts: u32,
    pub successes: u32,
    pub total_duration_ms: u64,
    /// Fastest successful attempt
    pub best_duration_ms: Option<u64>,
}

/// One user's aggregated statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    pub attempt_count: u32,
    pub success_count: u32,
    /// 0.0..=1.0
    pub success_rate: f64,
    pub total_duration_ms: u64,
    pub average_duration_ms: u64,
    /// In catalog display order
    pub scenarios: Vec<ScenarioBreakdown>,
    /// Error-type code -> occurrences
    pub error_distribution: BTreeMap<String, u32>,
    /// Skill code -> 0..=100; skills without attempts are absent
    pub skill_scores: BTreeMap<String, u8>,
}

impl ReportStats {
    pub fn is_empty(&self) -> bool {
        self.attempt_count == 0
    }
}

pub fn aggregate(attempts: &[AttemptSample]) -> ReportStats {
    let mut by_scenario: BTreeMap<&str, ScenarioBreakdown> = BTreeMap::new();
    let mut error_distribution = BTreeMap::new();
    let mut per_skill: BTreeMap<&'static str, (u32, u32)> = BTreeMap::new();

    let mut success_count = 0u32;
    let mut total_duration_ms = 0u64;

    for attempt in attempts {
        total_duration_ms = total_duration_ms.saturating_add(attempt.duration_ms);
        if attempt.success {
            success_count += 1;
        }

        let entry = by_scenario
            .entry(attempt.scenario_code.as_str())
            .or_insert_with(|| ScenarioBreakdown {
                scenario_code: attempt.scenario_code.clone(),
                attempts: 0,
                successes: 0,
                total_duration_ms: 0,
                best_duration_ms: None,
            });
        entry.attempts += 1;
        entry.total_duration_ms = entry.total_duration_ms.saturating_add(attempt.duration_ms);
        if attempt.success {
            entry.successes += 1;
            entry.best_duration_ms = Some(
                entry
                    .best_duration_ms
                    .map_or(attempt.duration_ms, |best| best.min(attempt.duration_ms)),
            );
        }

        for code in &attempt.error_codes {
            *error_distribution.entry(code.clone()).or_insert(0u32) += 1;
        }

        if let Some(skill) = catalog::scenario_skill(&attempt.scenario_code) {
            let counts = per_skill.entry(skill).or_insert((0, 0));
            counts.0 += 1;
            if attempt.success {
                counts.1 += 1;
            }
        }
    }

    let attempt_count = attempts.len() as u32;
    let (success_rate, average_duration_ms) = if attempt_count == 0 {
        (0.0, 0)
    } else {
        (
            f64::from(success_count) / f64::from(attempt_count),
            (total_duration_ms as f64 / f64::from(attempt_count)).round() as u64,
        )
    };

    let mut scenarios: Vec<_> = by_scenario.into_values().collect();
    scenarios.sort_by(|a, b| {
        catalog::scenario_order(&a.scenario_code)
            .cmp(&catalog::scenario_order(&b.scenario_code))
            .then_with(|| a.scenario_code.cmp(&b.scenario_code))
    });

    let skill_scores = per_skill
        .into_iter()
        .map(|(skill, (total, ok))| {
            let score = (f64::from(ok) * 100.0 / f64::from(total)).round() as u8;
            (skill.to_string(), score)
        })
        .collect();

    ReportStats {
        attempt_count,
        success_count,
        success_rate,
        total_duration_ms,
        average_duration_ms,
        scenarios,
        error_distribution,
        skill_scores,
    }
}
