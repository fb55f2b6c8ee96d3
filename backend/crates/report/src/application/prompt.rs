//! Prompt construction

use std::fmt::{self, Write};

use crate::domain::catalog;
use crate::domain::stats::ReportStats;

const RESPONSE_SHAPE: &str = r#"{
  "summary_zh": "string",
  "summary_en": "string",
  "recommendations_zh": ["string", "..."],
  "recommendations_en": ["string", "..."],
  "risk_profile": {
    "overall_risk_level": "low | medium | high",
    "strongest_area_zh": "string",
    "strongest_area_en": "string",
    "weakest_area_zh": "string",
    "weakest_area_en": "string"
  }
}"#;

/// Build the LLM prompt for one player's statistics.
///
/// Every code is replaced by its bilingual label so the model has no
/// reason to echo codes back.
pub fn build_prompt(stats: &ReportStats) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(
        "You are a Web3 security coach. A player has finished a phishing awareness \
         training game. Analyse the results below and write a short, encouraging, \
         bilingual (Simplified Chinese and English) report.\n\n",
    );

    if let Err(e) = write_sections(&mut prompt, stats) {
        tracing::warn!(error = %e, "Prompt formatting failed");
    }

    prompt
}

fn write_sections(out: &mut impl Write, stats: &ReportStats) -> fmt::Result {
    writeln!(out, "## Overall")?;
    writeln!(out, "- Attempts: {}", stats.attempt_count)?;
    writeln!(out, "- Successful attempts: {}", stats.success_count)?;
    writeln!(out, "- Success rate: {:.0}%", stats.success_rate * 100.0)?;
    writeln!(out, "- Total time: {:.1} s", seconds(stats.total_duration_ms))?;
    writeln!(
        out,
        "- Average time per attempt: {:.1} s",
        seconds(stats.average_duration_ms)
    )?;

    writeln!(out, "\n## Scenarios")?;
    for scenario in &stats.scenarios {
        let (zh, en) = catalog::scenario_label(&scenario.scenario_code);
        let best = scenario
            .best_duration_ms
            .map_or_else(|| "none".to_string(), |ms| format!("{:.1} s", seconds(ms)));
        writeln!(
            out,
            "- {zh} / {en}: {} of {} succeeded, best successful time {best}",
            scenario.successes, scenario.attempts
        )?;
    }

    writeln!(out, "\n## Mistakes")?;
    if stats.error_distribution.is_empty() {
        writeln!(out, "- none recorded")?;
    }
    for (code, count) in &stats.error_distribution {
        let (zh, en) = catalog::error_label(code);
        writeln!(out, "- {zh} / {en}: {count} time(s)")?;
    }

    writeln!(out, "\n## Skill scores (0-100)")?;
    for (code, score) in &stats.skill_scores {
        let (zh, en) = catalog::skill_label(code);
        writeln!(out, "- {zh} / {en}: {score}")?;
    }

    writeln!(out, "\n## Output rules")?;
    writeln!(
        out,
        "- Reply with JSON only, no markdown, exactly this shape:\n{RESPONSE_SHAPE}"
    )?;
    writeln!(out, "- Fields ending in _zh are written only in Simplified Chinese.")?;
    writeln!(
        out,
        "- Fields ending in _en are written only in English, with no Chinese characters."
    )?;
    writeln!(
        out,
        "- Refer to scenarios, mistakes and skills by the labels above, never by identifiers \
         containing underscores."
    )?;
    writeln!(out, "- Give 3 to 5 recommendations in each language.")
}

fn seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stats::{AttemptSample, aggregate};

    #[test]
    fn test_prompt_uses_labels_not_codes() {
        let stats = aggregate(&[
            AttemptSample {
                scenario_code: "fake_airdrop".into(),
                success: false,
                duration_ms: 4200,
                error_codes: vec!["signed_unlimited_approval".into()],
            },
            AttemptSample {
                scenario_code: "seed_phrase".into(),
                success: true,
                duration_ms: 1500,
                error_codes: vec![],
            },
        ]);

        let prompt = build_prompt(&stats);

        assert!(prompt.contains("虚假空投 / Fake airdrop: 0 of 1 succeeded"));
        assert!(prompt.contains("签署了无限额度授权 / Signed an unlimited approval: 1 time(s)"));
        assert!(prompt.contains("密钥保护 / Secret protection: 100"));
        assert!(prompt.contains("Success rate: 50%"));
        assert!(prompt.contains("\"overall_risk_level\""));
        assert!(!prompt.contains("fake_airdrop"));
        assert!(!prompt.contains("signed_unlimited_approval"));
    }

    #[test]
    fn test_prompt_with_unknown_codes() {
        let stats = aggregate(&[AttemptSample {
            scenario_code: "nft_mint".into(),
            success: true,
            duration_ms: 1000,
            error_codes: vec![],
        }]);

        let prompt = build_prompt(&stats);
        assert!(prompt.contains("其他场景 / nft_mint"));
        assert!(prompt.contains("none recorded"));
    }
}
