//! AI analysis shape, fallback and language checks

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Only produced by the fallback
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub overall_risk_level: RiskLevel,
    pub strongest_area_zh: String,
    pub strongest_area_en: String,
    pub weakest_area_zh: String,
    pub weakest_area_en: String,
}

/// Bilingual narrative attached to a final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub summary_zh: String,
    pub summary_en: String,
    pub recommendations_zh: Vec<String>,
    pub recommendations_en: Vec<String>,
    pub risk_profile: RiskProfile,
    /// Set only on the fallback, to the failure that caused it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiAnalysis {
    /// Fixed analysis returned when generation fails
    pub fn fallback(error: impl Into<String>) -> Self {
        Self {
            summary_zh: "暂时无法生成个性化分析。请根据下方的统计数据回顾各个场景中的表现。"
                .to_string(),
            summary_en: "A personalised analysis is not available right now. \
                         Review the statistics below to see how you did in each scenario."
                .to_string(),
            recommendations_zh: vec![
                "连接钱包前，逐字核对网址和域名。".to_string(),
                "签名前阅读交易内容，拒绝无限额度授权。".to_string(),
                "任何情况下都不要向他人透露助记词或私钥。".to_string(),
                "官方客服不会主动私信索要敏感信息。".to_string(),
            ],
            recommendations_en: vec![
                "Check the full URL and domain before connecting a wallet.".to_string(),
                "Read every transaction before signing and refuse unlimited approvals."
                    .to_string(),
                "Never share your seed phrase or private key with anyone.".to_string(),
                "Real support staff never message you first asking for secrets.".to_string(),
            ],
            risk_profile: RiskProfile {
                overall_risk_level: RiskLevel::Unknown,
                strongest_area_zh: "暂无数据".to_string(),
                strongest_area_en: "Not available".to_string(),
                weakest_area_zh: "暂无数据".to_string(),
                weakest_area_en: "Not available".to_string(),
            },
            error: Some(error.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }

    fn zh_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("summary_zh", self.summary_zh.as_str()),
            ("risk_profile.strongest_area_zh", self.risk_profile.strongest_area_zh.as_str()),
            ("risk_profile.weakest_area_zh", self.risk_profile.weakest_area_zh.as_str()),
        ]
        .into_iter()
        .chain(self.recommendations_zh.iter().map(|r| ("recommendations_zh", r.as_str())))
    }

    fn en_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("summary_en", self.summary_en.as_str()),
            ("risk_profile.strongest_area_en", self.risk_profile.strongest_area_en.as_str()),
            ("risk_profile.weakest_area_en", self.risk_profile.weakest_area_en.as_str()),
        ]
        .into_iter()
        .chain(self.recommendations_en.iter().map(|r| ("recommendations_en", r.as_str())))
    }

    /// Check that no field mixes languages.
    ///
    /// Returns the first offending field name.
    pub fn check_language_purity(&self) -> Result<(), String> {
        if let Some((field, _)) = self.zh_fields().find(|(_, text)| contains_code(text)) {
            return Err(format!("{field} contains a catalog code"));
        }
        if let Some((field, _)) = self.en_fields().find(|(_, text)| contains_cjk(text)) {
            return Err(format!("{field} contains CJK text"));
        }
        Ok(())
    }
}

// snake_case identifiers such as `fake_airdrop`, known or not
fn snake_code_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"[A-Za-z0-9]+(?:_[A-Za-z0-9]+)+").ok())
        .as_ref()
}

fn cjk_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"[\p{Han}\p{Hiragana}\p{Katakana}\u{3000}-\u{303F}\u{FF01}-\u{FF60}]").ok()
        })
        .as_ref()
}

/// True when Chinese text carries a Latin code
pub fn contains_code(text: &str) -> bool {
    if snake_code_pattern().is_some_and(|re| re.is_match(text)) {
        return true;
    }
    // single-word codes such as `timeout`
    text.split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .filter(|word| !word.is_empty())
        .any(|word| catalog::all_codes().any(|code| code == word))
}

pub fn contains_cjk(text: &str) -> bool {
    match cjk_pattern() {
        Some(re) => re.is_match(text),
        None => text.chars().any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c)),
    }
}
