//! Scenario, error-type and skill catalog
//!
//! Bilingual labels for every code the trainer records. Lookups never fail:
//! an unknown code keeps itself as its English label and gets a generic
//! Chinese label, so Chinese text never shows a Latin code.

/// A bilingual label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub zh: &'static str,
    pub en: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ScenarioEntry {
    pub code: &'static str,
    pub label: Label,
    /// Skill dimension the scenario exercises
    pub skill: &'static str,
    pub display_order: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct CodeEntry {
    pub code: &'static str,
    pub label: Label,
}

pub const SKILLS: &[CodeEntry] = &[
    CodeEntry {
        code: "url_inspection",
        label: Label { zh: "网址辨识", en: "URL inspection" },
    },
    CodeEntry {
        code: "transaction_review",
        label: Label { zh: "交易审查", en: "Transaction review" },
    },
    CodeEntry {
        code: "secret_protection",
        label: Label { zh: "密钥保护", en: "Secret protection" },
    },
    CodeEntry {
        code: "social_engineering_resistance",
        label: Label { zh: "防范社会工程", en: "Social engineering resistance" },
    },
];

/// Kept in sync with the `scenarios` seed migration
pub const SCENARIOS: &[ScenarioEntry] = &[
    ScenarioEntry {
        code: "domain_spoof",
        label: Label { zh: "仿冒域名", en: "Spoofed domain" },
        skill: "url_inspection",
        display_order: 1,
    },
    ScenarioEntry {
        code: "wallet_connect",
        label: Label { zh: "恶意钱包连接", en: "Malicious wallet connection" },
        skill: "url_inspection",
        display_order: 2,
    },
    ScenarioEntry {
        code: "fake_airdrop",
        label: Label { zh: "虚假空投", en: "Fake airdrop" },
        skill: "transaction_review",
        display_order: 3,
    },
    ScenarioEntry {
        code: "malicious_approval",
        label: Label { zh: "恶意代币授权", en: "Malicious token approval" },
        skill: "transaction_review",
        display_order: 4,
    },
    ScenarioEntry {
        code: "seed_phrase",
        label: Label { zh: "助记词窃取", en: "Seed phrase harvesting" },
        skill: "secret_protection",
        display_order: 5,
    },
    ScenarioEntry {
        code: "fake_support",
        label: Label { zh: "假冒客服", en: "Fake support agent" },
        skill: "social_engineering_resistance",
        display_order: 6,
    },
];

pub const ERROR_TYPES: &[CodeEntry] = &[
    CodeEntry {
        code: "clicked_malicious_link",
        label: Label { zh: "点击了恶意链接", en: "Clicked a malicious link" },
    },
    CodeEntry {
        code: "ignored_domain_mismatch",
        label: Label { zh: "忽略了域名差异", en: "Ignored a domain mismatch" },
    },
    CodeEntry {
        code: "signed_unlimited_approval",
        label: Label { zh: "签署了无限额度授权", en: "Signed an unlimited approval" },
    },
    CodeEntry {
        code: "signed_blind_transaction",
        label: Label { zh: "盲签了交易", en: "Signed a transaction without reading it" },
    },
    CodeEntry {
        code: "revealed_seed_phrase",
        label: Label { zh: "泄露了助记词", en: "Revealed the seed phrase" },
    },
    CodeEntry {
        code: "trusted_fake_support",
        label: Label { zh: "轻信了假客服", en: "Trusted a fake support agent" },
    },
    CodeEntry {
        code: "timeout",
        label: Label { zh: "超时未作出判断", en: "Ran out of time" },
    },
];

const UNKNOWN_SCENARIO_ZH: &str = "其他场景";
const UNKNOWN_ERROR_ZH: &str = "其他错误";
const UNKNOWN_SKILL_ZH: &str = "其他能力";

pub fn scenario(code: &str) -> Option<&'static ScenarioEntry> {
    SCENARIOS.iter().find(|s| s.code == code)
}

/// Skill exercised by a scenario, `None` for unknown scenarios
pub fn scenario_skill(code: &str) -> Option<&'static str> {
    scenario(code).map(|s| s.skill)
}

pub fn is_known_error_type(code: &str) -> bool {
    ERROR_TYPES.iter().any(|e| e.code == code)
}

/// Display position of a scenario; unknown codes sort last
pub fn scenario_order(code: &str) -> i32 {
    scenario(code).map_or(i32::MAX, |s| s.display_order)
}

pub fn scenario_label(code: &str) -> (&'static str, String) {
    match scenario(code) {
        Some(entry) => (entry.label.zh, entry.label.en.to_string()),
        None => (UNKNOWN_SCENARIO_ZH, code.to_string()),
    }
}

pub fn error_label(code: &str) -> (&'static str, String) {
    lookup(ERROR_TYPES, code, UNKNOWN_ERROR_ZH)
}

pub fn skill_label(code: &str) -> (&'static str, String) {
    lookup(SKILLS, code, UNKNOWN_SKILL_ZH)
}

fn lookup(entries: &[CodeEntry], code: &str, unknown_zh: &'static str) -> (&'static str, String) {
    match entries.iter().find(|e| e.code == code) {
        Some(entry) => (entry.label.zh, entry.label.en.to_string()),
        None => (unknown_zh, code.to_string()),
    }
}

/// Every code the catalog knows, across all three tables
pub fn all_codes() -> impl Iterator<Item = &'static str> {
    SCENARIOS
        .iter()
        .map(|s| s.code)
        .chain(ERROR_TYPES.iter().map(|e| e.code))
        .chain(SKILLS.iter().map(|s| s.code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scenario_skill_is_catalogued() {
        for entry in SCENARIOS {
            assert!(SKILLS.iter().any(|s| s.code == entry.skill), "{}", entry.code);
        }
    }

    #[test]
    fn test_display_order_is_unique() {
        let mut orders: Vec<_> = SCENARIOS.iter().map(|s| s.display_order).collect();
        orders.sort_unstable();
        orders.dedup();
        assert_eq!(orders.len(), SCENARIOS.len());
    }

    #[test]
    fn test_unknown_codes_get_generic_chinese_label() {
        assert_eq!(scenario_label("nft_mint"), ("其他场景", "nft_mint".to_string()));
        assert_eq!(error_label("typo_squat"), ("其他错误", "typo_squat".to_string()));
        assert_eq!(skill_label("x"), ("其他能力", "x".to_string()));
        assert_eq!(scenario_order("nft_mint"), i32::MAX);
    }

    #[test]
    fn test_known_lookups() {
        assert_eq!(scenario_label("fake_airdrop").0, "虚假空投");
        assert_eq!(scenario_skill("seed_phrase"), Some("secret_protection"));
        assert!(is_known_error_type("timeout"));
        assert!(!is_known_error_type("Timeout"));
    }

    #[test]
    fn test_chinese_labels_have_no_latin() {
        let labels = SCENARIOS
            .iter()
            .map(|s| s.label.zh)
            .chain(ERROR_TYPES.iter().map(|e| e.label.zh))
            .chain(SKILLS.iter().map(|s| s.label.zh));
        for zh in labels {
            assert!(!zh.chars().any(|c| c.is_ascii_alphanumeric()), "{zh}");
        }
    }
}
