//! AI Report Generation
//!
//! Clean Architecture structure:
//! - `domain/` - catalog, statistics, analysis shape, text generator trait
//! - `application/` - prompt construction, generation with retry and fallback
//! - `infra/` - Gemini `generateContent` client
//!
//! ## Guarantees
//! - [`ReportGenerator::generate`] never fails; every failure becomes the
//!   fallback analysis with `overall_risk_level = "unknown"`
//! - Chinese fields never carry catalog codes, English fields never carry
//!   CJK text

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

pub use application::generate::{ReportGenerator, RetryPolicy};
pub use application::prompt::build_prompt;
pub use domain::analysis::{AiAnalysis, RiskLevel, RiskProfile};
pub use domain::catalog;
pub use domain::generator::{LocalTextGenerator, TextGenerator};
pub use domain::stats::{AttemptSample, ReportStats, ScenarioBreakdown, aggregate};
pub use error::GenerationError;
pub use infra::gemini::{GeminiClient, GeminiConfig};
