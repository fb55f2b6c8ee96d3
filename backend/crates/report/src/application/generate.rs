//! Report generation with retry and fallback

use std::sync::Arc;
use std::time::Duration;

use crate::application::prompt::build_prompt;
use crate::domain::analysis::AiAnalysis;
use crate::domain::generator::TextGenerator;
use crate::domain::stats::ReportStats;
use crate::error::{GenerationError, GenerationResult};

/// Linear backoff on rate limiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total calls, including the first
    pub max_attempts: u32,
    /// Sleep after call `n` is `base_delay * n`
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(6),
        }
    }
}

impl RetryPolicy {
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Turns statistics into an [`AiAnalysis`], never failing.
pub struct ReportGenerator<G>
where
    G: TextGenerator + Sync,
{
    generator: Arc<G>,
    retry: RetryPolicy,
}

impl<G> Clone for ReportGenerator<G>
where
    G: TextGenerator + Sync,
{
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            retry: self.retry,
        }
    }
}

impl<G> ReportGenerator<G>
where
    G: TextGenerator + Sync,
{
    pub fn new(generator: Arc<G>) -> Self {
        Self {
            generator,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Generate an analysis, or the fallback with the failure recorded.
    pub async fn generate(&self, stats: &ReportStats) -> AiAnalysis {
        match self.try_generate(stats).await {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::warn!(error = %err, "AI analysis failed, using fallback");
                AiAnalysis::fallback(err.to_string())
            }
        }
    }

    async fn try_generate(&self, stats: &ReportStats) -> GenerationResult<AiAnalysis> {
        if !self.generator.is_configured() {
            return Err(GenerationError::MissingCredentials);
        }

        let prompt = build_prompt(stats);
        let raw = self.call_with_retry(&prompt).await?;
        parse_analysis(&raw)
    }

    async fn call_with_retry(&self, prompt: &str) -> GenerationResult<String> {
        let mut attempt = 1;
        loop {
            match self.generator.generate_text(prompt).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_after(attempt);
                    tracing::info!(
                        attempt,
                        delay_secs = delay.as_secs(),
                        "LLM rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::debug!(attempt, error = %err, "LLM call failed");
                    return Err(err);
                }
            }
        }
    }
}

/// Remove a surrounding markdown code fence, with or without a language tag.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the info string (`json`) on the opening line
    match body.split_once('\n') {
        Some((info, inner)) if !info.trim().contains(['{', '[']) => inner.trim(),
        _ => body.trim(),
    }
}

/// Parse and validate raw model output.
pub fn parse_analysis(raw: &str) -> GenerationResult<AiAnalysis> {
    let json = strip_code_fence(raw);
    if json.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let mut analysis: AiAnalysis =
        serde_json::from_str(json).map_err(|e| GenerationError::Parse(e.to_string()))?;

    // the field is reserved for the fallback
    analysis.error = None;

    analysis
        .check_language_purity()
        .map_err(GenerationError::LanguageMix)?;

    Ok(analysis)
}
