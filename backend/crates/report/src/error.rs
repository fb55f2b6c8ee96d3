//! Generation Error Types
//!
//! These never reach an HTTP response: the generator turns each one into
//! the fallback analysis and records its message.

use thiserror::Error;

pub type GenerationResult<T> = Result<T, GenerationError>;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("LLM API key is not configured")]
    MissingCredentials,

    /// HTTP 429; the only retryable failure
    #[error("LLM rate limit exceeded")]
    RateLimited,

    #[error("LLM request failed with HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("LLM request failed: {0}")]
    Transport(String),

    #[error("LLM returned no text")]
    EmptyResponse,

    #[error("LLM output is not valid report JSON: {0}")]
    Parse(String),

    #[error("LLM output mixes languages: {0}")]
    LanguageMix(String),
}

impl GenerationError {
    #[inline]
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationError::RateLimited)
    }
}
