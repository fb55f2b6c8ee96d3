//! Text generation port

use crate::error::GenerationResult;

/// A generative-text backend
#[trait_variant::make(TextGenerator: Send)]
pub trait LocalTextGenerator {
    /// Whether credentials are present; no call is made otherwise
    fn is_configured(&self) -> bool;

    /// Send one prompt and return the raw text reply
    async fn generate_text(&self, prompt: &str) -> GenerationResult<String>;
}
