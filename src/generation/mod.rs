//! Chat completion backends for answer generation.

mod openai;

pub use openai::OpenAIGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for answer generation.
///
/// The assembled prompt is sent as a single instruction; the model's text
/// comes back verbatim. This is the only non-deterministic seam in the
/// pipeline, which is also why it sits behind a trait: tests mock it.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
