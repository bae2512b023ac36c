mod gemini;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiModel;

/// Generation settings forwarded with a single prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider cannot be used at all, e.g. no credential configured.
    #[error("{0}")]
    Unavailable(String),

    /// The provider was called and the call failed.
    #[error("{0}")]
    Generation(String),
}

/// A text-completion backend: one prompt in, one completion out.
///
/// No retry, caching or rate limiting happens behind this trait.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, ModelError>;
}
