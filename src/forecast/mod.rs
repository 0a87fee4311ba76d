mod client;
mod error;
mod types;

#[cfg(test)]
mod tests;

pub use client::{OpenAiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::GenerationError;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

use async_trait::async_trait;

/// Something that turns a prompt into forecast text
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Generate text for `prompt`, capped at `max_tokens` completion tokens
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError>;
}
