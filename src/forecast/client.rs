use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::{ForecastSource, GenerationError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Chat-completions client for OpenAI or any compatible server
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenerationError> {
        Self::with_timeout(api_key, Duration::from_secs(120)) // generation can be slow
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
        })
    }

    /// Point the client at another API root (e.g. a local server)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Send one user message and return the first choice's content
    pub async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, GenerationError> {
        let req = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens,
            temperature: self.temperature,
        };

        debug!(model = %self.model, max_tokens, "Requesting completion");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let res: ChatCompletionResponse = response.json().await?;
        let content = res
            .first_content()
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyCompletion)?;

        info!(chars = content.chars().count(), "Forecast generated");
        Ok(content)
    }
}

#[async_trait]
impl ForecastSource for OpenAiClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, GenerationError> {
        self.complete(prompt, max_tokens).await
    }
}
