mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use crate::forecast::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::orchestrator::BotSettings;
use crate::publisher::Visibility;
use crate::segmenter::SegmenterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the config file
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Mastodon account the forecasts are posted to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MastodonConfig {
    pub base_url: String,
    pub access_token: String,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

/// Text generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub mastodon: MastodonConfig,
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    #[serde(default = "default_post_interval_secs")]
    pub post_interval_secs: u64,
    /// Append logs here instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Flat layout used by the first versions of the bot
#[derive(Debug, Deserialize)]
struct LegacyConfig {
    mastodon_access_token: String,
    mastodon_base_url: String,
    openai_api_key: String,
    openai_prompt: String,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    #[serde(default = "default_temperature")]
    temperature: f32,
}

impl From<LegacyConfig> for Config {
    fn from(legacy: LegacyConfig) -> Self {
        Self {
            mastodon: MastodonConfig {
                base_url: legacy.mastodon_base_url,
                access_token: legacy.mastodon_access_token,
                visibility: None,
            },
            openai: OpenAiConfig {
                api_key: legacy.openai_api_key,
                prompt: legacy.openai_prompt,
                model: default_model(),
                max_tokens: legacy.max_tokens,
                temperature: legacy.temperature,
                base_url: default_base_url(),
                timeout_secs: default_timeout_secs(),
            },
            segmenter: SegmenterConfig::default(),
            post_interval_secs: default_post_interval_secs(),
            log_file: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_post_interval_secs() -> u64 {
    2 * 60 * 60
}

impl Config {
    /// Read and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse either layout, then validate
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;

        let config = if value.get("mastodon_access_token").is_some() {
            let legacy: LegacyConfig = serde_json::from_value(value)?;
            Config::from(legacy)
        } else {
            serde_json::from_value(value)?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("mastodon.base_url", &self.mastodon.base_url),
            ("mastodon.access_token", &self.mastodon.access_token),
            ("openai.api_key", &self.openai.api_key),
            ("openai.prompt", &self.openai.prompt),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("{name} must not be empty")));
        }

        if self.post_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "post_interval_secs must be positive".to_string(),
            ));
        }

        if self.openai.max_tokens == 0 {
            return Err(ConfigError::Invalid(
                "openai.max_tokens must be positive".to_string(),
            ));
        }

        self.segmenter
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn post_interval(&self) -> Duration {
        Duration::from_secs(self.post_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.openai.timeout_secs)
    }

    pub fn bot_settings(&self) -> BotSettings {
        BotSettings {
            prompt: self.openai.prompt.clone(),
            max_tokens: self.openai.max_tokens,
            post_interval: self.post_interval(),
        }
    }
}
