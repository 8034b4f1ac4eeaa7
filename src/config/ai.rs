//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Primary AI provider
    #[serde(default = "default_provider")]
    pub primary_provider: AiProvider,

    /// Fallback AI provider, tried on transient primary failures
    pub fallback_provider: Option<AiProvider>,

    /// OpenAI (or compatible gateway) API key
    pub openai_api_key: Option<Secret<String>>,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Yandex Cloud API key
    pub yandex_api_key: Option<Secret<String>>,

    /// Yandex Cloud folder the model runs in
    pub yandex_folder_id: Option<String>,

    #[serde(default = "default_yandex_model")]
    pub yandex_model: String,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Upper bound on the whole advisor consultation, retries included
    #[serde(default = "default_advisor_timeout")]
    pub advisor_timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Yandex,
    OpenAI,
    /// Canned answers, no network. For local runs and load tests.
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn advisor_timeout(&self) -> Duration {
        Duration::from_secs(self.advisor_timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Check if YandexGPT is configured
    pub fn has_yandex(&self) -> bool {
        self.yandex_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
            && self.yandex_folder_id.as_ref().is_some_and(|f| !f.is_empty())
    }

    fn check_provider(&self, provider: AiProvider) -> Result<(), ValidationError> {
        match provider {
            AiProvider::OpenAI if !self.has_openai() => {
                Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
            }
            AiProvider::Yandex if !self.has_yandex() => Err(ValidationError::MissingRequired(
                "YANDEX_API_KEY and YANDEX_FOLDER_ID",
            )),
            _ => Ok(()),
        }
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.check_provider(self.primary_provider)?;

        if let Some(fallback) = self.fallback_provider {
            if fallback == self.primary_provider {
                return Err(ValidationError::FallbackSameAsPrimary);
            }
            self.check_provider(fallback)?;
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature(self.temperature));
        }
        if self.max_tokens == 0 || self.max_tokens > 8000 {
            return Err(ValidationError::InvalidMaxTokens(self.max_tokens));
        }
        if self.timeout_secs == 0 || self.advisor_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            primary_provider: default_provider(),
            fallback_provider: None,
            openai_api_key: None,
            openai_model: default_openai_model(),
            openai_base_url: default_openai_base_url(),
            yandex_api_key: None,
            yandex_folder_id: None,
            yandex_model: default_yandex_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            advisor_timeout_secs: default_advisor_timeout(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_provider() -> AiProvider {
    AiProvider::Yandex
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_yandex_model() -> String {
    "yandexgpt-32k".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}

fn default_advisor_timeout() -> u64 {
    45
}

fn default_temperature() -> f32 {
    0.6
}

fn default_max_tokens() -> u32 {
    1500
}
