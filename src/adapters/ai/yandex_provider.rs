//! YandexGPT Provider - Implementation of AIProvider for Yandex Cloud Foundation Models.
//!
//! Uses the synchronous text-generation endpoint
//! (`/foundationModels/v1/completion`) with API-key authentication.
//! Models are addressed by URI: `gpt://<folder-id>/<model>/<version>`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

/// Configuration for the YandexGPT provider.
#[derive(Debug, Clone)]
pub struct YandexGptConfig {
    api_key: Secret<String>,
    /// Cloud folder the model is billed to.
    pub folder_id: String,
    /// Model name (e.g., "yandexgpt", "yandexgpt-32k", "yandexgpt-lite").
    pub model: String,
    /// Model version segment of the URI.
    pub model_version: String,
    /// Base URL (default: https://llm.api.cloud.yandex.net).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl YandexGptConfig {
    /// Creates a new configuration for a folder.
    pub fn new(api_key: impl Into<String>, folder_id: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            folder_id: folder_id.into(),
            model: "yandexgpt-32k".to_string(),
            model_version: "latest".to_string(),
            base_url: "https://llm.api.cloud.yandex.net".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = version.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Fully qualified model URI.
    pub fn model_uri(&self) -> String {
        format!(
            "gpt://{}/{}/{}",
            self.folder_id, self.model, self.model_version
        )
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// YandexGPT provider implementation.
pub struct YandexGptProvider {
    config: YandexGptConfig,
    client: Client,
}

impl YandexGptProvider {
    pub fn new(config: YandexGptConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "falling back to default HTTP client");
                Client::new()
            });

        Self { config, client }
    }

    fn completion_url(&self) -> String {
        format!(
            "{}/foundationModels/v1/completion",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn to_yandex_request(&self, request: &CompletionRequest) -> YandexRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(YandexMessage {
                role: "system".to_string(),
                text: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(YandexMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                text: msg.content.clone(),
            });
        }

        YandexRequest {
            model_uri: self.config.model_uri(),
            completion_options: CompletionOptions {
                stream: false,
                temperature: request.temperature,
                // The API takes token limits as decimal strings.
                max_tokens: request.max_tokens.map(|n| n.to_string()),
            },
            messages,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = self.to_yandex_request(request);

        self.client
            .post(self.completion_url())
            .header("Authorization", format!("Api-Key {}", self.config.api_key()))
            .header("x-folder-id", &self.config.folder_id)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(5)),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = Self::handle_response_status(response).await?;

        let body: YandexResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        completion_from(body, &self.config.model)
    }
}

fn completion_from(body: YandexResponse, model: &str) -> Result<CompletionResponse, AIError> {
    let alternative = body
        .result
        .alternatives
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No alternatives in response"))?;

    let finish_reason = match alternative.status.as_deref() {
        Some("ALTERNATIVE_STATUS_CONTENT_FILTER") => {
            return Err(AIError::content_filtered("completion withheld by provider"))
        }
        Some("ALTERNATIVE_STATUS_TRUNCATED_FINAL") => FinishReason::Length,
        _ => FinishReason::Stop,
    };

    let usage = body
        .result
        .usage
        .map(|u| {
            TokenUsage::new(
                u.input_text_tokens.parse().unwrap_or(0),
                u.completion_tokens.parse().unwrap_or(0),
            )
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        content: alternative.message.text,
        usage,
        model: body
            .result
            .model_version
            .map(|v| format!("{}/{}", model, v))
            .unwrap_or_else(|| model.to_string()),
        finish_reason,
    })
}

#[async_trait]
impl AIProvider for YandexGptProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut last_error = AIError::network("No attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            let attempt = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match attempt {
                Ok(completion) => {
                    debug!(
                        trace_id = %request.metadata.trace_id,
                        total_tokens = completion.usage.total_tokens,
                        "yandexgpt completion received"
                    );
                    return Ok(completion);
                }
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    warn!(
                        trace_id = %request.metadata.trace_id,
                        attempt = retry_count + 1,
                        error = %err,
                        "yandexgpt request failed, retrying"
                    );
                    last_error = err;
                }
            }

            sleep(Duration::from_secs(1 << retry_count)).await;
            retry_count += 1;
        }

        Err(last_error)
    }

    fn provider_info(&self) -> ProviderInfo {
        let max_context = if self.config.model.ends_with("32k") {
            32_768
        } else {
            8_192
        };
        ProviderInfo::new("yandexgpt", &self.config.model, max_context)
    }
}

// ----- YandexGPT API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct YandexRequest {
    model_uri: String,
    completion_options: CompletionOptions,
    messages: Vec<YandexMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionOptions {
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct YandexMessage {
    role: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct YandexResponse {
    result: YandexResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YandexResult {
    alternatives: Vec<YandexAlternative>,
    usage: Option<YandexUsage>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YandexAlternative {
    message: YandexMessage,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YandexUsage {
    input_text_tokens: String,
    completion_tokens: String,
}
