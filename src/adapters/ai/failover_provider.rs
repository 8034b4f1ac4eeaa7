//! Failover AI Provider - wrapper that falls back to a secondary provider.
//!
//! When the primary provider fails with a transient error (rate limit,
//! unavailable, network, timeout) the request is replayed once against the
//! fallback, if one is configured.
//!
//! # Example
//!
//! ```ignore
//! let primary = YandexGptProvider::new(yandex_config);
//! let fallback = OpenAIProvider::new(openai_config);
//!
//! let provider = FailoverAIProvider::new(Arc::new(primary))
//!     .with_fallback(Arc::new(fallback));
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// AI provider wrapper with optional failover.
pub struct FailoverAIProvider {
    primary: Arc<dyn AIProvider>,
    fallback: Option<Arc<dyn AIProvider>>,
}

impl FailoverAIProvider {
    /// Creates a wrapper with only a primary provider.
    pub fn new(primary: Arc<dyn AIProvider>) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Adds a fallback provider.
    pub fn with_fallback(mut self, fallback: Arc<dyn AIProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

#[async_trait]
impl AIProvider for FailoverAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let err = match self.primary.complete(request.clone()).await {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };

        let fallback = match self.fallback {
            Some(ref fallback) if err.is_retryable() => fallback,
            _ => return Err(err),
        };

        warn!(
            trace_id = %request.metadata.trace_id,
            primary = %self.primary.provider_info().name,
            fallback = %fallback.provider_info().name,
            reason = %err,
            "primary AI provider failed, using fallback"
        );

        let response = fallback.complete(request).await?;
        info!(model = %response.model, "fallback AI provider answered");
        Ok(response)
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}
