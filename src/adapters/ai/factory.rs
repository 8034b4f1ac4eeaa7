//! Builds the configured provider chain.

use std::sync::Arc;

use secrecy::ExposeSecret;

use super::{
    FailoverAIProvider, MockAIProvider, OpenAIConfig, OpenAIProvider, YandexGptConfig,
    YandexGptProvider,
};
use crate::config::{AiConfig, AiProvider, ValidationError};
use crate::ports::AIProvider;

/// Builds one provider from config.
///
/// # Errors
///
/// `MissingRequired` when the provider's credentials are not configured.
pub fn build_provider(
    kind: AiProvider,
    config: &AiConfig,
) -> Result<Arc<dyn AIProvider>, ValidationError> {
    match kind {
        AiProvider::Yandex => {
            let (Some(key), Some(folder)) = (&config.yandex_api_key, &config.yandex_folder_id)
            else {
                return Err(ValidationError::MissingRequired(
                    "YANDEX_API_KEY and YANDEX_FOLDER_ID",
                ));
            };
            let yandex = YandexGptConfig::new(key.expose_secret().clone(), folder.clone())
                .with_model(config.yandex_model.clone())
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            Ok(Arc::new(YandexGptProvider::new(yandex)))
        }
        AiProvider::OpenAI => {
            let key = config
                .openai_api_key
                .as_ref()
                .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;
            let openai = OpenAIConfig::new(key.expose_secret().clone())
                .with_model(config.openai_model.clone())
                .with_base_url(config.openai_base_url.clone())
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            Ok(Arc::new(OpenAIProvider::new(openai)))
        }
        AiProvider::Mock => Ok(Arc::new(MockAIProvider::new())),
    }
}

/// Builds the primary provider, wrapped with the fallback when one is set.
pub fn build_provider_chain(config: &AiConfig) -> Result<Arc<dyn AIProvider>, ValidationError> {
    let primary = build_provider(config.primary_provider, config)?;
    match config.fallback_provider {
        Some(fallback) => {
            let fallback = build_provider(fallback, config)?;
            Ok(Arc::new(FailoverAIProvider::new(primary).with_fallback(fallback)))
        }
        None => Ok(primary),
    }
}
