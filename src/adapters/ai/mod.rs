//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for tests and offline runs
//! - `OpenAIProvider` - OpenAI-compatible chat completions
//! - `YandexGptProvider` - Yandex Cloud foundation models
//! - `FailoverAIProvider` - Wrapper with failover to a secondary provider
//!
//! `build_provider_chain` assembles them from `AiConfig`.

mod factory;
mod failover_provider;
mod mock_provider;
mod openai_provider;
mod yandex_provider;

pub use factory::{build_provider, build_provider_chain};
pub use failover_provider::FailoverAIProvider;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
pub use yandex_provider::{YandexGptConfig, YandexGptProvider};
