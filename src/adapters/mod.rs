//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Language-model providers (YandexGPT, OpenAI-compatible, mock)
//! - `storage` - In-memory session store and outcome recorder
//! - `postgres` - Durable outcome recorder
//! - `http` - axum REST transport

pub mod ai;
pub mod http;
pub mod postgres;
pub mod storage;

pub use storage::{InMemoryOutcomeRecorder, InMemorySessionStore};
