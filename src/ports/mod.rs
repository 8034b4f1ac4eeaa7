//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Language-model completions for the advisor
//! - `SessionStore` - Per-chat wizard session registry
//! - `OutcomeRecorder` - Durable record of completed sessions

mod ai_provider;
mod outcome_recorder;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use outcome_recorder::OutcomeRecorder;
pub use session_store::SessionStore;
