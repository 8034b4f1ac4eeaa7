//! Session Store Port - Interface for the per-chat wizard session registry.
//!
//! Sessions are short-lived: created by `/start`, mutated by one action at
//! a time, and removed as soon as a result is produced. Abandoned sessions
//! are reclaimed by `evict_idle`.

use async_trait::async_trait;

use crate::domain::foundation::{ChatId, DomainError, Timestamp};
use crate::domain::wizard::WizardSession;

/// Port for storing wizard sessions keyed by chat.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for a chat, if one exists.
    async fn load(&self, chat_id: ChatId) -> Result<Option<WizardSession>, DomainError>;

    /// Inserts or replaces the session for its chat.
    async fn save(&self, session: &WizardSession) -> Result<(), DomainError>;

    /// Removes the session for a chat. Removing a missing session is not an error.
    async fn remove(&self, chat_id: ChatId) -> Result<(), DomainError>;

    /// Removes every session last updated before `cutoff`; returns how many.
    async fn evict_idle(&self, cutoff: Timestamp) -> Result<usize, DomainError>;

    /// Number of sessions currently held.
    async fn count(&self) -> Result<usize, DomainError>;
}
