//! In-Memory Session Store Adapter
//!
//! Keeps wizard sessions in a map guarded by an async read-write lock.
//! Sessions are lost on restart, which matches their lifetime: a wizard
//! is a few minutes of button presses.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ChatId, DomainError, Timestamp};
use crate::domain::wizard::WizardSession;
use crate::ports::SessionStore;

/// In-memory registry of wizard sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<ChatId, WizardSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, chat_id: ChatId) -> Result<Option<WizardSession>, DomainError> {
        Ok(self.sessions.read().await.get(&chat_id).cloned())
    }

    async fn save(&self, session: &WizardSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(session.chat_id(), session.clone());
        Ok(())
    }

    async fn remove(&self, chat_id: ChatId) -> Result<(), DomainError> {
        self.sessions.write().await.remove(&chat_id);
        Ok(())
    }

    async fn evict_idle(&self, cutoff: Timestamp) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.updated_at().is_before(&cutoff));
        Ok(before - sessions.len())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read().await.len())
    }
}
