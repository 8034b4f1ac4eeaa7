//! In-Memory Outcome Recorder Adapter
//!
//! Used when no database is configured, and by tests that need to look at
//! what the controller recorded.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::{ChatId, DomainError};
use crate::domain::outcome::OutcomeRecord;
use crate::ports::OutcomeRecorder;

/// Append-only in-memory outcome log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOutcomeRecorder {
    records: Arc<RwLock<Vec<OutcomeRecord>>>,
}

impl InMemoryOutcomeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order.
    pub async fn records(&self) -> Vec<OutcomeRecord> {
        self.records.read().await.clone()
    }

    pub async fn records_for(&self, chat_id: ChatId) -> Vec<OutcomeRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.chat_id == chat_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OutcomeRecorder for InMemoryOutcomeRecorder {
    async fn record(&self, outcome: &OutcomeRecord) -> Result<(), DomainError> {
        self.records.write().await.push(outcome.clone());
        debug!(record_id = %outcome.id, chat_id = %outcome.chat_id, "outcome recorded in memory");
        Ok(())
    }
}
