//! Outcome Recorder Port - durable sink for completed sessions.
//!
//! Write-only: the advisor never reads its history back.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::outcome::OutcomeRecord;

/// Port for persisting outcome records.
#[async_trait]
pub trait OutcomeRecorder: Send + Sync {
    /// Persists one record.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the record could not be written
    async fn record(&self, outcome: &OutcomeRecord) -> Result<(), DomainError>;
}
