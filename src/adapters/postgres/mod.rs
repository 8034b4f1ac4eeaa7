//! PostgreSQL adapters - Database implementations for persistence ports.
//!
//! - `PostgresOutcomeRecorder` - Writes completed sessions to `answers`
//! - `connect` - Builds the shared pool from `DatabaseConfig`

mod outcome_recorder;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

pub use outcome_recorder::PostgresOutcomeRecorder;

/// Opens a connection pool sized and timed from config.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let options = config
        .connect_options()
        .map_err(|e| DomainError::new(ErrorCode::ValidationFailed, e.to_string()))?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect_with(options)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to connect to database: {}", e),
            )
        })
}
