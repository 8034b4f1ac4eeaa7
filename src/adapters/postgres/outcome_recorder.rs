//! PostgreSQL implementation of OutcomeRecorder.
//!
//! One row per completed wizard session in the `answers` table.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::outcome::OutcomeRecord;
use crate::domain::scoring::ScoringInput;
use crate::ports::OutcomeRecorder;

const CREATE_ANSWERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS answers (
        id UUID PRIMARY KEY,
        user_id BIGINT NOT NULL,
        user_input JSONB NOT NULL,
        algorithm_result TEXT NOT NULL,
        gpt_answer TEXT,
        match BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// PostgreSQL implementation of OutcomeRecorder.
#[derive(Clone)]
pub struct PostgresOutcomeRecorder {
    pool: PgPool,
}

impl PostgresOutcomeRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `answers` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(CREATE_ANSWERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to create answers table: {}", e),
                )
            })?;
        info!("answers table ready");
        Ok(())
    }
}

/// Text stored in `algorithm_result`: the label followed by the totals.
fn algorithm_result(outcome: &OutcomeRecord) -> String {
    format!("{} ({})", outcome.recommendation, outcome.totals)
}

#[async_trait]
impl OutcomeRecorder for PostgresOutcomeRecorder {
    async fn record(&self, outcome: &OutcomeRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO answers (
                id, user_id, user_input, algorithm_result, gpt_answer, match, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(outcome.id.as_uuid())
        .bind(outcome.chat_id.as_i64())
        .bind(Json::<&ScoringInput>(&outcome.input))
        .bind(algorithm_result(outcome))
        .bind(outcome.advisor_answer.as_deref())
        .bind(outcome.agreement)
        .bind(outcome.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert answer: {}", e),
            )
        })?;

        debug!(record_id = %outcome.id, chat_id = %outcome.chat_id, "outcome recorded");
        Ok(())
    }
}
