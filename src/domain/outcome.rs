//! Outcome record: the durable trace of one completed wizard session.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::ScoreTriple;
use crate::domain::foundation::{ChatId, RecordId, Timestamp};
use crate::domain::scoring::{ScoreReport, ScoringInput};

/// Immutable record written once per completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub id: RecordId,
    pub chat_id: ChatId,
    pub input: ScoringInput,
    pub totals: ScoreTriple,
    /// Recommendation label as shown to the user.
    pub recommendation: String,
    pub advisor_answer: Option<String>,
    /// Whether the advisor named the same option. Always false on a tie.
    pub agreement: bool,
    pub created_at: Timestamp,
}

impl OutcomeRecord {
    pub fn new(
        chat_id: ChatId,
        input: ScoringInput,
        report: &ScoreReport,
        advisor_answer: Option<String>,
        agreement: bool,
    ) -> Self {
        Self {
            id: RecordId::new(),
            chat_id,
            input,
            totals: report.totals,
            recommendation: report.recommendation.label(),
            advisor_answer,
            agreement,
            created_at: Timestamp::now(),
        }
    }
}
