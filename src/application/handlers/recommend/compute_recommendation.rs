//! ComputeRecommendationHandler - scores a complete set of answers in one call.
//!
//! Unlike the wizard nothing is stored: the caller supplies the whole
//! `ScoringInput` and gets the report back, optionally with the advisor's
//! opinion attached.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::advisor::{AdvisorOpinion, AdvisorService};
use crate::domain::catalog::CriterionCatalog;
use crate::domain::scoring::{ScoreReport, ScoringEngine, ScoringError, ScoringInput};

/// Command to score a set of answers.
#[derive(Debug, Clone)]
pub struct ComputeRecommendationCommand {
    pub input: ScoringInput,
    pub consult_advisor: bool,
}

/// Result of a scoring run.
#[derive(Debug, Clone)]
pub struct ComputeRecommendationResult {
    pub report: ScoreReport,
    /// `None` when the advisor was not asked or did not answer.
    pub advisor: Option<AdvisorOpinion>,
}

/// Handler for stateless recommendations.
pub struct ComputeRecommendationHandler {
    catalog: Arc<CriterionCatalog>,
    advisor: Arc<AdvisorService>,
}

impl ComputeRecommendationHandler {
    pub fn new(catalog: Arc<CriterionCatalog>, advisor: Arc<AdvisorService>) -> Self {
        Self { catalog, advisor }
    }

    /// Scores the input; advisor failures only drop the opinion.
    ///
    /// # Errors
    ///
    /// `ScoringError` for unknown or duplicate criteria, or overflowing scores.
    pub async fn handle(
        &self,
        cmd: ComputeRecommendationCommand,
    ) -> Result<ComputeRecommendationResult, ScoringError> {
        let report = ScoringEngine::score(&self.catalog, &cmd.input)?;
        info!(
            criteria = cmd.input.selected_criteria.len(),
            totals = %report.totals,
            recommendation = %report.recommendation,
            "recommendation computed"
        );

        let advisor = if cmd.consult_advisor {
            match self
                .advisor
                .consult(None, &cmd.input, &report.recommendation)
                .await
            {
                Ok(opinion) => Some(opinion),
                Err(err) => {
                    warn!(error = %err, "advisor unavailable for recommendation");
                    None
                }
            }
        } else {
            None
        };

        Ok(ComputeRecommendationResult { report, advisor })
    }
}
