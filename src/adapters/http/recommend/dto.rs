//! HTTP DTOs for the recommendation endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::application::handlers::recommend::ComputeRecommendationResult;
use crate::domain::catalog::ScoreTriple;
use crate::domain::foundation::Priority;
use crate::domain::scoring::{CriterionBreakdown, Recommendation, ScoreSource, ScoringInput};

/// A complete set of answers.
///
/// Priorities outside 1..=5 fail deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    pub selected_criteria: Vec<String>,
    #[serde(default)]
    pub criteria_priorities: HashMap<String, Priority>,
    #[serde(default)]
    pub overridden_scores: HashMap<String, ScoreTriple>,
    #[serde(default)]
    pub special_values: HashMap<String, String>,
    #[serde(default)]
    pub consult_advisor: bool,
}

impl RecommendRequest {
    pub fn into_input(self) -> (ScoringInput, bool) {
        let input = ScoringInput {
            selected_criteria: self.selected_criteria,
            criteria_priorities: self.criteria_priorities,
            overridden_scores: self.overridden_scores,
            special_values: self.special_values,
        };
        (input, self.consult_advisor)
    }
}

/// One criterion's contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionDetailResponse {
    pub criterion: String,
    pub priority: u8,
    /// `baseline`, `special`, `neutral` or `override`.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_value: Option<String>,
    pub scores: ScoreTriple,
    pub weighted: ScoreTriple,
}

impl From<CriterionBreakdown> for CriterionDetailResponse {
    fn from(line: CriterionBreakdown) -> Self {
        let special_value = match &line.source {
            ScoreSource::Special { value } => Some(value.clone()),
            _ => None,
        };
        Self {
            criterion: line.name,
            priority: line.priority.value(),
            source: line.source.kind().to_string(),
            special_value,
            scores: line.scores,
            weighted: line.weighted,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub on_prem_total: i32,
    pub private_total: i32,
    pub public_total: i32,
    /// Winning option label, or the needs-evaluation label naming the tie.
    pub recommendation: String,
    /// Options tied at the maximum; empty for a clear winner.
    #[serde(default)]
    pub tied_options: Vec<String>,
    pub details: Vec<CriterionDetailResponse>,
    #[serde(default)]
    pub anomalies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_agreement: Option<bool>,
}

impl From<ComputeRecommendationResult> for RecommendResponse {
    fn from(result: ComputeRecommendationResult) -> Self {
        let report = result.report;
        let tied_options = match &report.recommendation {
            Recommendation::Clear(_) => Vec::new(),
            Recommendation::NeedsEvaluation(options) => {
                options.iter().map(|o| o.label().to_string()).collect()
            }
        };
        let (ai_analysis, ai_agreement) = match result.advisor {
            Some(opinion) => (Some(opinion.answer), Some(opinion.agreement)),
            None => (None, None),
        };

        Self {
            on_prem_total: report.totals.on_prem,
            private_total: report.totals.private,
            public_total: report.totals.public,
            recommendation: report.recommendation.label(),
            tied_options,
            details: report.breakdown.into_iter().map(Into::into).collect(),
            anomalies: report.anomalies.iter().map(ToString::to_string).collect(),
            ai_analysis,
            ai_agreement,
        }
    }
}
