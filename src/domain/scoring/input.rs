//! Scoring input: everything the user decided, keyed by criterion name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::catalog::ScoreTriple;
use crate::domain::foundation::Priority;

/// The answers collected for one recommendation.
///
/// This is also the shape persisted with each outcome and accepted by the
/// stateless recommendation endpoint. The maps are sparse: resolution
/// order is override, then special value, then baseline; a missing
/// priority counts as 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringInput {
    /// Criterion names in selection order.
    pub selected_criteria: Vec<String>,

    #[serde(default)]
    pub criteria_priorities: HashMap<String, Priority>,

    #[serde(default)]
    pub overridden_scores: HashMap<String, ScoreTriple>,

    /// Qualitative value (option label) per special criterion.
    #[serde(default)]
    pub special_values: HashMap<String, String>,
}

impl ScoringInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a criterion to the selection with the given priority.
    pub fn select(mut self, name: impl Into<String>, priority: Priority) -> Self {
        let name = name.into();
        self.criteria_priorities.insert(name.clone(), priority);
        self.selected_criteria.push(name);
        self
    }

    pub fn with_override(mut self, name: impl Into<String>, scores: ScoreTriple) -> Self {
        self.overridden_scores.insert(name.into(), scores);
        self
    }

    pub fn with_special(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.special_values.insert(name.into(), value.into());
        self
    }
}
