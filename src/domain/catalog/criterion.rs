//! Criterion definitions and special (qualitative) scales.

use serde::{Deserialize, Serialize};

use super::ScoreTriple;

/// One selectable answer on a special scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialOption {
    pub label: String,
    #[serde(default)]
    pub hint: String,
    pub scores: ScoreTriple,
}

impl SpecialOption {
    pub fn new(label: impl Into<String>, hint: impl Into<String>, scores: ScoreTriple) -> Self {
        Self {
            label: label.into(),
            hint: hint.into(),
            scores,
        }
    }
}

/// Enumerated qualitative values for a special criterion.
///
/// `key` is the short callback prefix (`sdata`, `susage`) so button
/// payloads stay small; options are addressed by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialScale {
    pub key: String,
    pub prompt: String,
    pub options: Vec<SpecialOption>,
}

impl SpecialScale {
    pub fn option(&self, index: usize) -> Option<&SpecialOption> {
        self.options.get(index)
    }

    /// Maps a qualitative value to its score triple, ignoring case.
    pub fn scores_for(&self, value: &str) -> Option<ScoreTriple> {
        let wanted = value.trim().to_lowercase();
        self.options
            .iter()
            .find(|o| o.label.to_lowercase() == wanted)
            .map(|o| o.scores)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.label.as_str())
    }
}

/// A decision criterion with baseline scores per deployment option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub category: String,
    pub base_scores: ScoreTriple,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialScale>,
}

impl Criterion {
    /// Creates a regular criterion scored from its baseline.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        base_scores: ScoreTriple,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            base_scores,
            description: description.into(),
            special: None,
        }
    }

    /// Attaches a qualitative scale, making the criterion special.
    pub fn with_special(mut self, scale: SpecialScale) -> Self {
        self.special = Some(scale);
        self
    }

    pub fn is_special(&self) -> bool {
        self.special.is_some()
    }
}
