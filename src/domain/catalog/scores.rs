//! Deployment options and per-option score triples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three deployment models the advisor chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeploymentOption {
    #[serde(rename = "On-Premise")]
    OnPremise,
    #[serde(rename = "Private Cloud")]
    PrivateCloud,
    #[serde(rename = "Public Cloud")]
    PublicCloud,
}

impl DeploymentOption {
    /// All options in their fixed presentation order.
    pub const ALL: [DeploymentOption; 3] = [
        DeploymentOption::OnPremise,
        DeploymentOption::PrivateCloud,
        DeploymentOption::PublicCloud,
    ];

    /// Human-readable label, also used in advisor prompts.
    pub fn label(&self) -> &'static str {
        match self {
            DeploymentOption::OnPremise => "On-Premise",
            DeploymentOption::PrivateCloud => "Private Cloud",
            DeploymentOption::PublicCloud => "Public Cloud",
        }
    }

    /// Lowercase phrases that identify this option in free text.
    ///
    /// Longer phrases come first so "private cloud" wins over "private".
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            DeploymentOption::OnPremise => &["on-premise", "on premise", "on-prem", "onpremise"],
            DeploymentOption::PrivateCloud => &["private cloud", "private"],
            DeploymentOption::PublicCloud => &["public cloud", "public"],
        }
    }

    /// Position in `ALL`; doubles as the override sub-step index.
    pub fn index(&self) -> usize {
        match self {
            DeploymentOption::OnPremise => 0,
            DeploymentOption::PrivateCloud => 1,
            DeploymentOption::PublicCloud => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The option after this one, or None for the last.
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }
}

impl fmt::Display for DeploymentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One integer score per deployment option.
///
/// Baseline values are conventionally 0..=10; overrides are restricted to
/// 1..=10 by the wizard. Nothing here enforces a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScoreTriple {
    pub on_prem: i32,
    pub private: i32,
    pub public: i32,
}

impl ScoreTriple {
    pub const fn new(on_prem: i32, private: i32, public: i32) -> Self {
        Self {
            on_prem,
            private,
            public,
        }
    }

    /// Equal scores for every option, used when a qualitative value cannot be mapped.
    pub const fn neutral() -> Self {
        Self::new(5, 5, 5)
    }

    /// Each score multiplied by `factor`; `None` if any product leaves `i32`.
    pub fn checked_weighted(&self, factor: i32) -> Option<Self> {
        Some(Self::new(
            self.on_prem.checked_mul(factor)?,
            self.private.checked_mul(factor)?,
            self.public.checked_mul(factor)?,
        ))
    }

    /// Component-wise sum; `None` on overflow.
    pub fn checked_add(&self, rhs: Self) -> Option<Self> {
        Some(Self::new(
            self.on_prem.checked_add(rhs.on_prem)?,
            self.private.checked_add(rhs.private)?,
            self.public.checked_add(rhs.public)?,
        ))
    }

    pub fn get(&self, option: DeploymentOption) -> i32 {
        match option {
            DeploymentOption::OnPremise => self.on_prem,
            DeploymentOption::PrivateCloud => self.private,
            DeploymentOption::PublicCloud => self.public,
        }
    }

    pub fn set(&mut self, option: DeploymentOption, value: i32) {
        match option {
            DeploymentOption::OnPremise => self.on_prem = value,
            DeploymentOption::PrivateCloud => self.private = value,
            DeploymentOption::PublicCloud => self.public = value,
        }
    }
}

impl fmt::Display for ScoreTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OnPrem={}, Private={}, Public={}",
            self.on_prem, self.private, self.public
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_multiplies_each_component() {
        let scores = ScoreTriple::new(8, 5, 4).checked_weighted(5);
        assert_eq!(scores, Some(ScoreTriple::new(40, 25, 20)));
    }

    #[test]
    fn weighted_reports_overflow() {
        assert_eq!(ScoreTriple::new(1, i32::MAX, 1).checked_weighted(2), None);
        assert_eq!(ScoreTriple::new(-1, -1, i32::MIN).checked_weighted(5), None);
    }

    #[test]
    fn get_and_set_address_the_matching_component() {
        let mut scores = ScoreTriple::default();
        scores.set(DeploymentOption::PrivateCloud, 7);
        assert_eq!(scores.get(DeploymentOption::PrivateCloud), 7);
        assert_eq!(scores.get(DeploymentOption::OnPremise), 0);
    }

    #[test]
    fn checked_add_accumulates() {
        let totals = ScoreTriple::default()
            .checked_add(ScoreTriple::new(1, 2, 3))
            .and_then(|t| t.checked_add(ScoreTriple::new(1, 2, 3)));
        assert_eq!(totals, Some(ScoreTriple::new(2, 4, 6)));
        assert_eq!(ScoreTriple::new(0, 0, i32::MAX).checked_add(ScoreTriple::new(0, 0, 1)), None);
    }

    #[test]
    fn option_next_walks_in_fixed_order() {
        assert_eq!(DeploymentOption::OnPremise.next(), Some(DeploymentOption::PrivateCloud));
        assert_eq!(DeploymentOption::PrivateCloud.next(), Some(DeploymentOption::PublicCloud));
        assert_eq!(DeploymentOption::PublicCloud.next(), None);
    }

    #[test]
    fn option_serializes_as_label() {
        let json = serde_json::to_string(&DeploymentOption::PublicCloud).unwrap();
        assert_eq!(json, "\"Public Cloud\"");
    }

    #[test]
    fn score_triple_uses_short_field_names() {
        let json = serde_json::to_value(ScoreTriple::new(1, 2, 3)).unwrap();
        assert_eq!(json["on_prem"], 1);
        assert_eq!(json["private"], 2);
        assert_eq!(json["public"], 3);
    }
}
