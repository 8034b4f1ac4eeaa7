//! Scoring Engine - weighted-sum totals and the resulting recommendation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::warn;

use super::ScoringInput;
use crate::domain::catalog::{CriterionCatalog, DeploymentOption, ScoreTriple};
use crate::domain::foundation::Priority;

/// Label prefix for an undecided result.
pub const NEEDS_EVALUATION_LABEL: &str = "Требуется дополнительная оценка";

/// Hard failures: the input names criteria the catalog cannot score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Unknown criterion '{0}'")]
    UnknownCriterion(String),

    #[error("Criterion '{0}' is selected more than once")]
    DuplicateCriterion(String),

    #[error("Scores for '{0}' overflow the totals")]
    Overflow(String),
}

/// Where a criterion's effective scores came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreSource {
    Baseline,
    Special { value: String },
    /// A special criterion whose value was missing or unmapped.
    Neutral,
    Override,
}

impl ScoreSource {
    /// Short machine name.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreSource::Baseline => "baseline",
            ScoreSource::Special { .. } => "special",
            ScoreSource::Neutral => "neutral",
            ScoreSource::Override => "override",
        }
    }
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreSource::Baseline => write!(f, "базовый"),
            ScoreSource::Special { value } => write!(f, "специальный ({})", value),
            ScoreSource::Neutral => write!(f, "нейтральный"),
            ScoreSource::Override => write!(f, "переопределенный"),
        }
    }
}

/// Data-quality problems recovered with a documented default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringAnomaly {
    MissingPriority { criterion: String },
    MissingSpecialValue { criterion: String },
    UnknownSpecialValue { criterion: String, value: String },
}

impl fmt::Display for ScoringAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringAnomaly::MissingPriority { criterion } => {
                write!(f, "no priority for '{}', using 1", criterion)
            }
            ScoringAnomaly::MissingSpecialValue { criterion } => {
                write!(f, "no special value for '{}', using neutral scores", criterion)
            }
            ScoringAnomaly::UnknownSpecialValue { criterion, value } => write!(
                f,
                "unknown value '{}' for '{}', using neutral scores",
                value, criterion
            ),
        }
    }
}

/// The contribution of one criterion to the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionBreakdown {
    pub name: String,
    pub priority: Priority,
    pub scores: ScoreTriple,
    pub weighted: ScoreTriple,
    pub source: ScoreSource,
}

/// The algorithm's verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "options", rename_all = "snake_case")]
pub enum Recommendation {
    /// One option has the strictly greatest total.
    Clear(DeploymentOption),
    /// Every option sharing the maximum total, in fixed order.
    NeedsEvaluation(Vec<DeploymentOption>),
}

impl Recommendation {
    pub fn winner(&self) -> Option<DeploymentOption> {
        match self {
            Recommendation::Clear(option) => Some(*option),
            Recommendation::NeedsEvaluation(_) => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Recommendation::NeedsEvaluation(_))
    }

    /// Persisted and displayed label, e.g. `Требуется дополнительная оценка (On-Premise/Public Cloud)`.
    pub fn label(&self) -> String {
        match self {
            Recommendation::Clear(option) => option.label().to_string(),
            Recommendation::NeedsEvaluation(options) => format!(
                "{} ({})",
                NEEDS_EVALUATION_LABEL,
                options.iter().map(|o| o.label()).collect::<Vec<_>>().join("/")
            ),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Full result of a scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub totals: ScoreTriple,
    pub recommendation: Recommendation,
    pub breakdown: Vec<CriterionBreakdown>,
    pub anomalies: Vec<ScoringAnomaly>,
}

/// Weighted-sum scoring over the catalog.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores a set of answers.
    ///
    /// # Algorithm
    /// For each selected criterion: effective = override, else special
    /// mapping, else baseline; totals += effective × priority, checked for overflow.
    ///
    /// # Edge Cases
    /// - Missing priority: treated as 1 (anomaly)
    /// - Special value missing or unmapped: neutral 5/5/5 (anomaly)
    /// - Ties at the maximum, including empty input: `NeedsEvaluation`
    ///
    /// # Errors
    /// - `UnknownCriterion` if a selected name is not in the catalog
    /// - `DuplicateCriterion` if a name is selected twice
    /// - `Overflow` if a weighted score or a running total leaves `i32`
    pub fn score(
        catalog: &CriterionCatalog,
        input: &ScoringInput,
    ) -> Result<ScoreReport, ScoringError> {
        let mut totals = ScoreTriple::default();
        let mut breakdown = Vec::with_capacity(input.selected_criteria.len());
        let mut anomalies = Vec::new();
        let mut seen = HashSet::new();

        for name in &input.selected_criteria {
            if !seen.insert(name.as_str()) {
                return Err(ScoringError::DuplicateCriterion(name.clone()));
            }
            let criterion = catalog
                .get(name)
                .ok_or_else(|| ScoringError::UnknownCriterion(name.clone()))?;

            let priority = match input.criteria_priorities.get(name) {
                Some(p) => *p,
                None => {
                    anomalies.push(ScoringAnomaly::MissingPriority {
                        criterion: name.clone(),
                    });
                    Priority::FALLBACK
                }
            };

            let (scores, source) = if let Some(overridden) = input.overridden_scores.get(name) {
                (*overridden, ScoreSource::Override)
            } else if let Some(scale) = &criterion.special {
                match input.special_values.get(name) {
                    Some(value) => match scale.scores_for(value) {
                        Some(mapped) => (
                            mapped,
                            ScoreSource::Special {
                                value: value.clone(),
                            },
                        ),
                        None => {
                            anomalies.push(ScoringAnomaly::UnknownSpecialValue {
                                criterion: name.clone(),
                                value: value.clone(),
                            });
                            (ScoreTriple::neutral(), ScoreSource::Neutral)
                        }
                    },
                    None => {
                        anomalies.push(ScoringAnomaly::MissingSpecialValue {
                            criterion: name.clone(),
                        });
                        (ScoreTriple::neutral(), ScoreSource::Neutral)
                    }
                }
            } else {
                (criterion.base_scores, ScoreSource::Baseline)
            };

            let weighted = scores
                .checked_weighted(priority.multiplier())
                .ok_or_else(|| ScoringError::Overflow(name.clone()))?;
            totals = totals
                .checked_add(weighted)
                .ok_or_else(|| ScoringError::Overflow(name.clone()))?;
            breakdown.push(CriterionBreakdown {
                name: name.clone(),
                priority,
                scores,
                weighted,
                source,
            });
        }

        for anomaly in &anomalies {
            warn!(anomaly = %anomaly, "Scoring input anomaly");
        }

        Ok(ScoreReport {
            totals,
            recommendation: Self::recommend(&totals),
            breakdown,
            anomalies,
        })
    }

    /// Picks the strict maximum, or every option tied at the maximum.
    pub fn recommend(totals: &ScoreTriple) -> Recommendation {
        let max = DeploymentOption::ALL
            .iter()
            .map(|o| totals.get(*o))
            .max()
            .unwrap_or_default();

        let leaders: Vec<DeploymentOption> = DeploymentOption::ALL
            .iter()
            .copied()
            .filter(|o| totals.get(*o) == max)
            .collect();

        match leaders.as_slice() {
            [single] => Recommendation::Clear(*single),
            _ => Recommendation::NeedsEvaluation(leaders),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(value: u8) -> Priority {
        Priority::new(value).unwrap()
    }

    fn catalog() -> &'static CriterionCatalog {
        CriterionCatalog::builtin()
    }

    #[test]
    fn jurisdiction_at_five_recommends_on_premise() {
        let input = ScoringInput::new().select("Юрисдикция данных", p(5));
        let report = ScoringEngine::score(catalog(), &input).unwrap();

        assert_eq!(report.totals, ScoreTriple::new(40, 25, 20));
        assert_eq!(report.recommendation, Recommendation::Clear(DeploymentOption::OnPremise));
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn small_data_volume_recommends_public_cloud() {
        let input = ScoringInput::new()
            .select("Объём данных", p(1))
            .with_special("Объём данных", "Малый");
        let report = ScoringEngine::score(catalog(), &input).unwrap();

        assert_eq!(report.totals, ScoreTriple::new(8, 7, 9));
        assert_eq!(report.recommendation.winner(), Some(DeploymentOption::PublicCloud));
        assert_eq!(
            report.breakdown[0].source,
            ScoreSource::Special {
                value: "Малый".to_string()
            }
        );
    }

    #[test]
    fn override_beats_special_value() {
        let input = ScoringInput::new()
            .select("Объём данных", p(3))
            .with_special("Объём данных", "Большой")
            .with_override("Объём данных", ScoreTriple::new(5, 5, 5));
        let report = ScoringEngine::score(catalog(), &input).unwrap();

        assert_eq!(report.totals, ScoreTriple::new(15, 15, 15));
        assert_eq!(report.breakdown[0].source, ScoreSource::Override);
    }

    #[test]
    fn override_beats_baseline() {
        let input = ScoringInput::new()
            .select("Латентность", p(2))
            .with_override("Латентность", ScoreTriple::new(1, 2, 10));
        let report = ScoringEngine::score(catalog(), &input).unwrap();

        assert_eq!(report.totals, ScoreTriple::new(2, 4, 20));
        assert_eq!(report.breakdown[0].scores, ScoreTriple::new(1, 2, 10));
        assert_eq!(report.breakdown[0].weighted, ScoreTriple::new(2, 4, 20));
    }

    #[test]
    fn equal_totals_need_evaluation_of_all_three() {
        let input = ScoringInput::new()
            .select("Латентность", p(1))
            .with_override("Латентность", ScoreTriple::new(5, 5, 5));
        let report = ScoringEngine::score(catalog(), &input).unwrap();

        assert_eq!(
            report.recommendation,
            Recommendation::NeedsEvaluation(DeploymentOption::ALL.to_vec())
        );
        assert_eq!(
            report.recommendation.label(),
            "Требуется дополнительная оценка (On-Premise/Private Cloud/Public Cloud)"
        );
    }

    #[test]
    fn empty_input_is_three_way_tie() {
        let report = ScoringEngine::score(catalog(), &ScoringInput::new()).unwrap();
        assert_eq!(report.totals, ScoreTriple::default());
        assert!(report.recommendation.is_tie());
        assert_eq!(report.recommendation.winner(), None);
    }

    #[test]
    fn two_way_tie_names_only_leaders() {
        // Время до запуска is 8/9/9
        let input = ScoringInput::new().select("Время до запуска", p(2));
        let report = ScoringEngine::score(catalog(), &input).unwrap();

        assert_eq!(
            report.recommendation,
            Recommendation::NeedsEvaluation(vec![
                DeploymentOption::PrivateCloud,
                DeploymentOption::PublicCloud
            ])
        );
    }

    #[test]
    fn missing_priority_defaults_to_one() {
        let mut input = ScoringInput::new().select("Латентность", p(4));
        input.criteria_priorities.clear();
        let report = ScoringEngine::score(catalog(), &input).unwrap();

        assert_eq!(report.totals, ScoreTriple::new(8, 6, 5));
        assert_eq!(
            report.anomalies,
            vec![ScoringAnomaly::MissingPriority {
                criterion: "Латентность".to_string()
            }]
        );
    }

    #[test]
    fn unknown_special_value_scores_neutral() {
        let input = ScoringInput::new()
            .select("Срок использования", p(2))
            .with_special("Срок использования", "Вечный");
        let report = ScoringEngine::score(catalog(), &input).unwrap();

        assert_eq!(report.totals, ScoreTriple::new(10, 10, 10));
        assert_eq!(report.breakdown[0].source, ScoreSource::Neutral);
        assert!(matches!(
            report.anomalies[0],
            ScoringAnomaly::UnknownSpecialValue { .. }
        ));
    }

    #[test]
    fn missing_special_value_scores_neutral() {
        let input = ScoringInput::new().select("Срок использования", p(1));
        let report = ScoringEngine::score(catalog(), &input).unwrap();

        assert_eq!(report.totals, ScoreTriple::neutral());
        assert!(matches!(
            report.anomalies[0],
            ScoringAnomaly::MissingSpecialValue { .. }
        ));
    }

    #[test]
    fn unknown_criterion_is_an_error() {
        let input = ScoringInput::new().select("Фантом", p(3));
        assert_eq!(
            ScoringEngine::score(catalog(), &input).unwrap_err(),
            ScoringError::UnknownCriterion("Фантом".to_string())
        );
    }

    #[test]
    fn duplicate_criterion_is_an_error() {
        let input = ScoringInput::new()
            .select("Латентность", p(3))
            .select("Латентность", p(3));
        assert!(matches!(
            ScoringEngine::score(catalog(), &input),
            Err(ScoringError::DuplicateCriterion(_))
        ));
    }

    #[test]
    fn huge_override_is_an_overflow_error() {
        let input = ScoringInput::new()
            .select("Латентность", p(5))
            .with_override("Латентность", ScoreTriple::new(1_000_000_000, 1, 1));
        assert_eq!(
            ScoringEngine::score(catalog(), &input).unwrap_err(),
            ScoringError::Overflow("Латентность".to_string())
        );
    }

    #[test]
    fn overflowing_sum_is_an_overflow_error() {
        let input = ScoringInput::new()
            .select("Латентность", p(1))
            .with_override("Латентность", ScoreTriple::new(i32::MAX, 1, 1))
            .select("Масштабируемость", p(1));
        assert_eq!(
            ScoringEngine::score(catalog(), &input).unwrap_err(),
            ScoringError::Overflow("Масштабируемость".to_string())
        );
    }

    fn arb_input() -> impl Strategy<Value = ScoringInput> {
        let names: Vec<String> = catalog().criteria().iter().map(|c| c.name.clone()).collect();
        let count = names.len();
        (
            Just(names).prop_shuffle(),
            prop::collection::vec(1u8..=5, count),
            1..=count,
            prop::collection::vec(proptest::option::of((1i32..=10, 1i32..=10, 1i32..=10)), count),
        )
            .prop_map(|(names, priorities, take, overrides)| {
                let mut input = ScoringInput::new();
                for (i, name) in names.into_iter().take(take).enumerate() {
                    if let Some((a, b, c)) = overrides[i] {
                        input = input.with_override(name.clone(), ScoreTriple::new(a, b, c));
                    }
                    input = input.select(name, Priority::new(priorities[i]).unwrap());
                }
                input
                    .with_special("Объём данных", "Средний")
                    .with_special("Срок использования", "Долгосрочный")
            })
    }

    proptest! {
        #[test]
        fn scoring_is_order_independent(input in arb_input(), seed in any::<u64>()) {
            let mut permuted = input.clone();
            let len = permuted.selected_criteria.len();
            permuted.selected_criteria.rotate_left((seed as usize) % len);
            permuted.selected_criteria.reverse();

            let a = ScoringEngine::score(catalog(), &input).unwrap();
            let b = ScoringEngine::score(catalog(), &permuted).unwrap();
            prop_assert_eq!(a.totals, b.totals);
            prop_assert_eq!(a.recommendation, b.recommendation);
        }

        #[test]
        fn single_baseline_criterion_scales_by_priority(index in 0usize..12, priority in 1u8..=5) {
            let criterion = &catalog().criteria()[index];
            prop_assume!(!criterion.is_special());

            let input = ScoringInput::new().select(criterion.name.clone(), Priority::new(priority).unwrap());
            let report = ScoringEngine::score(catalog(), &input).unwrap();
            prop_assert_eq!(Some(report.totals), criterion.base_scores.checked_weighted(priority as i32));
        }

        #[test]
        fn neutral_override_contributes_fifteen_each_at_priority_three(index in 0usize..12) {
            let name = catalog().criteria()[index].name.clone();
            let input = ScoringInput::new()
                .select(name.clone(), Priority::new(3).unwrap())
                .with_special(name.clone(), "Большой")
                .with_override(name, ScoreTriple::new(5, 5, 5));
            let report = ScoringEngine::score(catalog(), &input).unwrap();
            prop_assert_eq!(report.totals, ScoreTriple::new(15, 15, 15));
        }
    }
}
