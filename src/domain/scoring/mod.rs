//! Scoring module - pure weighted-sum recommendation.
//!
//! No I/O. Given the catalog and a `ScoringInput`, produces totals, a
//! recommendation, an auditable per-criterion breakdown and the list of
//! recovered data-quality anomalies.

mod engine;
mod input;

pub use engine::{
    CriterionBreakdown, Recommendation, ScoreReport, ScoreSource, ScoringAnomaly, ScoringEngine,
    ScoringError, NEEDS_EVALUATION_LABEL,
};
pub use input::ScoringInput;
