//! Criterion catalog module.
//!
//! - `scores` - Deployment options and score triples
//! - `criterion` - Criterion and special scale definitions
//! - `criterion_catalog` - Validated, indexed collection of criteria

mod criterion;
mod criterion_catalog;
mod scores;

pub use criterion::{Criterion, SpecialOption, SpecialScale};
pub use criterion_catalog::{CatalogError, CriterionCatalog, RESERVED_SCALE_KEYS};
pub use scores::{DeploymentOption, ScoreTriple};
