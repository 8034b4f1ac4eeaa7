//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `catalog` - Criteria, special scales and score triples
//! - `wizard` - Questionnaire session aggregate and its step machine
//! - `scoring` - Pure weighted-sum recommendation
//! - `outcome` - Persisted record of a completed session

pub mod catalog;
pub mod foundation;
pub mod outcome;
pub mod scoring;
pub mod wizard;
