//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the advisor domain.

mod errors;
mod ids;
mod priority;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ChatId, RecordId};
pub use priority::Priority;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
