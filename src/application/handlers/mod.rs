//! Application handlers.
//!
//! - `wizard` - the stateful, chat-driven questionnaire
//! - `recommend` - one-shot scoring of a complete set of answers

pub mod recommend;
pub mod wizard;

pub use recommend::{
    ComputeRecommendationCommand, ComputeRecommendationHandler, ComputeRecommendationResult,
};
pub use wizard::{OutgoingMessage, Reply, ReplyOutcome, SessionSnapshot, WizardController};
