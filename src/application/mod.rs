//! Application layer - services and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers own a use case each; `advisor` and `sweeper` are the services
//! they share.

pub mod advisor;
pub mod handlers;
pub mod sweeper;

pub use advisor::{AdvisorError, AdvisorOpinion, AdvisorService, AdvisorSettings};
pub use handlers::{
    ComputeRecommendationCommand, ComputeRecommendationHandler, ComputeRecommendationResult,
    OutgoingMessage, Reply, ReplyOutcome, SessionSnapshot, WizardController,
};
pub use sweeper::{SessionSweeper, SessionSweeperConfig};
