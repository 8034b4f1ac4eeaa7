//! Stateless recommendation handlers.

mod compute_recommendation;

pub use compute_recommendation::{
    ComputeRecommendationCommand, ComputeRecommendationHandler, ComputeRecommendationResult,
};
