//! HTTP adapter for one-shot recommendations.

mod dto;
mod handlers;
mod routes;

pub use dto::{CriterionDetailResponse, RecommendRequest, RecommendResponse};
pub use routes::recommend_routes;
