//! HTTP routes for the recommendation endpoint.

use std::sync::Arc;

use axum::{routing::post, Router};

use super::handlers::recommend;
use crate::application::handlers::recommend::ComputeRecommendationHandler;

/// Creates the recommendation router, mounted at `/api/recommend`.
pub fn recommend_routes(handler: Arc<ComputeRecommendationHandler>) -> Router {
    Router::new().route("/", post(recommend)).with_state(handler)
}
