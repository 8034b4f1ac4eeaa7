//! HTTP handlers for the recommendation endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::recommend::{
    ComputeRecommendationCommand, ComputeRecommendationHandler,
};
use crate::domain::foundation::ErrorCode;
use crate::domain::scoring::ScoringError;

use super::dto::{RecommendRequest, RecommendResponse};

/// POST /api/recommend - Score a complete set of answers
pub async fn recommend(
    State(handler): State<Arc<ComputeRecommendationHandler>>,
    Json(req): Json<RecommendRequest>,
) -> Response {
    let (input, consult_advisor) = req.into_input();
    let cmd = ComputeRecommendationCommand {
        input,
        consult_advisor,
    };

    match handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(RecommendResponse::from(result))).into_response(),
        Err(e) => handle_scoring_error(e),
    }
}

fn handle_scoring_error(error: ScoringError) -> Response {
    let code = match error {
        ScoringError::UnknownCriterion(_) => ErrorCode::CriterionNotFound,
        ScoringError::DuplicateCriterion(_) => ErrorCode::ValidationFailed,
        ScoringError::Overflow(_) => ErrorCode::OutOfRange,
    };
    ErrorResponse::new(code, error.to_string()).into_response_with(StatusCode::BAD_REQUEST)
}
