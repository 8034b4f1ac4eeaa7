//! Liveness endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ports::SessionStore;

#[derive(Clone)]
pub struct HealthState {
    sessions: Arc<dyn SessionStore>,
    ai_provider: String,
    started_at: Instant,
}

impl HealthState {
    pub fn new(sessions: Arc<dyn SessionStore>, ai_provider: impl Into<String>) -> Self {
        Self {
            sessions,
            ai_provider: ai_provider.into(),
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the session store does not answer.
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_sessions: Option<usize>,
    pub ai_provider: String,
}

/// GET /health
pub async fn health(State(state): State<HealthState>) -> Response {
    let active_sessions = match state.sessions.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!(error = %e, "session store unavailable for health check");
            None
        }
    };
    let status = if active_sessions.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if status == StatusCode::OK { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        active_sessions,
        ai_provider: state.ai_provider,
    };
    (status, Json(body)).into_response()
}

pub fn health_routes(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}
