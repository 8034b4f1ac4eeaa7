//! Top-level router: mounts every endpoint and applies the shared layers.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::catalog::catalog_routes;
use super::health::{health_routes, HealthState};
use super::recommend::recommend_routes;
use super::wizard::wizard_routes;
use crate::application::handlers::recommend::ComputeRecommendationHandler;
use crate::application::handlers::wizard::WizardController;
use crate::config::ServerConfig;
use crate::domain::catalog::CriterionCatalog;
use crate::ports::SessionStore;

/// Everything the endpoints need, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<WizardController>,
    pub recommend: Arc<ComputeRecommendationHandler>,
    pub catalog: Arc<CriterionCatalog>,
    pub sessions: Arc<dyn SessionStore>,
    /// Provider name reported by `/health`.
    pub ai_provider: String,
}

/// Builds the application router.
///
/// # Routes
/// - `GET /health`
/// - `GET /api/catalog`
/// - `POST /api/recommend`
/// - `GET /api/wizard/:chat_id`
/// - `POST /api/wizard/:chat_id/messages`
/// - `POST /api/wizard/:chat_id/callbacks`
pub fn api_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(health_routes(HealthState::new(
            state.sessions.clone(),
            state.ai_provider.clone(),
        )))
        .nest("/api/catalog", catalog_routes(state.catalog.clone()))
        .nest("/api/recommend", recommend_routes(state.recommend.clone()))
        .nest("/api/wizard", wizard_routes(state.controller.clone()))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

/// Any origin when none are configured, else exactly the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(allowed)
}
