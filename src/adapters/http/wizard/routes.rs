//! HTTP routes for wizard endpoints.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_session, post_callback, post_message};
use crate::application::handlers::wizard::WizardController;

/// Creates the wizard router, mounted at `/api/wizard`.
///
/// # Routes
/// - `GET /:chat_id` - Current session view
/// - `POST /:chat_id/messages` - Free-text input
/// - `POST /:chat_id/callbacks` - Button press
pub fn wizard_routes(controller: Arc<WizardController>) -> Router {
    Router::new()
        .route("/:chat_id", get(get_session))
        .route("/:chat_id/messages", post(post_message))
        .route("/:chat_id/callbacks", post(post_callback))
        .with_state(controller)
}
