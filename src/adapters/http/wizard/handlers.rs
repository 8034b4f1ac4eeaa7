//! HTTP handlers for wizard endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::wizard::WizardController;
use crate::domain::foundation::ChatId;
use crate::domain::wizard::WizardError;

use super::dto::{CallbackRequest, MessageRequest, ReplyResponse, SessionViewResponse};

/// POST /api/wizard/:chat_id/messages - Free-text input
pub async fn post_message(
    State(controller): State<Arc<WizardController>>,
    Path(chat_id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Response {
    let chat_id = match parse_chat_id(&chat_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match controller.handle_message(chat_id, &req.text).await {
        Ok(reply) => (StatusCode::OK, Json(ReplyResponse::from(reply))).into_response(),
        Err(e) => handle_wizard_error(chat_id, e),
    }
}

/// POST /api/wizard/:chat_id/callbacks - Button press
pub async fn post_callback(
    State(controller): State<Arc<WizardController>>,
    Path(chat_id): Path<String>,
    Json(req): Json<CallbackRequest>,
) -> Response {
    let chat_id = match parse_chat_id(&chat_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match controller.handle_callback(chat_id, &req.data).await {
        Ok(reply) => (StatusCode::OK, Json(ReplyResponse::from(reply))).into_response(),
        Err(e) => handle_wizard_error(chat_id, e),
    }
}

/// GET /api/wizard/:chat_id - Current session view
pub async fn get_session(
    State(controller): State<Arc<WizardController>>,
    Path(chat_id): Path<String>,
) -> Response {
    let chat_id = match parse_chat_id(&chat_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match controller.view(chat_id).await {
        Ok(Some(snapshot)) => {
            (StatusCode::OK, Json(SessionViewResponse::from(snapshot))).into_response()
        }
        Ok(None) => handle_wizard_error(chat_id, WizardError::NoSession),
        Err(e) => handle_wizard_error(chat_id, e),
    }
}

fn parse_chat_id(raw: &str) -> Result<ChatId, Response> {
    raw.parse::<ChatId>().map_err(|_| {
        ErrorResponse::bad_request(format!("Invalid chat id: {}", raw))
            .into_response_with(StatusCode::BAD_REQUEST)
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// User-level failures never get here; the controller answers them with
/// a corrective reply.
fn handle_wizard_error(chat_id: ChatId, error: WizardError) -> Response {
    match error {
        WizardError::NoSession => ErrorResponse::not_found("Wizard session", &chat_id.to_string())
            .into_response_with(StatusCode::NOT_FOUND),
        other => {
            error!(chat_id = %chat_id, error = %other, "wizard request failed");
            ErrorResponse::new(other.code(), other.to_string())
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_session_maps_to_404() {
        let response = handle_wizard_error(ChatId::new(1), WizardError::NoSession);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let response = handle_wizard_error(ChatId::new(1), WizardError::Storage("down".into()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_numeric_chat_id_is_rejected() {
        let response = parse_chat_id("abc").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_chat_id("-42").unwrap(), ChatId::new(-42));
    }
}
