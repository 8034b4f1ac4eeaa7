//! HTTP DTOs for wizard endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::handlers::wizard::{
    Button, OutgoingMessage, Reply, ReplyOutcome, SessionSnapshot,
};
use crate::domain::catalog::ScoreTriple;
use crate::domain::wizard::WizardStep;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A free-text message typed by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// A button press; `data` is the button's callback token.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackRequest {
    pub data: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonResponse {
    pub label: String,
    pub data: String,
}

impl From<Button> for ButtonResponse {
    fn from(button: Button) -> Self {
        Self {
            label: button.label,
            data: button.data,
        }
    }
}

/// One chat message; `buttons` is a keyboard of rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub text: String,
    #[serde(default)]
    pub buttons: Vec<Vec<ButtonResponse>>,
}

impl From<OutgoingMessage> for MessageResponse {
    fn from(message: OutgoingMessage) -> Self {
        Self {
            text: message.text,
            buttons: message
                .buttons
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

/// Everything to show the user in answer to one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub outcome: ReplyOutcome,
    pub messages: Vec<MessageResponse>,
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self {
            outcome: reply.outcome,
            messages: reply.messages.into_iter().map(Into::into).collect(),
        }
    }
}

/// Current state of a chat's wizard.
#[derive(Debug, Clone, Serialize)]
pub struct SessionViewResponse {
    pub chat_id: i64,
    pub step: WizardStep,
    pub selected_criteria: Vec<String>,
    pub criteria_priorities: BTreeMap<String, u8>,
    pub special_values: BTreeMap<String, String>,
    pub overridden_scores: BTreeMap<String, ScoreTriple>,
    pub started_at: String,
    pub updated_at: String,
    /// The prompt the wizard is waiting on.
    pub prompt: MessageResponse,
}

impl From<SessionSnapshot> for SessionViewResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        let session = &snapshot.session;
        let selected = session.selected();

        let criteria_priorities = selected
            .iter()
            .filter_map(|name| Some((name.clone(), session.priority_of(name)?.value())))
            .collect();
        let special_values = selected
            .iter()
            .filter_map(|name| Some((name.clone(), session.special_value_of(name)?.to_string())))
            .collect();
        let overridden_scores = selected
            .iter()
            .filter_map(|name| Some((name.clone(), session.override_of(name)?)))
            .collect();

        Self {
            chat_id: session.chat_id().as_i64(),
            step: session.step(),
            selected_criteria: selected.to_vec(),
            criteria_priorities,
            special_values,
            overridden_scores,
            started_at: session.started_at().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
            prompt: snapshot.prompt.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wizard::WizardAction;

    #[test]
    fn callback_request_deserializes() {
        let req: CallbackRequest = serde_json::from_str(r#"{"data": "crit_3"}"#).unwrap();
        assert_eq!(req.data, "crit_3");
    }

    #[test]
    fn reply_serializes_keyboard_rows() {
        let reply = Reply::new(
            ReplyOutcome::Advanced,
            vec![OutgoingMessage::with_buttons(
                "Да или нет?",
                vec![vec![Button::new("Да", &WizardAction::ConfirmOverride(true))]],
            )],
        );

        let json = serde_json::to_value(ReplyResponse::from(reply)).unwrap();

        assert_eq!(json["outcome"], "advanced");
        assert_eq!(json["messages"][0]["buttons"][0][0]["data"], "override_yes");
    }
}
