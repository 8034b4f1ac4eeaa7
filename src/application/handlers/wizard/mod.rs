//! Wizard handlers: the chat-driven questionnaire.
//!
//! `controller` owns the flow; `render` turns session state into the
//! messages and buttons the user sees.

mod controller;
pub mod render;

pub use controller::{SessionSnapshot, WizardController};
pub use render::{Button, OutgoingMessage, Reply, ReplyOutcome};
