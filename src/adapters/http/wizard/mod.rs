//! HTTP adapter for the chat wizard.
//!
//! A chat front-end (bot bridge, web widget) forwards each user message
//! and button press here and renders the returned messages.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ButtonResponse, CallbackRequest, MessageRequest, MessageResponse, ReplyResponse,
    SessionViewResponse,
};
pub use routes::wizard_routes;
