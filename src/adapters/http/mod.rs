//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers and routes;
//! `router` mounts them all behind the shared layers.

pub mod catalog;
pub mod error;
pub mod health;
pub mod recommend;
pub mod router;
pub mod wizard;

pub use error::ErrorResponse;
pub use router::{api_router, AppState};
