//! Storage Adapters
//!
//! In-process implementations of the session and outcome ports.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Wizard sessions keyed by chat
//! - **InMemoryOutcomeRecorder** - Outcome records kept in a vector (no database configured, tests)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryOutcomeRecorder, InMemorySessionStore};
//!
//! let sessions = Arc::new(InMemorySessionStore::new());
//! let outcomes = Arc::new(InMemoryOutcomeRecorder::new());
//! ```

mod in_memory_outcome_recorder;
mod in_memory_session_store;

pub use in_memory_outcome_recorder::InMemoryOutcomeRecorder;
pub use in_memory_session_store::InMemorySessionStore;
