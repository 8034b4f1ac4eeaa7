//! Wizard module - the button-driven questionnaire.
//!
//! - `step` - `WizardStep` state machine
//! - `action` - callback token parsing
//! - `session` - per-chat `WizardSession` aggregate
//! - `errors` - `WizardError`

mod action;
mod errors;
mod session;
mod step;

pub use action::WizardAction;
pub use errors::WizardError;
pub use session::{
    OverrideDraft, WeightOutcome, WizardSession, MAX_OVERRIDE_WEIGHT, MIN_OVERRIDE_WEIGHT,
};
pub use step::WizardStep;
