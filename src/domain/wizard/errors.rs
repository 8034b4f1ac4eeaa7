//! Wizard-specific error types.

use thiserror::Error;

use super::WizardStep;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::scoring::ScoringError;

/// Errors raised while driving a wizard session.
///
/// Most variants are user input errors: the controller rejects the action,
/// leaves the session untouched and re-renders the current prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    #[error("Action not allowed in step {actual:?} (expected {expected:?})")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    #[error("No criteria selected")]
    EmptySelection,

    #[error("No criterion at index {0}")]
    CriterionIndexOutOfRange(usize),

    #[error("Criterion '{0}' is not selected")]
    NotSelected(String),

    #[error("Priority {0} is outside 1..=5")]
    InvalidPriority(u8),

    #[error("Unknown special scale '{0}'")]
    UnknownSpecialKey(String),

    #[error("Special scale '{key}' has no option {index}")]
    SpecialOptionOutOfRange { key: String, index: usize },

    #[error("Weight {0} is outside 1..=10")]
    InvalidWeight(i32),

    #[error("Weight for step {got} arrived while editing step {expected}")]
    StaleWeightStep { expected: usize, got: usize },

    #[error("No override is being edited")]
    NoOverrideDraft,

    #[error("No active session")]
    NoSession,

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl WizardError {
    /// True for errors caused by a bad or stale user action.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            WizardError::NoSession
                | WizardError::InvalidTransition(_)
                | WizardError::Scoring(_)
                | WizardError::Storage(_)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::NoSession => ErrorCode::SessionNotFound,
            WizardError::CriterionIndexOutOfRange(_) | WizardError::UnknownSpecialKey(_) => {
                ErrorCode::CriterionNotFound
            }
            WizardError::WrongStep { .. } | WizardError::InvalidTransition(_) => {
                ErrorCode::InvalidStateTransition
            }
            WizardError::InvalidPriority(_)
            | WizardError::InvalidWeight(_)
            | WizardError::SpecialOptionOutOfRange { .. } => ErrorCode::OutOfRange,
            WizardError::UnknownAction(_) => ErrorCode::InvalidFormat,
            WizardError::Storage(_) => ErrorCode::DatabaseError,
            WizardError::Scoring(_) => ErrorCode::InternalError,
            _ => ErrorCode::ValidationFailed,
        }
    }
}

impl From<DomainError> for WizardError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => WizardError::InvalidTransition(err.message),
            _ => WizardError::Storage(err.to_string()),
        }
    }
}
