//! State machine trait for step enums.
//!
//! Gives every finite-state enum the same vocabulary: which targets are
//! reachable from the current state, and a checked `transition_to` that
//! refuses anything else.

use super::{DomainError, ErrorCode};

/// Trait for enums that represent state machines.
///
/// Implementors define valid transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for WizardStep {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Idle => vec![SelectingCriteria],
///             SelectingCriteria => vec![AssigningPriorities],
///             // ... etc
///         }
///     }
/// }
///
/// let next = step.transition_to(WizardStep::AssigningPriorities)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
