//! Wizard step state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The phase a wizard session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Idle,
    SelectingCriteria,
    AssigningPriorities,
    ResolvingSpecialValues,
    ConfirmingOverride,
    SelectingOverrideTarget,
    EditingOverrideWeight,
    Computing,
}

impl WizardStep {
    /// True while the user is expected to press buttons.
    pub fn is_active(&self) -> bool {
        !matches!(self, WizardStep::Idle | WizardStep::Computing)
    }
}

impl StateMachine for WizardStep {
    fn valid_transitions(&self) -> Vec<Self> {
        use WizardStep::*;
        match self {
            Idle => vec![SelectingCriteria],
            SelectingCriteria => vec![AssigningPriorities],
            AssigningPriorities => vec![ResolvingSpecialValues, ConfirmingOverride],
            ResolvingSpecialValues => vec![ConfirmingOverride],
            ConfirmingOverride => vec![SelectingOverrideTarget, Computing],
            SelectingOverrideTarget => vec![EditingOverrideWeight, Computing],
            EditingOverrideWeight => vec![SelectingOverrideTarget],
            Computing => vec![Idle],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use WizardStep::*;

    #[test]
    fn happy_path_transitions_are_valid() {
        let path = [
            Idle,
            SelectingCriteria,
            AssigningPriorities,
            ResolvingSpecialValues,
            ConfirmingOverride,
            SelectingOverrideTarget,
            EditingOverrideWeight,
            SelectingOverrideTarget,
            Computing,
            Idle,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(&pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn priorities_may_skip_special_values() {
        assert!(AssigningPriorities.can_transition_to(&ConfirmingOverride));
    }

    #[test]
    fn cannot_jump_from_selection_to_computing() {
        assert!(SelectingCriteria.transition_to(Computing).is_err());
    }

    #[test]
    fn editing_only_returns_to_target_list() {
        assert_eq!(EditingOverrideWeight.valid_transitions(), vec![SelectingOverrideTarget]);
    }

    #[test]
    fn no_step_is_terminal() {
        for step in [
            Idle,
            SelectingCriteria,
            AssigningPriorities,
            ResolvingSpecialValues,
            ConfirmingOverride,
            SelectingOverrideTarget,
            EditingOverrideWeight,
            Computing,
        ] {
            assert!(!step.is_terminal());
        }
    }

    #[test]
    fn idle_and_computing_are_not_active() {
        assert!(!Idle.is_active());
        assert!(!Computing.is_active());
        assert!(SelectingCriteria.is_active());
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&EditingOverrideWeight).unwrap(),
            "\"editing_override_weight\""
        );
    }
}
