//! Button callback tokens.
//!
//! Tokens are short ASCII strings split on `_`. Criteria and options are
//! addressed by index so payloads stay within transport limits:
//!
//! | Token | Action |
//! |---|---|
//! | `crit_<i>` | toggle catalog criterion `i` |
//! | `done_criteria` | finish selection |
//! | `prio_<i>_<p>` | priority `p` for criterion `i` |
//! | `<key>_<j>` | option `j` of the special scale `key` |
//! | `override_yes` / `override_no` | answer the override question |
//! | `override_select_<i>` | edit criterion `i` |
//! | `override_done` / `override_cancel` | leave the list / abandon an edit |
//! | `weight_<s>_<v>` | value `v` for sub-step `s` (0, 1, 2) |

use super::WizardError;
use crate::domain::catalog::RESERVED_SCALE_KEYS;

/// A parsed button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    ToggleCriterion(usize),
    FinishSelection,
    AssignPriority { criterion: usize, priority: u8 },
    ResolveSpecial { key: String, option: usize },
    ConfirmOverride(bool),
    SelectOverrideTarget(usize),
    FinishOverrides,
    CancelOverrideEdit,
    SetWeight { step: usize, value: i32 },
}

impl WizardAction {
    /// Parses a callback token. Only the shape is checked here; ranges are
    /// validated against the session and catalog.
    pub fn parse(token: &str) -> Result<Self, WizardError> {
        let unknown = || WizardError::UnknownAction(token.to_string());

        match token {
            "done_criteria" => return Ok(WizardAction::FinishSelection),
            "override_yes" => return Ok(WizardAction::ConfirmOverride(true)),
            "override_no" => return Ok(WizardAction::ConfirmOverride(false)),
            "override_done" => return Ok(WizardAction::FinishOverrides),
            "override_cancel" => return Ok(WizardAction::CancelOverrideEdit),
            _ => {}
        }

        if let Some(rest) = token.strip_prefix("override_select_") {
            return rest
                .parse()
                .map(WizardAction::SelectOverrideTarget)
                .map_err(|_| unknown());
        }

        let parts: Vec<&str> = token.split('_').collect();
        match parts.as_slice() {
            ["crit", index] => index
                .parse()
                .map(WizardAction::ToggleCriterion)
                .map_err(|_| unknown()),
            ["prio", index, priority] => Ok(WizardAction::AssignPriority {
                criterion: index.parse().map_err(|_| unknown())?,
                priority: priority.parse().map_err(|_| unknown())?,
            }),
            ["weight", step, value] => Ok(WizardAction::SetWeight {
                step: step.parse().map_err(|_| unknown())?,
                value: value.parse().map_err(|_| unknown())?,
            }),
            [key, option]
                if !key.is_empty()
                    && !RESERVED_SCALE_KEYS.contains(key)
                    && key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) =>
            {
                Ok(WizardAction::ResolveSpecial {
                    key: key.to_string(),
                    option: option.parse().map_err(|_| unknown())?,
                })
            }
            _ => Err(unknown()),
        }
    }

    /// Renders the token that `parse` reads back.
    pub fn token(&self) -> String {
        match self {
            WizardAction::ToggleCriterion(i) => format!("crit_{}", i),
            WizardAction::FinishSelection => "done_criteria".to_string(),
            WizardAction::AssignPriority {
                criterion,
                priority,
            } => format!("prio_{}_{}", criterion, priority),
            WizardAction::ResolveSpecial { key, option } => format!("{}_{}", key, option),
            WizardAction::ConfirmOverride(true) => "override_yes".to_string(),
            WizardAction::ConfirmOverride(false) => "override_no".to_string(),
            WizardAction::SelectOverrideTarget(i) => format!("override_select_{}", i),
            WizardAction::FinishOverrides => "override_done".to_string(),
            WizardAction::CancelOverrideEdit => "override_cancel".to_string(),
            WizardAction::SetWeight { step, value } => format!("weight_{}_{}", step, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_tokens() {
        assert_eq!(WizardAction::parse("done_criteria").unwrap(), WizardAction::FinishSelection);
        assert_eq!(
            WizardAction::parse("override_yes").unwrap(),
            WizardAction::ConfirmOverride(true)
        );
        assert_eq!(
            WizardAction::parse("override_cancel").unwrap(),
            WizardAction::CancelOverrideEdit
        );
    }

    #[test]
    fn parses_indexed_tokens() {
        assert_eq!(WizardAction::parse("crit_3").unwrap(), WizardAction::ToggleCriterion(3));
        assert_eq!(
            WizardAction::parse("prio_0_5").unwrap(),
            WizardAction::AssignPriority {
                criterion: 0,
                priority: 5
            }
        );
        assert_eq!(
            WizardAction::parse("override_select_11").unwrap(),
            WizardAction::SelectOverrideTarget(11)
        );
        assert_eq!(
            WizardAction::parse("weight_2_10").unwrap(),
            WizardAction::SetWeight { step: 2, value: 10 }
        );
    }

    #[test]
    fn parses_special_scale_tokens() {
        assert_eq!(
            WizardAction::parse("sdata_1").unwrap(),
            WizardAction::ResolveSpecial {
                key: "sdata".to_string(),
                option: 1
            }
        );
    }

    #[test]
    fn leaves_range_checks_to_the_session() {
        assert_eq!(
            WizardAction::parse("prio_0_9").unwrap(),
            WizardAction::AssignPriority {
                criterion: 0,
                priority: 9
            }
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in [
            "",
            "crit_",
            "crit_x",
            "crit_Латентность",
            "prio_1",
            "prio_a_2",
            "weight_0",
            "weight_0_-",
            "override_select_",
            "override_maybe",
            "Sdata_1",
            "random text",
        ] {
            assert!(
                matches!(WizardAction::parse(token), Err(WizardError::UnknownAction(_))),
                "{token}"
            );
        }
    }

    #[test]
    fn token_is_read_back_by_parse() {
        let actions = [
            WizardAction::ToggleCriterion(7),
            WizardAction::AssignPriority {
                criterion: 2,
                priority: 3,
            },
            WizardAction::ResolveSpecial {
                key: "susage".to_string(),
                option: 0,
            },
            WizardAction::ConfirmOverride(false),
            WizardAction::SelectOverrideTarget(4),
            WizardAction::FinishOverrides,
            WizardAction::SetWeight { step: 1, value: 6 },
        ];
        for action in actions {
            assert_eq!(WizardAction::parse(&action.token()).unwrap(), action);
        }
    }
}
