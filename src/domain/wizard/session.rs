//! Wizard session aggregate.
//!
//! One session per chat. The controller feeds it one action at a time;
//! every mutation either succeeds and possibly advances the step, or
//! fails and leaves the session exactly as it was.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{WizardError, WizardStep};
use crate::domain::catalog::{Criterion, CriterionCatalog, DeploymentOption, ScoreTriple, SpecialScale};
use crate::domain::foundation::{ChatId, Priority, StateMachine, Timestamp};
use crate::domain::scoring::ScoringInput;

/// Inclusive range of values the override buttons offer.
pub const MIN_OVERRIDE_WEIGHT: i32 = 1;
pub const MAX_OVERRIDE_WEIGHT: i32 = 10;

/// Scratch state while one criterion's scores are being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideDraft {
    pub criterion: String,
    /// The option whose value the next `weight_` action sets.
    pub cursor: DeploymentOption,
    pub scores: ScoreTriple,
}

/// Result of storing one override weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightOutcome {
    /// More options remain; the cursor moved to this one.
    Next(DeploymentOption),
    /// All three values set; the override was committed for this criterion.
    Committed(String),
}

/// Wizard session aggregate.
///
/// # Invariants
///
/// - `selected` contains no duplicates and only catalog names
/// - every key of `priorities`, `special_values` and `overrides` is selected
/// - `draft` is `Some` exactly while in `EditingOverrideWeight`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSession {
    chat_id: ChatId,
    step: WizardStep,
    selected: Vec<String>,
    priorities: HashMap<String, Priority>,
    special_values: HashMap<String, String>,
    overrides: HashMap<String, ScoreTriple>,
    draft: Option<OverrideDraft>,
    started_at: Timestamp,
    updated_at: Timestamp,
}

impl WizardSession {
    /// Creates an idle session, used on first contact.
    pub fn new(chat_id: ChatId) -> Self {
        let now = Timestamp::now();
        Self {
            chat_id,
            step: WizardStep::Idle,
            selected: Vec::new(),
            priorities: HashMap::new(),
            special_values: HashMap::new(),
            overrides: HashMap::new(),
            draft: None,
            started_at: now,
            updated_at: now,
        }
    }

    /// Creates an empty session already waiting for criterion selection.
    pub fn start(chat_id: ChatId) -> Self {
        let mut session = Self::new(chat_id);
        session.step = WizardStep::SelectingCriteria;
        session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Selected criterion names in selection order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    pub fn priority_of(&self, name: &str) -> Option<Priority> {
        self.priorities.get(name).copied()
    }

    pub fn special_value_of(&self, name: &str) -> Option<&str> {
        self.special_values.get(name).map(String::as_str)
    }

    pub fn override_of(&self, name: &str) -> Option<ScoreTriple> {
        self.overrides.get(name).copied()
    }

    pub fn is_overridden(&self, name: &str) -> bool {
        self.overrides.contains_key(name)
    }

    pub fn draft(&self) -> Option<&OverrideDraft> {
        self.draft.as_ref()
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// True when every selected criterion has exactly one priority.
    pub fn priorities_complete(&self) -> bool {
        self.selected.iter().all(|name| self.priorities.contains_key(name))
    }

    /// First selected criterion (selection order) still lacking a priority.
    pub fn next_unprioritized(&self) -> Option<&str> {
        self.selected
            .iter()
            .find(|name| !self.priorities.contains_key(*name))
            .map(String::as_str)
    }

    /// First selected special criterion still lacking a value.
    pub fn next_unresolved_special<'c>(
        &self,
        catalog: &'c CriterionCatalog,
    ) -> Option<(&'c Criterion, &'c SpecialScale)> {
        self.selected.iter().find_map(|name| {
            let criterion = catalog.get(name)?;
            let scale = criterion.special.as_ref()?;
            if self.special_values.contains_key(name) {
                None
            } else {
                Some((criterion, scale))
            }
        })
    }

    fn has_selected_special(&self, catalog: &CriterionCatalog) -> bool {
        self.selected
            .iter()
            .filter_map(|name| catalog.get(name))
            .any(Criterion::is_special)
    }

    /// Answers collected so far, in the shape the scoring engine consumes.
    pub fn scoring_input(&self) -> ScoringInput {
        ScoringInput {
            selected_criteria: self.selected.clone(),
            criteria_priorities: self.priorities.clone(),
            overridden_scores: self.overrides.clone(),
            special_values: self.special_values.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggles criterion `index` in or out of the selection.
    ///
    /// Deselecting drops its priority, special value and override.
    /// Selecting appends, so a criterion toggled off and on again moves to
    /// the end of the selection and is prompted last.
    /// Returns whether the criterion is selected afterwards.
    pub fn toggle_criterion(
        &mut self,
        catalog: &CriterionCatalog,
        index: usize,
    ) -> Result<bool, WizardError> {
        self.ensure_step(WizardStep::SelectingCriteria)?;
        let name = Self::criterion_at(catalog, index)?.name.clone();

        let selected = if let Some(pos) = self.selected.iter().position(|s| *s == name) {
            self.selected.remove(pos);
            self.priorities.remove(&name);
            self.special_values.remove(&name);
            self.overrides.remove(&name);
            false
        } else {
            self.selected.push(name);
            true
        };

        self.touch();
        Ok(selected)
    }

    /// Ends selection. Rejected while nothing is selected.
    pub fn complete_selection(&mut self) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::SelectingCriteria)?;
        if self.selected.is_empty() {
            return Err(WizardError::EmptySelection);
        }
        self.advance(WizardStep::AssigningPriorities)
    }

    /// Assigns a priority to a selected criterion.
    ///
    /// Once all selected criteria have one, moves on to special values if
    /// any selected criterion is special, otherwise to the override question.
    pub fn assign_priority(
        &mut self,
        catalog: &CriterionCatalog,
        index: usize,
        value: u8,
    ) -> Result<WizardStep, WizardError> {
        self.ensure_step(WizardStep::AssigningPriorities)?;
        let name = self.selected_at(catalog, index)?;
        let priority = Priority::new(value).map_err(|_| WizardError::InvalidPriority(value))?;

        let next = if self
            .selected
            .iter()
            .all(|s| *s == name || self.priorities.contains_key(s))
        {
            if self.has_selected_special(catalog) {
                Some(WizardStep::ResolvingSpecialValues)
            } else {
                Some(WizardStep::ConfirmingOverride)
            }
        } else {
            None
        };

        if let Some(step) = next {
            self.advance(step)?;
        }
        self.priorities.insert(name, priority);
        self.touch();
        Ok(self.step)
    }

    /// Records option `option` of the special scale `key`.
    pub fn resolve_special(
        &mut self,
        catalog: &CriterionCatalog,
        key: &str,
        option: usize,
    ) -> Result<WizardStep, WizardError> {
        self.ensure_step(WizardStep::ResolvingSpecialValues)?;
        let (criterion, scale) = catalog
            .special_by_key(key)
            .ok_or_else(|| WizardError::UnknownSpecialKey(key.to_string()))?;
        if !self.is_selected(&criterion.name) {
            return Err(WizardError::NotSelected(criterion.name.clone()));
        }
        let label = scale
            .option(option)
            .ok_or_else(|| WizardError::SpecialOptionOutOfRange {
                key: key.to_string(),
                index: option,
            })?
            .label
            .clone();

        let remaining = self
            .selected
            .iter()
            .filter(|s| **s != criterion.name && !self.special_values.contains_key(*s))
            .filter_map(|s| catalog.get(s))
            .any(Criterion::is_special);
        if !remaining {
            self.advance(WizardStep::ConfirmingOverride)?;
        }

        self.special_values.insert(criterion.name.clone(), label);
        self.touch();
        Ok(self.step)
    }

    /// Yes opens the override list; no goes straight to computing.
    pub fn answer_override(&mut self, wants_override: bool) -> Result<WizardStep, WizardError> {
        self.ensure_step(WizardStep::ConfirmingOverride)?;
        if wants_override {
            self.advance(WizardStep::SelectingOverrideTarget)?;
        } else {
            self.advance(WizardStep::Computing)?;
        }
        Ok(self.step)
    }

    /// Starts editing a selected criterion's scores.
    ///
    /// The scratch triple starts from the committed override if there is
    /// one, else the resolved special mapping, else the baseline.
    pub fn begin_override(
        &mut self,
        catalog: &CriterionCatalog,
        index: usize,
    ) -> Result<&OverrideDraft, WizardError> {
        self.ensure_step(WizardStep::SelectingOverrideTarget)?;
        let name = self.selected_at(catalog, index)?;
        let criterion = Self::criterion_at(catalog, index)?;

        let scores = self
            .overrides
            .get(&name)
            .copied()
            .or_else(|| {
                let scale = criterion.special.as_ref()?;
                scale.scores_for(self.special_values.get(&name)?)
            })
            .unwrap_or(criterion.base_scores);

        self.advance(WizardStep::EditingOverrideWeight)?;
        self.touch();
        Ok(self.draft.insert(OverrideDraft {
            criterion: name,
            cursor: DeploymentOption::OnPremise,
            scores,
        }))
    }

    /// Stores one override value for the option under the cursor.
    ///
    /// `step` must match the cursor; a mismatch means the button came from
    /// an outdated prompt and is rejected.
    pub fn set_override_weight(
        &mut self,
        step: usize,
        value: i32,
    ) -> Result<WeightOutcome, WizardError> {
        self.ensure_step(WizardStep::EditingOverrideWeight)?;
        let draft = self.draft.as_ref().ok_or(WizardError::NoOverrideDraft)?;

        let expected = draft.cursor.index();
        if step != expected {
            return Err(WizardError::StaleWeightStep {
                expected,
                got: step,
            });
        }
        if !(MIN_OVERRIDE_WEIGHT..=MAX_OVERRIDE_WEIGHT).contains(&value) {
            return Err(WizardError::InvalidWeight(value));
        }

        let outcome = match draft.cursor.next() {
            Some(next) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.scores.set(draft.cursor, value);
                    draft.cursor = next;
                }
                WeightOutcome::Next(next)
            }
            None => {
                self.advance(WizardStep::SelectingOverrideTarget)?;
                let mut draft = self.draft.take().ok_or(WizardError::NoOverrideDraft)?;
                draft.scores.set(draft.cursor, value);
                self.overrides.insert(draft.criterion.clone(), draft.scores);
                WeightOutcome::Committed(draft.criterion)
            }
        };

        self.touch();
        Ok(outcome)
    }

    /// Abandons the current edit without committing anything.
    pub fn cancel_override(&mut self) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::EditingOverrideWeight)?;
        self.advance(WizardStep::SelectingOverrideTarget)?;
        self.draft = None;
        self.touch();
        Ok(())
    }

    /// Leaves the override list and moves to computing.
    pub fn finish_overrides(&mut self) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::SelectingOverrideTarget)?;
        self.advance(WizardStep::Computing)
    }

    /// Marks the session finished after its result was produced.
    pub fn complete(&mut self) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Computing)?;
        self.advance(WizardStep::Idle)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn advance(&mut self, to: WizardStep) -> Result<(), WizardError> {
        self.step = self.step.transition_to(to)?;
        self.touch();
        Ok(())
    }

    fn criterion_at(catalog: &CriterionCatalog, index: usize) -> Result<&Criterion, WizardError> {
        catalog
            .get_by_index(index)
            .ok_or(WizardError::CriterionIndexOutOfRange(index))
    }

    fn selected_at(&self, catalog: &CriterionCatalog, index: usize) -> Result<String, WizardError> {
        let name = &Self::criterion_at(catalog, index)?.name;
        if self.is_selected(name) {
            Ok(name.clone())
        } else {
            Err(WizardError::NotSelected(name.clone()))
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const JURISDICTION: usize = 0;
    const STANDARDS: usize = 1;
    const VOLUME: usize = 3;
    const LATENCY: usize = 4;
    const TERM: usize = 8;

    fn catalog() -> &'static CriterionCatalog {
        CriterionCatalog::builtin()
    }

    fn session_with(indices: &[usize]) -> WizardSession {
        let mut session = WizardSession::start(ChatId::new(1));
        for i in indices {
            session.toggle_criterion(catalog(), *i).unwrap();
        }
        session
    }

    fn prioritized(indices: &[usize], priority: u8) -> WizardSession {
        let mut session = session_with(indices);
        session.complete_selection().unwrap();
        for i in indices {
            session.assign_priority(catalog(), *i, priority).unwrap();
        }
        session
    }

    fn at_override_list(indices: &[usize]) -> WizardSession {
        let mut session = prioritized(indices, 3);
        session.answer_override(true).unwrap();
        session
    }

    #[test]
    fn new_session_is_idle_and_start_waits_for_selection() {
        assert_eq!(WizardSession::new(ChatId::new(1)).step(), WizardStep::Idle);
        assert_eq!(
            WizardSession::start(ChatId::new(1)).step(),
            WizardStep::SelectingCriteria
        );
    }

    #[test]
    fn toggle_keeps_selection_order() {
        let session = session_with(&[LATENCY, JURISDICTION, VOLUME]);
        assert_eq!(
            session.selected(),
            &["Латентность", "Юрисдикция данных", "Объём данных"]
        );
    }

    #[test]
    fn toggle_rejects_out_of_range_index() {
        let mut session = session_with(&[]);
        assert_eq!(
            session.toggle_criterion(catalog(), 99),
            Err(WizardError::CriterionIndexOutOfRange(99))
        );
    }

    #[test]
    fn complete_selection_rejects_empty_selection() {
        let mut session = session_with(&[]);
        assert_eq!(session.complete_selection(), Err(WizardError::EmptySelection));
        assert_eq!(session.step(), WizardStep::SelectingCriteria);
    }

    #[test]
    fn priorities_walk_in_selection_order() {
        let mut session = session_with(&[LATENCY, JURISDICTION]);
        session.complete_selection().unwrap();
        assert_eq!(session.next_unprioritized(), Some("Латентность"));

        let step = session.assign_priority(catalog(), LATENCY, 2).unwrap();
        assert_eq!(step, WizardStep::AssigningPriorities);
        assert_eq!(session.next_unprioritized(), Some("Юрисдикция данных"));

        let step = session.assign_priority(catalog(), JURISDICTION, 5).unwrap();
        assert_eq!(step, WizardStep::ConfirmingOverride);
        assert!(session.priorities_complete());
    }

    #[test]
    fn reassigning_priority_does_not_advance_early() {
        let mut session = session_with(&[LATENCY, JURISDICTION]);
        session.complete_selection().unwrap();
        session.assign_priority(catalog(), LATENCY, 2).unwrap();
        let step = session.assign_priority(catalog(), LATENCY, 4).unwrap();

        assert_eq!(step, WizardStep::AssigningPriorities);
        assert_eq!(session.priority_of("Латентность").unwrap().value(), 4);
    }

    #[test]
    fn invalid_priority_leaves_session_unchanged() {
        let mut session = session_with(&[LATENCY]);
        session.complete_selection().unwrap();
        let before = session.clone();

        assert_eq!(
            session.assign_priority(catalog(), LATENCY, 6),
            Err(WizardError::InvalidPriority(6))
        );
        assert_eq!(session.step(), before.step());
        assert_eq!(session.priority_of("Латентность"), None);
    }

    #[test]
    fn priority_for_unselected_criterion_is_rejected() {
        let mut session = session_with(&[LATENCY]);
        session.complete_selection().unwrap();
        assert!(matches!(
            session.assign_priority(catalog(), STANDARDS, 3),
            Err(WizardError::NotSelected(_))
        ));
    }

    #[test]
    fn special_criteria_route_through_resolution() {
        let mut session = session_with(&[TERM, VOLUME]);
        session.complete_selection().unwrap();
        session.assign_priority(catalog(), TERM, 1).unwrap();
        let step = session.assign_priority(catalog(), VOLUME, 1).unwrap();
        assert_eq!(step, WizardStep::ResolvingSpecialValues);

        let (criterion, _) = session.next_unresolved_special(catalog()).unwrap();
        assert_eq!(criterion.name, "Срок использования");

        let step = session.resolve_special(catalog(), "susage", 1).unwrap();
        assert_eq!(step, WizardStep::ResolvingSpecialValues);
        assert_eq!(session.special_value_of("Срок использования"), Some("Долгосрочный"));

        let step = session.resolve_special(catalog(), "sdata", 0).unwrap();
        assert_eq!(step, WizardStep::ConfirmingOverride);
        assert!(session.next_unresolved_special(catalog()).is_none());
    }

    #[test]
    fn resolve_special_rejects_bad_option_and_unknown_key() {
        let mut session = prioritized(&[VOLUME], 2);
        assert!(matches!(
            session.resolve_special(catalog(), "sdata", 3),
            Err(WizardError::SpecialOptionOutOfRange { .. })
        ));
        assert!(matches!(
            session.resolve_special(catalog(), "sother", 0),
            Err(WizardError::UnknownSpecialKey(_))
        ));
        assert!(matches!(
            session.resolve_special(catalog(), "susage", 0),
            Err(WizardError::NotSelected(_))
        ));
        assert_eq!(session.step(), WizardStep::ResolvingSpecialValues);
    }

    #[test]
    fn override_no_goes_to_computing() {
        let mut session = prioritized(&[LATENCY], 3);
        assert_eq!(session.answer_override(false).unwrap(), WizardStep::Computing);
    }

    #[test]
    fn committed_override_is_marked() {
        let mut session = at_override_list(&[LATENCY, JURISDICTION]);

        let draft = session.begin_override(catalog(), LATENCY).unwrap();
        assert_eq!(draft.scores, ScoreTriple::new(8, 6, 5));
        assert_eq!(draft.cursor, DeploymentOption::OnPremise);

        assert_eq!(
            session.set_override_weight(0, 5).unwrap(),
            WeightOutcome::Next(DeploymentOption::PrivateCloud)
        );
        assert_eq!(
            session.set_override_weight(1, 5).unwrap(),
            WeightOutcome::Next(DeploymentOption::PublicCloud)
        );
        assert_eq!(
            session.set_override_weight(2, 5).unwrap(),
            WeightOutcome::Committed("Латентность".to_string())
        );

        assert_eq!(session.step(), WizardStep::SelectingOverrideTarget);
        assert!(session.is_overridden("Латентность"));
        assert!(!session.is_overridden("Юрисдикция данных"));
        assert_eq!(session.override_of("Латентность"), Some(ScoreTriple::neutral()));
    }

    #[test]
    fn cancelled_edit_is_not_marked() {
        let mut session = at_override_list(&[LATENCY]);
        session.begin_override(catalog(), LATENCY).unwrap();
        session.set_override_weight(0, 9).unwrap();
        session.cancel_override().unwrap();

        assert_eq!(session.step(), WizardStep::SelectingOverrideTarget);
        assert!(!session.is_overridden("Латентность"));
        assert!(session.draft().is_none());
    }

    #[test]
    fn editing_again_seeds_from_committed_override() {
        let mut session = at_override_list(&[LATENCY]);
        session.begin_override(catalog(), LATENCY).unwrap();
        for (step, value) in [(0, 1), (1, 2), (2, 3)] {
            session.set_override_weight(step, value).unwrap();
        }

        let draft = session.begin_override(catalog(), LATENCY).unwrap();
        assert_eq!(draft.scores, ScoreTriple::new(1, 2, 3));
    }

    #[test]
    fn special_criterion_seeds_from_resolved_value() {
        let mut session = prioritized(&[VOLUME], 1);
        session.resolve_special(catalog(), "sdata", 2).unwrap();
        session.answer_override(true).unwrap();

        let draft = session.begin_override(catalog(), VOLUME).unwrap();
        assert_eq!(draft.scores, ScoreTriple::new(4, 8, 9));
    }

    #[test]
    fn stale_weight_step_is_rejected() {
        let mut session = at_override_list(&[LATENCY]);
        session.begin_override(catalog(), LATENCY).unwrap();
        session.set_override_weight(0, 4).unwrap();

        assert_eq!(
            session.set_override_weight(0, 7),
            Err(WizardError::StaleWeightStep {
                expected: 1,
                got: 0
            })
        );
        assert_eq!(session.draft().unwrap().scores.on_prem, 4);
    }

    #[test]
    fn out_of_range_weight_is_rejected() {
        let mut session = at_override_list(&[LATENCY]);
        session.begin_override(catalog(), LATENCY).unwrap();
        assert_eq!(session.set_override_weight(0, 11), Err(WizardError::InvalidWeight(11)));
        assert_eq!(session.set_override_weight(0, 0), Err(WizardError::InvalidWeight(0)));
    }

    #[test]
    fn actions_in_wrong_step_are_rejected() {
        let mut session = session_with(&[LATENCY]);
        assert!(matches!(
            session.answer_override(true),
            Err(WizardError::WrongStep { .. })
        ));
        assert!(matches!(
            session.set_override_weight(0, 1),
            Err(WizardError::WrongStep { .. })
        ));
    }

    #[test]
    fn scoring_input_mirrors_answers() {
        let mut session = at_override_list(&[LATENCY]);
        session.begin_override(catalog(), LATENCY).unwrap();
        for step in 0..3 {
            session.set_override_weight(step, 5).unwrap();
        }
        session.finish_overrides().unwrap();

        let input = session.scoring_input();
        assert_eq!(input.selected_criteria, vec!["Латентность"]);
        assert_eq!(input.criteria_priorities["Латентность"].value(), 3);
        assert_eq!(input.overridden_scores["Латентность"], ScoreTriple::neutral());
        assert_eq!(session.step(), WizardStep::Computing);
    }

    #[test]
    fn complete_returns_to_idle() {
        let mut session = prioritized(&[LATENCY], 1);
        session.answer_override(false).unwrap();
        session.complete().unwrap();
        assert_eq!(session.step(), WizardStep::Idle);
    }

    proptest! {
        #[test]
        fn double_toggle_restores_membership_and_moves_reselected_last(
            initial in prop::collection::vec(0usize..12, 0..12),
            index in 0usize..12,
        ) {
            let mut session = WizardSession::start(ChatId::new(7));
            for i in initial {
                session.toggle_criterion(catalog(), i).unwrap();
            }
            let before = session.selected().to_vec();
            let name = catalog().criteria()[index].name.clone();

            session.toggle_criterion(catalog(), index).unwrap();
            session.toggle_criterion(catalog(), index).unwrap();

            let mut expected: Vec<String> =
                before.iter().filter(|s| **s != name).cloned().collect();
            if before.contains(&name) {
                expected.push(name);
            }
            prop_assert_eq!(session.selected().to_vec(), expected);
        }

        #[test]
        fn priority_phase_exits_iff_all_prioritized(
            picks in prop::collection::btree_set(0usize..12, 1..12),
            assign in prop::collection::vec((0usize..12, 1u8..=5), 0..24),
        ) {
            let picks: Vec<usize> = picks.into_iter().collect();
            let mut session = session_with(&picks);
            session.complete_selection().unwrap();

            for (i, p) in assign {
                if session.step() != WizardStep::AssigningPriorities {
                    break;
                }
                let _ = session.assign_priority(catalog(), i, p);
            }

            let left = session.step() != WizardStep::AssigningPriorities;
            prop_assert_eq!(left, session.priorities_complete());
        }
    }
}
