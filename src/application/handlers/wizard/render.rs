//! Prompt model and the texts the wizard sends.
//!
//! Everything here is a pure function of the session, the catalog or a
//! score report. Transports decide how to draw `OutgoingMessage`s.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::domain::catalog::{Criterion, CriterionCatalog, DeploymentOption, SpecialScale};
use crate::domain::foundation::Priority;
use crate::domain::scoring::{Recommendation, ScoreReport};
use crate::domain::wizard::{
    OverrideDraft, WizardAction, WizardError, WizardSession, WizardStep, MAX_OVERRIDE_WEIGHT,
    MIN_OVERRIDE_WEIGHT,
};

pub const GREETING: &str =
    "Привет! Я бот для выбора типа СУБД (On-Premise, Private, Public). Давайте начнём чеклист.";
pub const RESET_NOTICE: &str = "Чеклист сброшен. Давайте начнем заново.";
pub const START_HINT: &str = "Чтобы начать новый чеклист, введите /start";
pub const NO_SESSION: &str =
    "Произошла ошибка состояния. Пожалуйста, начните заново с /start.";
pub const USE_BUTTONS: &str = "Пожалуйста, используйте кнопки.";
pub const USE_WEIGHT_BUTTONS: &str = "Пожалуйста, используйте кнопки для переопределения весов.";
pub const EMPTY_SELECTION: &str = "Пожалуйста, выберите хотя бы один критерий.";
pub const STALE_ACTION: &str = "Эта кнопка уже неактуальна. Пожалуйста, используйте кнопки из последнего сообщения.";
pub const ADVISOR_UNAVAILABLE: &str = "Не удалось получить рекомендацию от AI.";
pub const SAVE_FAILED: &str = "Произошла ошибка при сохранении результатов.";
pub const INTERNAL_ERROR: &str = "Произошла внутренняя ошибка. Пожалуйста, начните заново с /start.";

const OVERRIDE_BUTTONS_PER_ROW: usize = 5;

/// One inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    /// Callback token sent back when the button is pressed.
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: &WizardAction) -> Self {
        Self {
            label: label.into(),
            data: action.token(),
        }
    }
}

/// A message to show, with rows of buttons (possibly none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    #[serde(default)]
    pub buttons: Vec<Vec<Button>>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    pub fn with_buttons(text: impl Into<String>, buttons: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            buttons,
        }
    }

    pub fn has_buttons(&self) -> bool {
        !self.buttons.is_empty()
    }
}

/// What happened to the input that produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyOutcome {
    /// First contact; a session was created but not started.
    Greeted,
    /// `/start` or `/reset` began a fresh questionnaire.
    Started,
    /// The action was applied and the next prompt follows.
    Advanced,
    /// The input was refused; the current prompt is repeated.
    Rejected,
    /// A result was computed and the session discarded.
    Completed,
    /// A button was pressed but no session exists.
    NoSession,
}

/// Everything the transport should send back, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub outcome: ReplyOutcome,
    pub messages: Vec<OutgoingMessage>,
}

impl Reply {
    pub fn new(outcome: ReplyOutcome, messages: Vec<OutgoingMessage>) -> Self {
        Self { outcome, messages }
    }

    /// The last message carrying buttons, i.e. the live prompt.
    pub fn prompt(&self) -> Option<&OutgoingMessage> {
        self.messages.iter().rev().find(|m| m.has_buttons())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Step prompts
// ─────────────────────────────────────────────────────────────────────────────

/// The prompt for the session's current step.
pub fn current_prompt(session: &WizardSession, catalog: &CriterionCatalog) -> OutgoingMessage {
    match session.step() {
        WizardStep::Idle | WizardStep::Computing => OutgoingMessage::text(START_HINT),
        WizardStep::SelectingCriteria => criteria_prompt(session, catalog),
        WizardStep::AssigningPriorities => session
            .next_unprioritized()
            .and_then(|name| catalog.get(name))
            .and_then(|criterion| priority_prompt(catalog, criterion))
            .unwrap_or_else(|| OutgoingMessage::text(NO_SESSION)),
        WizardStep::ResolvingSpecialValues => session
            .next_unresolved_special(catalog)
            .map(|(_, scale)| special_prompt(scale))
            .unwrap_or_else(|| OutgoingMessage::text(NO_SESSION)),
        WizardStep::ConfirmingOverride => override_question(),
        WizardStep::SelectingOverrideTarget => override_list(session, catalog),
        WizardStep::EditingOverrideWeight => session
            .draft()
            .map(weight_prompt)
            .unwrap_or_else(|| OutgoingMessage::text(USE_WEIGHT_BUTTONS)),
    }
}

pub fn criteria_prompt(session: &WizardSession, catalog: &CriterionCatalog) -> OutgoingMessage {
    let mut rows: Vec<Vec<Button>> = catalog
        .criteria()
        .iter()
        .enumerate()
        .map(|(index, criterion)| {
            let mark = if session.is_selected(&criterion.name) {
                "✓ "
            } else {
                "○ "
            };
            vec![Button::new(
                format!("{}{}", mark, criterion.name),
                &WizardAction::ToggleCriterion(index),
            )]
        })
        .collect();
    rows.push(vec![Button::new("✅ Готово", &WizardAction::FinishSelection)]);

    OutgoingMessage::with_buttons("Выберите критерии, которые важны для вашей компании:", rows)
}

pub fn priority_prompt(catalog: &CriterionCatalog, criterion: &Criterion) -> Option<OutgoingMessage> {
    let index = catalog.index_of(&criterion.name)?;
    let row = Priority::all()
        .map(|p| {
            Button::new(
                p.value().to_string(),
                &WizardAction::AssignPriority {
                    criterion: index,
                    priority: p.value(),
                },
            )
        })
        .collect();

    Some(OutgoingMessage::with_buttons(
        format!(
            "Установите приоритет для критерия:\n\n*{}*\n{}",
            criterion.name, criterion.description
        ),
        vec![row],
    ))
}

pub fn special_prompt(scale: &SpecialScale) -> OutgoingMessage {
    let mut text = scale.prompt.clone();
    if scale.options.iter().any(|o| !o.hint.is_empty()) {
        text.push('\n');
        for option in &scale.options {
            let _ = write!(text, "\n• *{}*", option.label);
            if !option.hint.is_empty() {
                let _ = write!(text, " — {}", option.hint);
            }
        }
    }

    let rows = scale
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            vec![Button::new(
                option.label.clone(),
                &WizardAction::ResolveSpecial {
                    key: scale.key.clone(),
                    option: index,
                },
            )]
        })
        .collect();

    OutgoingMessage::with_buttons(text, rows)
}

pub fn override_question() -> OutgoingMessage {
    OutgoingMessage::with_buttons(
        "Хотите ли переопределить базовые баллы (веса) для выбранных критериев?",
        vec![vec![
            Button::new("Да", &WizardAction::ConfirmOverride(true)),
            Button::new("Нет", &WizardAction::ConfirmOverride(false)),
        ]],
    )
}

/// Selected criteria; committed overrides carry a `✓`.
pub fn override_list(session: &WizardSession, catalog: &CriterionCatalog) -> OutgoingMessage {
    let mut rows: Vec<Vec<Button>> = session
        .selected()
        .iter()
        .filter_map(|name| {
            let index = catalog.index_of(name)?;
            let label = if session.is_overridden(name) {
                format!("✓ {}", name)
            } else {
                name.clone()
            };
            Some(vec![Button::new(
                label,
                &WizardAction::SelectOverrideTarget(index),
            )])
        })
        .collect();
    rows.push(vec![Button::new("✅ Готово", &WizardAction::FinishOverrides)]);

    OutgoingMessage::with_buttons("Выберите критерий, для которого хотите изменить веса:", rows)
}

pub fn weight_prompt(draft: &OverrideDraft) -> OutgoingMessage {
    let mut text = format!(
        "Изменение весов для критерия *{}*\n\n*Текущие веса:*\n",
        draft.criterion
    );
    for option in DeploymentOption::ALL {
        let _ = writeln!(text, "• {}: {}", option.label(), draft.scores.get(option));
    }
    let _ = write!(text, "\nВыберите новое значение для *{}*:", draft.cursor.label());

    let current = draft.scores.get(draft.cursor);
    let step = draft.cursor.index();
    let values: Vec<Button> = (MIN_OVERRIDE_WEIGHT..=MAX_OVERRIDE_WEIGHT)
        .map(|value| {
            let label = if value == current {
                format!("• {} •", value)
            } else {
                value.to_string()
            };
            Button::new(label, &WizardAction::SetWeight { step, value })
        })
        .collect();

    let mut rows: Vec<Vec<Button>> = values
        .chunks(OVERRIDE_BUTTONS_PER_ROW)
        .map(<[Button]>::to_vec)
        .collect();
    rows.push(vec![Button::new("❌ Отмена", &WizardAction::CancelOverrideEdit)]);

    OutgoingMessage::with_buttons(text, rows)
}

/// Corrective message for a refused action.
pub fn rejection_text(error: &WizardError) -> &'static str {
    match error {
        WizardError::EmptySelection => EMPTY_SELECTION,
        WizardError::StaleWeightStep { .. }
        | WizardError::InvalidWeight(_)
        | WizardError::NoOverrideDraft => USE_WEIGHT_BUTTONS,
        WizardError::WrongStep { .. }
        | WizardError::NotSelected(_)
        | WizardError::CriterionIndexOutOfRange(_)
        | WizardError::UnknownSpecialKey(_)
        | WizardError::SpecialOptionOutOfRange { .. }
        | WizardError::InvalidPriority(_) => STALE_ACTION,
        WizardError::NoSession => NO_SESSION,
        WizardError::UnknownAction(_) => USE_BUTTONS,
        WizardError::InvalidTransition(_) | WizardError::Scoring(_) | WizardError::Storage(_) => {
            INTERNAL_ERROR
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Result texts
// ─────────────────────────────────────────────────────────────────────────────

/// Totals followed by the verdict.
pub fn result_text(report: &ScoreReport) -> String {
    let totals = report.totals;
    let mut text = format!(
        "Итоговые баллы:\nOn-Premise: {}\nPrivate Cloud: {}\nPublic Cloud: {}\n\n",
        totals.on_prem, totals.private, totals.public
    );

    match &report.recommendation {
        Recommendation::Clear(option) => {
            let _ = write!(text, "Рекомендуется {}.", option.label());
        }
        Recommendation::NeedsEvaluation(options) => {
            let names: Vec<&str> = options.iter().map(|o| o.label()).collect();
            let _ = write!(
                text,
                "Варианты ({}) равны по баллам, нужна дополнительная оценка.",
                names.join(", ")
            );
        }
    }
    text
}

/// Per-criterion calculation, in selection order.
pub fn details_text(report: &ScoreReport) -> String {
    let mut text = String::from("Детализация расчета:\n");
    for line in &report.breakdown {
        let _ = write!(
            text,
            "\nКритерий: {}\n  Приоритет: {}\n  Баллы ({}): {}\n  С учетом приоритета: {}\n",
            line.name,
            line.priority.value(),
            line.source,
            line.scores,
            line.weighted
        );
    }
    if report.breakdown.is_empty() {
        text.push_str("\nКритерии не выбраны.\n");
    }
    text.trim_end().to_string()
}

pub fn advisor_text(answer: &str) -> String {
    format!("*Рекомендация AI*:\n{}", answer)
}
