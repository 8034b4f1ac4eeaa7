//! Integration tests for the wizard controller.
//!
//! These tests drive complete conversations through `WizardController`
//! with in-memory adapters, checking what the user sees and what gets
//! recorded.

use std::sync::Arc;

use deployment_advisor::adapters::ai::MockAIProvider;
use deployment_advisor::adapters::{InMemoryOutcomeRecorder, InMemorySessionStore};
use deployment_advisor::application::{
    AdvisorService, AdvisorSettings, Reply, ReplyOutcome, WizardController,
};
use deployment_advisor::domain::catalog::{CriterionCatalog, ScoreTriple};
use deployment_advisor::domain::foundation::ChatId;
use deployment_advisor::domain::wizard::WizardStep;
use deployment_advisor::ports::SessionStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Chat {
    controller: WizardController,
    sessions: Arc<InMemorySessionStore>,
    outcomes: Arc<InMemoryOutcomeRecorder>,
    provider: MockAIProvider,
}

impl Chat {
    fn new() -> Self {
        let catalog = Arc::new(CriterionCatalog::builtin().clone());
        let sessions = Arc::new(InMemorySessionStore::new());
        let outcomes = Arc::new(InMemoryOutcomeRecorder::new());
        let provider =
            MockAIProvider::new().with_fallback_content("Private Cloud\nОбоснование: баланс.");
        let advisor = Arc::new(AdvisorService::new(
            Arc::new(provider.clone()),
            catalog.clone(),
            AdvisorSettings::default(),
        ));
        Self {
            controller: WizardController::new(catalog, sessions.clone(), outcomes.clone(), advisor),
            sessions,
            outcomes,
            provider,
        }
    }

    async fn say(&self, chat: i64, text: &str) -> Reply {
        self.controller
            .handle_message(ChatId::new(chat), text)
            .await
            .unwrap()
    }

    async fn press(&self, chat: i64, data: &str) -> Reply {
        self.controller
            .handle_callback(ChatId::new(chat), data)
            .await
            .unwrap()
    }

    async fn step(&self, chat: i64) -> Option<WizardStep> {
        self.sessions
            .load(ChatId::new(chat))
            .await
            .unwrap()
            .map(|s| s.step())
    }
}

// =============================================================================
// Flows
// =============================================================================

#[tokio::test]
async fn special_criteria_are_resolved_in_selection_order() {
    let chat = Chat::new();
    chat.say(1, "/start").await;
    chat.press(1, "crit_3").await;
    chat.press(1, "crit_8").await;
    chat.press(1, "done_criteria").await;
    chat.press(1, "prio_8_2").await;
    let reply = chat.press(1, "prio_3_4").await;

    assert_eq!(chat.step(1).await, Some(WizardStep::ResolvingSpecialValues));
    assert!(reply.prompt().unwrap().text.starts_with("Укажите объем данных:"));

    let reply = chat.press(1, "sdata_2").await;
    assert!(reply
        .prompt()
        .unwrap()
        .text
        .starts_with("Укажите планируемый срок использования:"));

    chat.press(1, "susage_1").await;
    let done = chat.press(1, "override_no").await;

    // Срок использования: Долгосрочный (9,7,6) x2; Объём данных: Большой (4,8,9) x4
    assert!(done.messages[0]
        .text
        .contains("On-Premise: 34\nPrivate Cloud: 46\nPublic Cloud: 48"));
    let record = &chat.outcomes.records().await[0];
    assert_eq!(record.totals, ScoreTriple::new(34, 46, 48));
    assert_eq!(record.input.special_values["Объём данных"], "Большой");
    assert_eq!(record.input.special_values["Срок использования"], "Долгосрочный");
}

#[tokio::test]
async fn chats_do_not_share_sessions() {
    let chat = Chat::new();
    chat.say(1, "/start").await;
    chat.say(2, "/start").await;
    chat.press(1, "crit_0").await;

    let second = chat.press(2, "done_criteria").await;

    assert_eq!(second.outcome, ReplyOutcome::Rejected);
    assert_eq!(chat.step(1).await, Some(WizardStep::SelectingCriteria));
    let one = chat.sessions.load(ChatId::new(1)).await.unwrap().unwrap();
    let two = chat.sessions.load(ChatId::new(2)).await.unwrap().unwrap();
    assert_eq!(one.selected().len(), 1);
    assert!(two.selected().is_empty());
}

#[tokio::test]
async fn deselecting_drops_the_criterion_from_the_result() {
    let chat = Chat::new();
    chat.say(5, "/start").await;
    chat.press(5, "crit_0").await;
    chat.press(5, "crit_6").await;
    chat.press(5, "crit_0").await;
    chat.press(5, "done_criteria").await;
    chat.press(5, "prio_6_2").await;
    let done = chat.press(5, "override_no").await;

    // Начальные инвестиции (3,4,8) x2
    assert!(done.messages[0]
        .text
        .contains("On-Premise: 6\nPrivate Cloud: 8\nPublic Cloud: 16"));
    assert_eq!(
        chat.outcomes.records().await[0].input.selected_criteria,
        vec!["Начальные инвестиции"]
    );
}

#[tokio::test]
async fn reediting_an_override_starts_from_committed_values() {
    let chat = Chat::new();
    chat.say(3, "/start").await;
    chat.press(3, "crit_4").await;
    chat.press(3, "done_criteria").await;
    chat.press(3, "prio_4_1").await;
    chat.press(3, "override_yes").await;
    chat.press(3, "override_select_4").await;
    chat.press(3, "weight_0_2").await;
    chat.press(3, "weight_1_3").await;
    chat.press(3, "weight_2_4").await;

    let reply = chat.press(3, "override_select_4").await;

    let prompt = &reply.prompt().unwrap().text;
    assert!(prompt.contains("• On-Premise: 2\n• Private Cloud: 3\n• Public Cloud: 4"));
}

#[tokio::test]
async fn free_text_during_weight_editing_points_to_weight_buttons() {
    let chat = Chat::new();
    chat.say(4, "/start").await;
    chat.press(4, "crit_4").await;
    chat.press(4, "done_criteria").await;
    chat.press(4, "prio_4_1").await;
    chat.press(4, "override_yes").await;
    chat.press(4, "override_select_4").await;

    let reply = chat.say(4, "8 6 5").await;

    assert_eq!(reply.outcome, ReplyOutcome::Rejected);
    assert_eq!(
        reply.messages[0].text,
        "Пожалуйста, используйте кнопки для переопределения весов."
    );
    assert_eq!(chat.step(4).await, Some(WizardStep::EditingOverrideWeight));
}

#[tokio::test]
async fn restart_after_completion_begins_a_fresh_session() {
    let chat = Chat::new();
    chat.say(6, "/start").await;
    chat.press(6, "crit_0").await;
    chat.press(6, "done_criteria").await;
    chat.press(6, "prio_0_3").await;
    chat.press(6, "override_no").await;
    assert_eq!(chat.step(6).await, None);

    let reply = chat.say(6, "ещё раз").await;
    assert_eq!(reply.outcome, ReplyOutcome::Greeted);

    let reply = chat.say(6, "/start").await;
    assert_eq!(reply.outcome, ReplyOutcome::Started);
    assert_eq!(chat.step(6).await, Some(WizardStep::SelectingCriteria));
    assert_eq!(chat.provider.call_count(), 1);
}
