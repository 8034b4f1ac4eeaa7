//! Advisor - asks a language model for a second opinion on a scored session.
//!
//! The model sees the criteria the user picked, their priorities and the
//! qualitative values, never the numeric scores. Its answer is compared to
//! the algorithm's verdict to produce the agreement flag stored with the
//! outcome.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::catalog::{CriterionCatalog, DeploymentOption};
use crate::domain::foundation::{ChatId, Priority};
use crate::domain::scoring::{Recommendation, ScoringInput};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Generation settings for advisor calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisorSettings {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Bound on the whole consultation, provider retries included.
    pub timeout: Duration,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            temperature: 0.6,
            max_tokens: 1500,
            timeout: Duration::from_secs(45),
        }
    }
}

/// Why no opinion could be obtained.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("advisor timed out after {0:?}")]
    TimedOut(Duration),

    #[error("advisor provider failed: {0}")]
    Provider(#[from] AIError),

    #[error("advisor returned an empty answer")]
    EmptyAnswer,
}

/// The model's answer and how it relates to the algorithm's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorOpinion {
    pub answer: String,
    /// Option the answer names, if one could be identified.
    pub suggested: Option<DeploymentOption>,
    pub agreement: bool,
}

/// Builds prompts, calls the provider under a timeout and judges agreement.
pub struct AdvisorService {
    provider: Arc<dyn AIProvider>,
    catalog: Arc<CriterionCatalog>,
    settings: AdvisorSettings,
    system_prompt: String,
}

impl AdvisorService {
    pub fn new(
        provider: Arc<dyn AIProvider>,
        catalog: Arc<CriterionCatalog>,
        settings: AdvisorSettings,
    ) -> Self {
        let system_prompt = system_prompt(&catalog);
        Self {
            provider,
            catalog,
            settings,
            system_prompt,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn provider_name(&self) -> String {
        self.provider.provider_info().name
    }

    /// Asks the model which option fits the given answers.
    ///
    /// # Errors
    ///
    /// - `TimedOut` if the provider did not answer within the configured bound
    /// - `Provider` if the provider failed after its own retries
    /// - `EmptyAnswer` if the model returned only whitespace
    pub async fn consult(
        &self,
        chat_id: Option<ChatId>,
        input: &ScoringInput,
        recommendation: &Recommendation,
    ) -> Result<AdvisorOpinion, AdvisorError> {
        let trace_id = Uuid::new_v4().to_string();
        let request = CompletionRequest::new(RequestMetadata::new(chat_id, trace_id.clone()))
            .with_system_prompt(self.system_prompt.clone())
            .with_message(MessageRole::User, user_message(&self.catalog, input))
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = tokio::time::timeout(self.settings.timeout, self.provider.complete(request))
            .await
            .map_err(|_| {
                warn!(trace_id = %trace_id, timeout = ?self.settings.timeout, "advisor timed out");
                AdvisorError::TimedOut(self.settings.timeout)
            })??;

        let answer = response.content.trim().to_string();
        if answer.is_empty() {
            return Err(AdvisorError::EmptyAnswer);
        }

        let suggested = suggested_option(&answer);
        let agreement = agrees(&answer, recommendation);
        info!(
            trace_id = %trace_id,
            model = %response.model,
            suggested = ?suggested,
            agreement,
            "advisor answered"
        );

        Ok(AdvisorOpinion {
            answer,
            suggested,
            agreement,
        })
    }
}

/// Expert role, the full criterion list and the required answer shape.
pub fn system_prompt(catalog: &CriterionCatalog) -> String {
    let mut prompt = String::from(
        "Ты — эксперт по выбору инфраструктурных решений для баз данных. \
         К тебе обращается пользователь, который прошел тест для определения \
         оптимального типа развертывания СУБД: On-Premise, Private Cloud или Public Cloud.\n\
         Пользователь выбрал важные для него критерии из списка и установил их \
         приоритет от 1 (низкий) до 5 (высокий).\n\n\
         Вот список всех возможных критериев:\n",
    );

    for criterion in catalog.criteria() {
        let _ = writeln!(prompt, "- {}: {}", criterion.name, criterion.description);
    }

    let specials: Vec<&str> = catalog
        .criteria()
        .iter()
        .filter(|c| c.is_special())
        .map(|c| c.name.as_str())
        .collect();

    let _ = write!(
        prompt,
        "\nТебе предоставят информацию о том, какие критерии выбрал пользователь, \
         какие приоритеты он им назначил, и какие значения он указал для \
         \"специальных\" критериев ({}).\n\n",
        specials.join(", ")
    );

    prompt.push_str(
        "Твоя задача:\n\
         1. Проанализируй выбор пользователя: какие критерии для него наиболее важны, \
         какие менее важны. Обрати внимание на комбинацию критериев.\n\
         2. Дай **одну** четкую рекомендацию: какой из трех типов СУБД \
         (**On-Premise**, **Private Cloud** или **Public Cloud**) лучше всего подходит.\n\
         3. Предоставь краткое, но емкое **обоснование** своей рекомендации.\n\n\
         Формат ответа СТРОГО:\n\
         <On-Premise/Private Cloud/Public Cloud>\n\
         Обоснование: [Твое обоснование здесь]\n\n\
         Пример:\n\
         Public Cloud\n\
         Обоснование: Пользователь указал высокий приоритет для Масштабируемости и \
         Времени до запуска, а также выбрал Краткосрочный срок использования. Public Cloud \
         позволяет быстро развернуть систему и гибко масштабировать ресурсы без \
         значительных начальных инвестиций.\n",
    );

    prompt
}

/// Criteria, priorities and special values in selection order. No scores.
pub fn brief(catalog: &CriterionCatalog, input: &ScoringInput) -> String {
    let mut out = String::new();
    for name in &input.selected_criteria {
        let priority = input
            .criteria_priorities
            .get(name)
            .copied()
            .unwrap_or(Priority::FALLBACK);
        let _ = writeln!(out, "Критерий: {}", name);
        let _ = writeln!(out, "  Приоритет: {}", priority.value());

        let is_special = catalog.get(name).is_some_and(|c| c.is_special());
        if let (true, Some(value)) = (is_special, input.special_values.get(name)) {
            let _ = writeln!(out, "  Значение: {}", value);
        }
    }
    out.trim_end().to_string()
}

pub fn user_message(catalog: &CriterionCatalog, input: &ScoringInput) -> String {
    format!(
        "Вот какие критерии и приоритеты выбрал пользователь: \n{}",
        brief(catalog, input)
    )
}

/// The option an answer recommends.
///
/// The first line naming exactly one option decides; failing that, the
/// first option whose keywords appear anywhere in the answer.
pub fn suggested_option(answer: &str) -> Option<DeploymentOption> {
    for line in answer.lines() {
        let named = options_named_in(line);
        match named.as_slice() {
            [only] => return Some(*only),
            [] => continue,
            // A line naming several options is ambiguous; keep looking.
            _ => continue,
        }
    }
    options_named_in(answer).into_iter().next()
}

fn options_named_in(text: &str) -> Vec<DeploymentOption> {
    let lowered = text.to_lowercase();
    DeploymentOption::ALL
        .into_iter()
        .filter(|option| option.keywords().iter().any(|k| lowered.contains(k)))
        .collect()
}

/// Agreement is false on a tie; otherwise the suggested option must be the winner.
pub fn agrees(answer: &str, recommendation: &Recommendation) -> bool {
    match recommendation.winner() {
        Some(winner) => suggested_option(answer) == Some(winner),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    fn service(provider: MockAIProvider) -> AdvisorService {
        AdvisorService::new(
            Arc::new(provider),
            Arc::new(CriterionCatalog::builtin().clone()),
            AdvisorSettings::default(),
        )
    }

    fn input() -> ScoringInput {
        ScoringInput::new()
            .select("Юрисдикция данных", Priority::new(5).unwrap())
            .select("Объём данных", Priority::new(2).unwrap())
            .with_special("Объём данных", "Большой")
    }

    #[test]
    fn system_prompt_lists_every_criterion_and_format() {
        let prompt = system_prompt(CriterionCatalog::builtin());
        for criterion in CriterionCatalog::builtin().criteria() {
            assert!(prompt.contains(&criterion.name), "missing {}", criterion.name);
        }
        assert!(prompt.contains("Обоснование:"));
        assert!(prompt.contains("(Малый, Средний, Большой)"));
        assert!(prompt.contains("Объём данных, Срок использования"));
    }

    #[test]
    fn brief_has_priorities_and_values_but_no_scores() {
        let text = brief(CriterionCatalog::builtin(), &input());

        assert_eq!(
            text,
            "Критерий: Юрисдикция данных\n  Приоритет: 5\n\
             Критерий: Объём данных\n  Приоритет: 2\n  Значение: Большой"
        );
        assert!(!text.contains("Баллы"));
        assert!(!text.contains("OnPrem="));
    }

    #[test]
    fn suggested_option_prefers_first_line() {
        let answer = "Private Cloud\nОбоснование: в отличие от Public Cloud, даёт контроль.";
        assert_eq!(suggested_option(answer), Some(DeploymentOption::PrivateCloud));
    }

    #[test]
    fn suggested_option_skips_ambiguous_lines() {
        let answer = "Сравнивая On-Premise и Public Cloud:\n**On-Premise**\nОбоснование: юрисдикция.";
        assert_eq!(suggested_option(answer), Some(DeploymentOption::OnPremise));
    }

    #[test]
    fn suggested_option_falls_back_to_keyword_search() {
        assert_eq!(
            suggested_option("Рекомендую ON-PREM вариант и PUBLIC как запасной"),
            Some(DeploymentOption::OnPremise)
        );
        assert_eq!(suggested_option("Не знаю"), None);
    }

    #[test]
    fn agreement_false_on_tie() {
        let tie = Recommendation::NeedsEvaluation(DeploymentOption::ALL.to_vec());
        assert!(!agrees("Public Cloud\nОбоснование: ...", &tie));
    }

    #[test]
    fn agreement_matches_winner() {
        let clear = Recommendation::Clear(DeploymentOption::PublicCloud);
        assert!(agrees("Public Cloud\nОбоснование: ...", &clear));
        assert!(!agrees("On-Premise\nОбоснование: ...", &clear));
    }

    #[tokio::test]
    async fn consult_sends_prompt_and_settings() {
        let provider = MockAIProvider::new().with_response("On-Premise\nОбоснование: законы");
        let advisor = service(provider.clone());

        let opinion = advisor
            .consult(
                Some(ChatId::new(3)),
                &input(),
                &Recommendation::Clear(DeploymentOption::OnPremise),
            )
            .await
            .unwrap();

        assert!(opinion.agreement);
        assert_eq!(opinion.suggested, Some(DeploymentOption::OnPremise));

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, Some(0.6));
        assert_eq!(calls[0].max_tokens, Some(1500));
        assert_eq!(calls[0].system_prompt.as_deref(), Some(advisor.system_prompt()));
        assert!(calls[0].messages[0]
            .content
            .starts_with("Вот какие критерии и приоритеты выбрал пользователь"));
    }

    #[tokio::test]
    async fn consult_times_out() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(200));
        let advisor = AdvisorService::new(
            Arc::new(provider),
            Arc::new(CriterionCatalog::builtin().clone()),
            AdvisorSettings {
                timeout: Duration::from_millis(20),
                ..Default::default()
            },
        );

        let result = advisor
            .consult(None, &input(), &Recommendation::Clear(DeploymentOption::OnPremise))
            .await;

        assert!(matches!(result, Err(AdvisorError::TimedOut(_))));
    }

    #[tokio::test]
    async fn consult_propagates_provider_errors() {
        let advisor = service(MockAIProvider::new().with_error(MockError::AuthenticationFailed));

        let result = advisor
            .consult(None, &input(), &Recommendation::Clear(DeploymentOption::OnPremise))
            .await;

        assert!(matches!(
            result,
            Err(AdvisorError::Provider(AIError::AuthenticationFailed))
        ));
    }

    #[tokio::test]
    async fn consult_rejects_blank_answer() {
        let advisor = service(MockAIProvider::new().with_response("   \n"));
        let result = advisor
            .consult(None, &input(), &Recommendation::Clear(DeploymentOption::OnPremise))
            .await;
        assert!(matches!(result, Err(AdvisorError::EmptyAnswer)));
    }
}
