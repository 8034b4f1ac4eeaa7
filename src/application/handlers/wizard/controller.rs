//! WizardController - drives wizard sessions from chat input.
//!
//! Input arrives as either free text (`/start`, `/reset`, anything else) or
//! a callback token from a button. Each input is applied to the chat's
//! session under a per-chat lock, and answered with a [`Reply`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error, info, warn};

use super::render::{self, OutgoingMessage, Reply, ReplyOutcome};
use crate::application::advisor::AdvisorService;
use crate::domain::catalog::CriterionCatalog;
use crate::domain::foundation::{ChatId, Timestamp};
use crate::domain::outcome::OutcomeRecord;
use crate::domain::scoring::ScoringEngine;
use crate::domain::wizard::{WeightOutcome, WizardAction, WizardError, WizardSession, WizardStep};
use crate::ports::{OutcomeRecorder, SessionStore};

/// A session together with the prompt it is waiting on.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub session: WizardSession,
    pub prompt: OutgoingMessage,
}

/// Chat commands understood as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Reset,
}

impl Command {
    fn parse(text: &str) -> Option<Self> {
        // Telegram-style `/start@bot_name` addresses a command to one bot.
        let word = text.split_whitespace().next()?;
        let word = word.split('@').next().unwrap_or(word);
        match word {
            "/start" => Some(Command::Start),
            "/reset" => Some(Command::Reset),
            _ => None,
        }
    }
}

/// Drives wizard sessions.
pub struct WizardController {
    catalog: Arc<CriterionCatalog>,
    sessions: Arc<dyn SessionStore>,
    outcomes: Arc<dyn OutcomeRecorder>,
    advisor: Arc<AdvisorService>,
    chat_locks: Mutex<HashMap<ChatId, Arc<Mutex<()>>>>,
}

impl WizardController {
    pub fn new(
        catalog: Arc<CriterionCatalog>,
        sessions: Arc<dyn SessionStore>,
        outcomes: Arc<dyn OutcomeRecorder>,
        advisor: Arc<AdvisorService>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            outcomes,
            advisor,
            chat_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &CriterionCatalog {
        &self.catalog
    }

    // ════════════════════════════════════════════════════════════════════════
    // Entry points
    // ════════════════════════════════════════════════════════════════════════

    /// Handles a text message.
    ///
    /// # Errors
    ///
    /// Only infrastructure failures (session store) are errors; bad input
    /// produces a `Rejected` reply.
    pub async fn handle_message(&self, chat_id: ChatId, text: &str) -> Result<Reply, WizardError> {
        let _guard = self.lock_chat(chat_id).await;

        if let Some(command) = Command::parse(text.trim()) {
            let session = WizardSession::start(chat_id);
            self.sessions.save(&session).await?;
            info!(chat_id = %chat_id, command = ?command, "wizard started");

            let notice = match command {
                Command::Start => render::GREETING,
                Command::Reset => render::RESET_NOTICE,
            };
            return Ok(Reply::new(
                ReplyOutcome::Started,
                vec![
                    OutgoingMessage::text(notice),
                    render::criteria_prompt(&session, &self.catalog),
                ],
            ));
        }

        match self.sessions.load(chat_id).await? {
            None => {
                self.sessions.save(&WizardSession::new(chat_id)).await?;
                debug!(chat_id = %chat_id, "first contact");
                Ok(Reply::new(
                    ReplyOutcome::Greeted,
                    vec![
                        OutgoingMessage::text(render::GREETING),
                        OutgoingMessage::text(render::START_HINT),
                    ],
                ))
            }
            Some(session) if session.step().is_active() => {
                let notice = if session.step() == WizardStep::EditingOverrideWeight {
                    render::USE_WEIGHT_BUTTONS
                } else {
                    render::USE_BUTTONS
                };
                Ok(self.rejected(&session, notice))
            }
            Some(_) => Ok(Reply::new(
                ReplyOutcome::Rejected,
                vec![OutgoingMessage::text(render::START_HINT)],
            )),
        }
    }

    /// Handles a button press carrying `data`.
    ///
    /// # Errors
    ///
    /// Only infrastructure failures are errors. Unknown, malformed, stale
    /// and out-of-range actions produce a `Rejected` reply and leave the
    /// session unchanged.
    pub async fn handle_callback(&self, chat_id: ChatId, data: &str) -> Result<Reply, WizardError> {
        let _guard = self.lock_chat(chat_id).await;

        let Some(mut session) = self.sessions.load(chat_id).await? else {
            warn!(chat_id = %chat_id, data, "callback without session");
            return Ok(Reply::new(
                ReplyOutcome::NoSession,
                vec![OutgoingMessage::text(render::NO_SESSION)],
            ));
        };

        let action = match WizardAction::parse(data) {
            Ok(action) => action,
            Err(err) => {
                debug!(chat_id = %chat_id, data, "unparseable callback");
                return Ok(self.rejected(&session, render::rejection_text(&err)));
            }
        };

        if let Err(err) = self.apply(&mut session, &action) {
            if !err.is_user_error() {
                return Err(err);
            }
            debug!(chat_id = %chat_id, action = %data, error = %err, "action rejected");
            return Ok(self.rejected(&session, render::rejection_text(&err)));
        }

        if session.step() == WizardStep::Computing {
            return self.finalize(session).await;
        }

        self.sessions.save(&session).await?;
        Ok(Reply::new(
            ReplyOutcome::Advanced,
            vec![render::current_prompt(&session, &self.catalog)],
        ))
    }

    /// The chat's session and its pending prompt, if any.
    pub async fn view(&self, chat_id: ChatId) -> Result<Option<SessionSnapshot>, WizardError> {
        let session = self.sessions.load(chat_id).await?;
        Ok(session.map(|session| {
            let prompt = render::current_prompt(&session, &self.catalog);
            SessionSnapshot { session, prompt }
        }))
    }

    /// Evicts sessions idle for longer than `ttl` and forgets their locks.
    ///
    /// A `ttl` reaching before the earliest representable time evicts nothing.
    pub async fn evict_idle(&self, ttl: Duration) -> Result<usize, WizardError> {
        let evicted = match Timestamp::now().checked_sub(ttl) {
            Some(cutoff) => self.sessions.evict_idle(cutoff).await?,
            None => 0,
        };

        let mut locks = self.chat_locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);

        if evicted > 0 {
            info!(evicted, "idle wizard sessions evicted");
        }
        Ok(evicted)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Internals
    // ════════════════════════════════════════════════════════════════════════

    async fn lock_chat(&self, chat_id: ChatId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.chat_locks.lock().await;
            locks.entry(chat_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    fn rejected(&self, session: &WizardSession, notice: &str) -> Reply {
        Reply::new(
            ReplyOutcome::Rejected,
            vec![
                OutgoingMessage::text(notice),
                render::current_prompt(session, &self.catalog),
            ],
        )
    }

    fn apply(&self, session: &mut WizardSession, action: &WizardAction) -> Result<(), WizardError> {
        let catalog = self.catalog.as_ref();
        match action {
            WizardAction::ToggleCriterion(index) => {
                session.toggle_criterion(catalog, *index)?;
            }
            WizardAction::FinishSelection => session.complete_selection()?,
            WizardAction::AssignPriority {
                criterion,
                priority,
            } => {
                session.assign_priority(catalog, *criterion, *priority)?;
            }
            WizardAction::ResolveSpecial { key, option } => {
                session.resolve_special(catalog, key, *option)?;
            }
            WizardAction::ConfirmOverride(wants) => {
                session.answer_override(*wants)?;
            }
            WizardAction::SelectOverrideTarget(index) => {
                session.begin_override(catalog, *index)?;
            }
            WizardAction::SetWeight { step, value } => {
                if let WeightOutcome::Committed(name) = session.set_override_weight(*step, *value)? {
                    debug!(chat_id = %session.chat_id(), criterion = %name, "override committed");
                }
            }
            WizardAction::CancelOverrideEdit => session.cancel_override()?,
            WizardAction::FinishOverrides => session.finish_overrides()?,
        }
        Ok(())
    }

    /// Scores the session, consults the advisor, records the outcome and
    /// discards the session.
    async fn finalize(&self, mut session: WizardSession) -> Result<Reply, WizardError> {
        let chat_id = session.chat_id();
        let input = session.scoring_input();
        let report = ScoringEngine::score(&self.catalog, &input)?;
        info!(
            chat_id = %chat_id,
            totals = %report.totals,
            recommendation = %report.recommendation,
            "wizard scored"
        );

        let mut messages = vec![
            OutgoingMessage::text(render::result_text(&report)),
            OutgoingMessage::text(render::details_text(&report)),
        ];

        let (advisor_answer, agreement) = match self
            .advisor
            .consult(Some(chat_id), &input, &report.recommendation)
            .await
        {
            Ok(opinion) => {
                messages.push(OutgoingMessage::text(render::advisor_text(&opinion.answer)));
                (Some(opinion.answer), opinion.agreement)
            }
            Err(err) => {
                warn!(chat_id = %chat_id, error = %err, "advisor unavailable");
                messages.push(OutgoingMessage::text(render::ADVISOR_UNAVAILABLE));
                (None, false)
            }
        };

        let record = OutcomeRecord::new(chat_id, input, &report, advisor_answer, agreement);
        if let Err(err) = self.outcomes.record(&record).await {
            error!(chat_id = %chat_id, record_id = %record.id, error = %err, "failed to record outcome");
            messages.push(OutgoingMessage::text(render::SAVE_FAILED));
        }

        session.complete()?;
        self.sessions.remove(chat_id).await?;
        messages.push(OutgoingMessage::text(render::START_HINT));

        Ok(Reply::new(ReplyOutcome::Completed, messages))
    }
}
