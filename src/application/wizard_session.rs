//! WizardSession - one user's pass through the questionnaire.
//!
//! Owns the [`ResultStore`] and [`WizardSequencer`] behind a single async
//! mutex and talks to the outside through three ports: the submitter, an
//! optional fallback cache, and a navigation sink.
//!
//! # Concurrency
//!
//! The lock is never held across the submission call. A `submitting` flag
//! turns concurrent duplicate submits into `SubmitOutcome::AlreadySubmitting`.
//! Each abandon/reset bumps a generation counter; a submission response that
//! comes back for an older generation is dropped without touching state.
//!
//! # Cache
//!
//! After every answer the draft and current step are written to the cache,
//! and `resume` reads them back. Cache failures are logged and ignored.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::handlers::{SubmitAssessmentCommand, SubmitAssessmentHandler};
use crate::domain::assessment::{
    normalize_draft, Advance, AgeField, AgeRange, AnswerField, AnswerPatch, AssessmentAnswer,
    AssessmentDraft, AssessmentOutcome, CycleLength, CycleLengthField, FlowHeaviness,
    FlowHeavinessField, NavigationIntent, PainLevel, PainLevelField, PeriodDuration,
    PeriodDurationField, ResultStore, SymptomSelection, SymptomsField, WizardError,
    WizardSequencer, WizardState, WizardStep,
};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{AnswerCache, AssessmentSubmitter, NavigationSink};

/// Cache key holding the JSON draft.
pub const DRAFT_CACHE_KEY: &str = "cycle-assessment.draft";
/// Cache key holding the current step.
pub const STEP_CACHE_KEY: &str = "cycle-assessment.step";

/// Result of `continue_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The current step is unanswered; nothing changed.
    Blocked(WizardStep),
    /// Moved on to the given step.
    Moved(WizardStep),
    /// Pattern and recommendations are in place; `submit` may be called.
    ReadyToSubmit,
    /// Classification or recommendation could not finish.
    Stalled(WizardState),
}

/// Result of `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The attempt finished, saved or degraded.
    Completed(AssessmentOutcome),
    /// Another submission for this session is in flight.
    AlreadySubmitting,
    /// The session was abandoned while the submission was in flight.
    Abandoned,
}

impl SubmitOutcome {
    /// The outcome as a `DomainError`, for callers that report errors by code.
    ///
    /// `None` for a saved assessment or an abandoned session.
    pub fn error(&self) -> Option<DomainError> {
        match self {
            SubmitOutcome::AlreadySubmitting => Some(DomainError::new(
                ErrorCode::SubmissionInProgress,
                "An assessment submission is already in flight",
            )),
            SubmitOutcome::Completed(AssessmentOutcome::Unpersisted { reason, .. }) => Some(
                DomainError::new(ErrorCode::SubmissionFailed, "Assessment was not saved")
                    .with_detail("reason", reason.clone()),
            ),
            SubmitOutcome::Completed(AssessmentOutcome::Persisted(_)) | SubmitOutcome::Abandoned => {
                None
            }
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    store: ResultStore,
    wizard: WizardSequencer,
    submitting: bool,
    generation: u64,
    outcome: Option<AssessmentOutcome>,
}

pub struct WizardSession {
    state: Mutex<SessionState>,
    handler: SubmitAssessmentHandler,
    cache: Option<Arc<dyn AnswerCache>>,
    navigator: Arc<dyn NavigationSink>,
    owner: Option<UserId>,
}

impl WizardSession {
    /// Starts an empty session on the first step.
    pub fn new(submitter: Arc<dyn AssessmentSubmitter>, navigator: Arc<dyn NavigationSink>) -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            handler: SubmitAssessmentHandler::new(submitter),
            cache: None,
            navigator,
            owner: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn AnswerCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_owner(mut self, owner: Option<UserId>) -> Self {
        self.owner = owner;
        self
    }

    // ════════════════════════════════════════════════════════════════════════
    // Start / resume
    // ════════════════════════════════════════════════════════════════════════

    /// Opens the questionnaire: resumes a cached draft if there is one,
    /// otherwise shows the current step. Returns the step shown.
    pub async fn start(&self) -> Result<WizardStep, WizardError> {
        let restored = self.resume().await?;
        let current = self.state().await;
        let Some(step) = current.step() else {
            return Err(WizardError::not_available("start", current));
        };
        if !restored {
            self.navigator.navigate(NavigationIntent::ToStep(step));
        }
        Ok(step)
    }

    /// Restores a draft and step from the cache.
    ///
    /// The draft is normalized on the way in, so a stale or foreign pattern
    /// is dropped and recomputed later. The cached step is clamped to the
    /// first unanswered required step. Returns true if a draft was restored.
    pub async fn resume(&self) -> Result<bool, WizardError> {
        let Some(draft_text) = self.cache_get(DRAFT_CACHE_KEY).await else {
            return Ok(false);
        };

        let draft = match AssessmentDraft::from_json(&draft_text) {
            Ok(draft) => draft,
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable cached draft");
                return Ok(false);
            }
        };
        let answer = normalize_draft(&draft);

        let cached_step = self
            .cache_get(STEP_CACHE_KEY)
            .await
            .and_then(|s| WizardStep::parse(&s))
            .unwrap_or_else(WizardStep::first);
        let step = resume_step(cached_step, &answer);

        {
            let mut state = self.state.lock().await;
            if !state.wizard.state().is_questionnaire() || state.submitting {
                return Err(WizardError::not_available("resume", state.wizard.state()));
            }
            state.store.reset_result();
            state.store.update_result(AnswerPatch::from(answer));
            state.wizard = WizardSequencer::resume_at(step);
            state.outcome = None;
            info!(step = %step, generation = state.generation, "Resumed cached assessment");
        }

        self.navigator.navigate(NavigationIntent::ToStep(step));
        Ok(true)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Answers
    // ════════════════════════════════════════════════════════════════════════

    pub async fn answer_age(&self, value: AgeRange) -> Result<bool, WizardError> {
        self.answer::<AgeField>(value).await
    }

    pub async fn answer_cycle_length(&self, value: CycleLength) -> Result<bool, WizardError> {
        self.answer::<CycleLengthField>(value).await
    }

    pub async fn answer_period_duration(&self, value: PeriodDuration) -> Result<bool, WizardError> {
        self.answer::<PeriodDurationField>(value).await
    }

    pub async fn answer_flow_heaviness(&self, value: FlowHeaviness) -> Result<bool, WizardError> {
        self.answer::<FlowHeavinessField>(value).await
    }

    pub async fn answer_pain_level(&self, value: PainLevel) -> Result<bool, WizardError> {
        self.answer::<PainLevelField>(value).await
    }

    pub async fn answer_symptoms(&self, value: SymptomSelection) -> Result<bool, WizardError> {
        self.answer::<SymptomsField>(value).await
    }

    /// Writes one step's value. Returns true if the record changed.
    async fn answer<F: AnswerField>(&self, value: F::Value) -> Result<bool, WizardError> {
        let (changed, draft, step) = {
            let mut state = self.state.lock().await;
            let current = state.wizard.state();
            let Some(step) = current.step() else {
                return Err(WizardError::not_available("answer", current));
            };
            let changed = state.store.accessor::<F>().set_value(value);
            let answered = F::STEP;
            debug!(step = %answered, changed, "Recorded answer");
            (changed, state.store.snapshot(), step)
        };

        if changed {
            self.persist_progress(draft.as_ref(), step).await;
        }
        Ok(changed)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Navigation
    // ════════════════════════════════════════════════════════════════════════

    /// Guarded forward move. After the last step this classifies, generates
    /// recommendations and leaves the session ready to submit.
    pub async fn continue_step(&self) -> Result<StepOutcome, WizardError> {
        let (outcome, draft) = {
            let mut state = self.state.lock().await;
            let SessionState { store, wizard, .. } = &mut *state;
            let outcome = match wizard.advance(store)? {
                Advance::Blocked(step) => StepOutcome::Blocked(step),
                Advance::Moved(step) => StepOutcome::Moved(step),
                Advance::ReadyToSave => StepOutcome::ReadyToSubmit,
                Advance::Stalled(at) => StepOutcome::Stalled(at),
            };
            (outcome, store.snapshot())
        };

        if let StepOutcome::Moved(step) = outcome {
            self.navigator.navigate(NavigationIntent::ToStep(step));
            self.persist_progress(draft.as_ref(), step).await;
        }
        Ok(outcome)
    }

    /// Moves back one step (no-op on the first step).
    pub async fn go_back(&self) -> Result<WizardStep, WizardError> {
        let (step, draft) = {
            let mut state = self.state.lock().await;
            let step = state.wizard.go_back()?;
            (step, state.store.snapshot())
        };

        self.navigator.navigate(NavigationIntent::ToStep(step));
        self.persist_progress(draft.as_ref(), step).await;
        Ok(step)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Submission
    // ════════════════════════════════════════════════════════════════════════

    /// Submits the completed record once.
    ///
    /// On success the wizard ends in `Done` and navigates to the results
    /// view with the new id; on failure it ends in `DoneDegraded` and
    /// navigates without one. Either way the record is cleared afterwards and
    /// the outcome stays available from [`outcome`](Self::outcome).
    pub async fn submit(&self) -> Result<SubmitOutcome, WizardError> {
        let (answer, generation) = {
            let mut state = self.state.lock().await;
            if state.submitting {
                debug!(generation = state.generation, "Duplicate submit ignored");
                return Ok(SubmitOutcome::AlreadySubmitting);
            }
            let current = state.wizard.state();
            if current != WizardState::Saving {
                return Err(WizardError::not_available("submit", current));
            }
            let Some(answer) = state.store.snapshot() else {
                return Err(WizardError::not_available("submit", current));
            };
            state.submitting = true;
            (answer, state.generation)
        };

        let cmd = SubmitAssessmentCommand::from_answer(answer).with_owner(self.owner.clone());
        let outcome = self.handler.handle(cmd).await;

        let intent = {
            let mut state = self.state.lock().await;
            if state.generation != generation {
                info!(
                    generation,
                    current = state.generation,
                    "Discarding submission result for abandoned session"
                );
                return Ok(SubmitOutcome::Abandoned);
            }

            state.submitting = false;
            let terminal = state.wizard.finish_saving(outcome.is_persisted())?;
            state.store.reset_result();
            state.outcome = Some(outcome.clone());
            info!(
                state = %terminal,
                assessment_id = ?outcome.assessment_id(),
                generation,
                "Assessment finished"
            );
            NavigationIntent::ToResults {
                assessment_id: outcome.assessment_id(),
            }
        };

        self.navigator.navigate(intent);
        self.clear_cache().await;
        Ok(SubmitOutcome::Completed(outcome))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Abandon / reset
    // ════════════════════════════════════════════════════════════════════════

    /// Drops all progress. An in-flight submission's result will be ignored.
    pub async fn abandon(&self) {
        {
            let mut state = self.state.lock().await;
            let generation = state.generation + 1;
            *state = SessionState {
                generation,
                ..SessionState::default()
            };
            info!(generation, "Assessment abandoned");
        }
        self.clear_cache().await;
    }

    /// Abandons and sends the user back to the first step.
    pub async fn reset(&self) {
        self.abandon().await;
        self.navigator
            .navigate(NavigationIntent::ToStep(WizardStep::first()));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Reads
    // ════════════════════════════════════════════════════════════════════════

    /// Owned copy of the in-progress record.
    pub async fn snapshot(&self) -> Option<AssessmentAnswer> {
        self.state.lock().await.store.snapshot()
    }

    pub async fn state(&self) -> WizardState {
        self.state.lock().await.wizard.state()
    }

    pub async fn current_step(&self) -> Option<WizardStep> {
        self.state.lock().await.wizard.current_step()
    }

    pub async fn can_continue(&self) -> bool {
        let state = self.state.lock().await;
        state.wizard.can_continue(&state.store)
    }

    /// Result of the last finished submission.
    pub async fn outcome(&self) -> Option<AssessmentOutcome> {
        self.state.lock().await.outcome.clone()
    }

    pub async fn revision(&self) -> u64 {
        self.state.lock().await.store.revision()
    }

    pub async fn is_submitting(&self) -> bool {
        self.state.lock().await.submitting
    }

    // ════════════════════════════════════════════════════════════════════════
    // Cache helpers
    // ════════════════════════════════════════════════════════════════════════

    async fn cache_get(&self, key: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        match cache.get(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, key, "Cache read failed");
                None
            }
        }
    }

    async fn persist_progress(&self, draft: Option<&AssessmentAnswer>, step: WizardStep) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };

        if let Some(answer) = draft {
            match serde_json::to_string(answer) {
                Ok(json) => {
                    if let Err(err) = cache.set(DRAFT_CACHE_KEY, &json).await {
                        warn!(error = %err, "Cache write failed");
                    }
                }
                Err(err) => warn!(error = %err, "Could not serialize draft"),
            }
        }

        if let Err(err) = cache.set(STEP_CACHE_KEY, step.as_str()).await {
            warn!(error = %err, "Cache write failed");
        }
    }

    async fn clear_cache(&self) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };
        for key in [DRAFT_CACHE_KEY, STEP_CACHE_KEY] {
            if let Err(err) = cache.remove(key).await {
                warn!(error = %err, key, "Cache removal failed");
            }
        }
    }
}

/// The cached step, pulled back to the first unanswered required step.
fn resume_step(cached: WizardStep, answer: &AssessmentAnswer) -> WizardStep {
    WizardStep::ORDER
        .into_iter()
        .take_while(|step| *step != cached)
        .find(|step| !step.is_answered(Some(answer)))
        .unwrap_or(cached)
}
