//! Wizard lifecycle: step sequencing and the post-questionnaire pipeline.
//!
//! # State Machine
//!
//! ```text
//! Step(Age) <-> Step(CycleLength) <-> ... <-> Step(Symptoms)
//!                                                   │
//!                                                   ▼
//!                       Classifying ──► Recommending ──► Saving ──► Done
//!                                                          │
//!                                                          └──► DoneDegraded
//! ```
//!
//! Forward moves between steps are guarded by the step being answered
//! (the symptoms step has no guard). Backward moves are unguarded.
//! `Classifying` and `Recommending` advance once their field is present in
//! the store. `Done` and `DoneDegraded` are terminal.

use std::fmt;

use tracing::{debug, info};

use super::errors::WizardError;
use super::store::ResultStore;
use super::{PatternClassifier, RecommendationEngine, WizardStep};
use crate::domain::foundation::{AssessmentId, StateMachine};

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardState {
    Step(WizardStep),
    Classifying,
    Recommending,
    Saving,
    Done,
    DoneDegraded,
}

impl WizardState {
    pub fn initial() -> Self {
        WizardState::Step(WizardStep::first())
    }

    pub fn step(&self) -> Option<WizardStep> {
        match self {
            WizardState::Step(step) => Some(*step),
            _ => None,
        }
    }

    pub fn is_questionnaire(&self) -> bool {
        matches!(self, WizardState::Step(_))
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::initial()
    }
}

impl StateMachine for WizardState {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            WizardState::Step(step) => {
                let forward = match step.next() {
                    Some(next) => WizardState::Step(next),
                    None => WizardState::Classifying,
                };
                let mut targets = vec![forward];
                targets.extend(step.previous().map(WizardState::Step));
                targets
            }
            WizardState::Classifying => vec![WizardState::Recommending],
            WizardState::Recommending => vec![WizardState::Saving],
            WizardState::Saving => vec![WizardState::Done, WizardState::DoneDegraded],
            WizardState::Done | WizardState::DoneDegraded => vec![],
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardState::Step(step) => write!(f, "step:{}", step),
            WizardState::Classifying => write!(f, "classifying"),
            WizardState::Recommending => write!(f, "recommending"),
            WizardState::Saving => write!(f, "saving"),
            WizardState::Done => write!(f, "done"),
            WizardState::DoneDegraded => write!(f, "done-degraded"),
        }
    }
}

/// A navigation request emitted towards the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    ToStep(WizardStep),
    /// Results view. The id is absent on the degraded path.
    ToResults { assessment_id: Option<AssessmentId> },
}

/// Result of a forward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current step has no answer yet; nothing changed.
    Blocked(WizardStep),
    /// Moved to the given step.
    Moved(WizardStep),
    /// Classification and recommendation finished; ready to submit.
    ReadyToSave,
    /// The pipeline could not finish from the given state.
    Stalled(WizardState),
}

/// Drives [`WizardState`] against a [`ResultStore`].
#[derive(Debug, Clone, Default)]
pub struct WizardSequencer {
    state: WizardState,
}

impl WizardSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts at `step` instead of the first step, e.g. when restoring a
    /// cached draft.
    pub fn resume_at(step: WizardStep) -> Self {
        Self {
            state: WizardState::Step(step),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn current_step(&self) -> Option<WizardStep> {
        self.state.step()
    }

    /// True when the current step's guard is satisfied.
    pub fn can_continue(&self, store: &ResultStore) -> bool {
        match self.state {
            WizardState::Step(step) => step.is_answered(store.record()),
            _ => false,
        }
    }

    /// Moves forward one step. After the last step this runs
    /// classification and recommendation and stops at `Saving`.
    pub fn advance(&mut self, store: &mut ResultStore) -> Result<Advance, WizardError> {
        let WizardState::Step(step) = self.state else {
            return Err(WizardError::not_available("advance", self.state));
        };

        if !step.is_answered(store.record()) {
            debug!(step = %step, "Continue blocked on unanswered step");
            return Ok(Advance::Blocked(step));
        }

        match step.next() {
            Some(next) => {
                self.state = self.state.transition_to(WizardState::Step(next))?;
                debug!(from = %step, to = %next, "Advanced wizard step");
                Ok(Advance::Moved(next))
            }
            None => {
                self.state = self.state.transition_to(WizardState::Classifying)?;
                match self.drive(store)? {
                    WizardState::Saving => Ok(Advance::ReadyToSave),
                    other => Ok(Advance::Stalled(other)),
                }
            }
        }
    }

    /// Moves back one step. Stays put on the first step.
    pub fn go_back(&mut self) -> Result<WizardStep, WizardError> {
        let WizardState::Step(step) = self.state else {
            return Err(WizardError::not_available("go back", self.state));
        };

        match step.previous() {
            Some(previous) => {
                self.state = self.state.transition_to(WizardState::Step(previous))?;
                Ok(previous)
            }
            None => Ok(step),
        }
    }

    /// Runs the classify and recommend stages from the current state.
    ///
    /// Writes reach the store only when the computed value differs from the
    /// stored one, so re-running on an unchanged record leaves its revision
    /// untouched. Returns the state reached.
    pub fn drive(&mut self, store: &mut ResultStore) -> Result<WizardState, WizardError> {
        loop {
            match self.state {
                WizardState::Classifying => {
                    let Some(record) = store.record() else {
                        debug!("No answers recorded; classification stalled");
                        return Ok(self.state);
                    };
                    let classification = PatternClassifier::classify_with_rule(record);
                    let changed = store.set_pattern(classification.pattern);
                    info!(
                        pattern = %classification.pattern,
                        rule = %classification.rule,
                        changed,
                        "Classified cycle pattern"
                    );

                    if store.record().and_then(|r| r.pattern).is_none() {
                        return Ok(self.state);
                    }
                    self.state = self.state.transition_to(WizardState::Recommending)?;
                }
                WizardState::Recommending => {
                    let Some(record) = store.record() else {
                        return Ok(self.state);
                    };
                    let recommendations = RecommendationEngine::generate_for(record);
                    let count = recommendations.len();
                    let changed = store.set_recommendations(recommendations);
                    debug!(count, changed, "Generated recommendations");

                    let ready = store
                        .record()
                        .and_then(|r| r.recommendations.as_ref())
                        .is_some_and(|recs| !recs.is_empty());
                    if !ready {
                        return Ok(self.state);
                    }
                    self.state = self.state.transition_to(WizardState::Saving)?;
                }
                state => return Ok(state),
            }
        }
    }

    /// Records the outcome of the submission attempt.
    pub fn finish_saving(&mut self, persisted: bool) -> Result<WizardState, WizardError> {
        if self.state != WizardState::Saving {
            return Err(WizardError::not_available("finish saving", self.state));
        }
        let target = if persisted {
            WizardState::Done
        } else {
            WizardState::DoneDegraded
        };
        self.state = self.state.transition_to(target)?;
        Ok(self.state)
    }
}
