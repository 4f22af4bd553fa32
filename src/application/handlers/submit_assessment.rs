//! SubmitAssessmentHandler - normalize, complete and persist an assessment.
//!
//! Steps:
//! 1. Normalize the record (symptom lists, recommendation ids, stray values)
//! 2. Resolve the pattern (keep a valid one, else classify)
//! 3. Fill in recommendations if none are present
//! 4. Submit once through the `AssessmentSubmitter` port
//!
//! The handler never fails. A submission error yields
//! `AssessmentOutcome::Unpersisted` carrying the normalized record, so the
//! result can still be shown.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::assessment::{
    complete, normalize_draft, AssessmentAnswer, AssessmentDraft, AssessmentOutcome,
    CompletedAssessment, SubmissionPayload,
};
use crate::domain::foundation::UserId;
use crate::ports::AssessmentSubmitter;

/// What is being submitted.
#[derive(Debug, Clone)]
pub enum SubmissionSource {
    /// A typed record, e.g. a store snapshot.
    Answer(AssessmentAnswer),
    /// A loosely-typed record from outside the type system.
    Draft(AssessmentDraft),
}

/// Command to submit a finished assessment.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentCommand {
    pub source: SubmissionSource,
    pub owner: Option<UserId>,
}

impl SubmitAssessmentCommand {
    pub fn from_answer(answer: AssessmentAnswer) -> Self {
        Self {
            source: SubmissionSource::Answer(answer),
            owner: None,
        }
    }

    pub fn from_draft(draft: AssessmentDraft) -> Self {
        Self {
            source: SubmissionSource::Draft(draft),
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: Option<UserId>) -> Self {
        self.owner = owner;
        self
    }
}

/// Handler for the submit pipeline.
pub struct SubmitAssessmentHandler {
    submitter: Arc<dyn AssessmentSubmitter>,
}

impl SubmitAssessmentHandler {
    pub fn new(submitter: Arc<dyn AssessmentSubmitter>) -> Self {
        Self { submitter }
    }

    /// Builds the normalized, complete record without submitting it.
    pub fn prepare(source: &SubmissionSource) -> CompletedAssessment {
        match source {
            SubmissionSource::Answer(answer) => complete(answer),
            SubmissionSource::Draft(draft) => complete(&normalize_draft(draft)),
        }
    }

    pub async fn handle(&self, cmd: SubmitAssessmentCommand) -> AssessmentOutcome {
        let assessment = Self::prepare(&cmd.source);
        let payload = SubmissionPayload::new(assessment.clone(), cmd.owner);

        match self.submitter.submit(payload).await {
            Ok(saved) => {
                info!(
                    assessment_id = %saved.id,
                    pattern = %saved.assessment.pattern,
                    "Assessment saved"
                );
                AssessmentOutcome::Persisted(saved)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    transient = err.is_transient(),
                    pattern = %assessment.pattern,
                    "Assessment not saved, continuing with unsaved result"
                );
                AssessmentOutcome::Unpersisted {
                    assessment,
                    reason: err.to_string(),
                }
            }
        }
    }
}
