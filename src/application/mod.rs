//! Application layer - Commands, Handlers, and the wizard session.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod wizard_session;

pub use handlers::{SubmissionSource, SubmitAssessmentCommand, SubmitAssessmentHandler};
pub use wizard_session::{
    StepOutcome, SubmitOutcome, WizardSession, DRAFT_CACHE_KEY, STEP_CACHE_KEY,
};
