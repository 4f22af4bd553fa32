//! Command handlers.

mod submit_assessment;

pub use submit_assessment::{SubmissionSource, SubmitAssessmentCommand, SubmitAssessmentHandler};
