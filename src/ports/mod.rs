//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AssessmentSubmitter` - Persists a completed assessment
//! - `AnswerCache` - Local fallback cache for drafts and the current step
//! - `NavigationSink` - Receives navigation intents from the wizard

mod answer_cache;
mod assessment_submitter;
mod navigation;

pub use answer_cache::AnswerCache;
pub use assessment_submitter::{AssessmentSubmitter, SubmissionError};
pub use navigation::NavigationSink;
