//! Assessment domain module.
//!
//! Collects answers to the six-step menstrual health questionnaire,
//! classifies the cycle into one of five patterns and selects advice from a
//! fixed catalog.
//!
//! # Components
//!
//! - `ResultStore` - the in-progress answer record, mutated through actions
//! - `StepAccessor` - per-step read/write views over the store
//! - `PatternClassifier` - pure, ordered rules mapping answers to a `Pattern`
//! - `RecommendationEngine` - baseline plus pattern-specific advice
//! - `normalize_draft` / `complete` - turn loose input into a submission-ready record
//! - `WizardSequencer` - the questionnaire and post-questionnaire state machine

mod macros;

mod answers;
mod errors;
mod normalization;
mod pattern;
mod recommendation;
mod steps;
mod store;
mod submission;
mod wizard;

pub use answers::{
    emotional, physical, AgeRange, AnswerOption, AnswerPatch, AssessmentAnswer, CycleLength,
    FlowHeaviness, PainLevel, PeriodDuration, SymptomSelection,
};
pub use errors::WizardError;
pub use normalization::{
    complete, normalize_answer, normalize_draft, AssessmentDraft, CompletedAssessment,
};
pub use pattern::{
    Classification, ClassificationRule, Pattern, PatternClassifier, HEAVY_SIGNAL_SYMPTOMS,
    PAIN_SIGNAL_SYMPTOMS,
};
pub use recommendation::{
    CatalogEntry, CatalogKey, Recommendation, RecommendationCatalog, RecommendationEngine,
};
pub use steps::{
    AgeField, AnswerField, CycleLengthField, FlowHeavinessField, PainLevelField,
    PeriodDurationField, StepAccessor, SymptomsField, WizardStep,
};
pub use store::{ResultAction, ResultStore};
pub use submission::{AssessmentOutcome, AuditFields, PersistedAssessment, SubmissionPayload};
pub use wizard::{Advance, NavigationIntent, WizardSequencer, WizardState};
