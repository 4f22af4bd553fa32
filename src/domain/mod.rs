//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `assessment` - Questionnaire answers, pattern classification, recommendations
//!   and the wizard lifecycle

pub mod assessment;
pub mod foundation;
