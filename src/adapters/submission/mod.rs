//! Submission Adapters
//!
//! Implementations of the AssessmentSubmitter port.
//!
//! - **HttpSubmitter** - POSTs to a remote JSON API
//! - **InMemorySubmitter** - Stores in process memory, with failure injection for tests

mod http_submitter;
mod in_memory_submitter;

pub use http_submitter::{HttpSubmitter, HttpSubmitterConfig};
pub use in_memory_submitter::InMemorySubmitter;
