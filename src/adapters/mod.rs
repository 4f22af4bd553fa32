//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `navigation` - Navigation sinks (recording, logging)
//! - `storage` - Fallback answer caches (in-memory, YAML file)
//! - `submission` - Assessment submitters (in-memory, HTTP)

pub mod navigation;
pub mod storage;
pub mod submission;

pub use navigation::{RecordingNavigator, TracingNavigator};
pub use storage::{FileAnswerCache, InMemoryAnswerCache};
pub use submission::{HttpSubmitter, HttpSubmitterConfig, InMemorySubmitter};
