//! Storage Adapters
//!
//! Implementations of the AnswerCache port for the local fallback cache.
//!
//! ## Available Adapters
//!
//! - **FileAnswerCache** - Stores entries in a YAML file on disk
//! - **InMemoryAnswerCache** - Stores entries in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileAnswerCache, InMemoryAnswerCache};
//!
//! // Survives restarts
//! let cache = FileAnswerCache::new("./data/assessment-cache.yaml");
//!
//! // Process lifetime only
//! let cache = InMemoryAnswerCache::new();
//! ```

mod file_answer_cache;
mod in_memory_answer_cache;

pub use file_answer_cache::FileAnswerCache;
pub use in_memory_answer_cache::InMemoryAnswerCache;
