//! Answer Cache Port - Interface for the local fallback cache.
//!
//! Holds the in-progress draft and current step between visits so an
//! interrupted questionnaire can resume. Values are opaque strings; the
//! session decides what goes in them.
//!
//! Absence of a cache behaves as an always-empty one, and callers log and
//! ignore errors from it.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Port for a small key/value store.
#[async_trait]
pub trait AnswerCache: Send + Sync {
    /// Returns the stored value, `None` if the key is unknown.
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Deletes a key. Deleting an unknown key is not an error.
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}
