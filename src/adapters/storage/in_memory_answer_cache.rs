//! In-Memory Answer Cache Adapter
//!
//! Keeps cached drafts in memory for the lifetime of the process.
//! Useful for testing and for hosts without local storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::AnswerCache;

/// In-memory key/value cache
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnswerCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryAnswerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the cache (useful for tests)
    ///
    /// # Panics
    ///
    /// Seeding a cache whose clones are already shared waits on the lock with
    /// `blocking_write`, which panics when called from inside an async runtime.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let (key, value) = (key.into(), value.into());
        match Arc::get_mut(&mut self.entries) {
            Some(entries) => {
                entries.get_mut().insert(key, value);
            }
            None => {
                self.entries.blocking_write().insert(key, value);
            }
        }
        self
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl AnswerCache for InMemoryAnswerCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_unknown_key_returns_none() {
        let cache = InMemoryAnswerCache::new();
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let cache = InMemoryAnswerCache::new();
        cache.set("draft", "{}").await.unwrap();
        assert_eq!(cache.get("draft").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let cache = InMemoryAnswerCache::new();
        cache.set("step", "age").await.unwrap();
        cache.set("step", "symptoms").await.unwrap();
        assert_eq!(cache.get("step").await.unwrap().as_deref(), Some("symptoms"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_unknown_keys() {
        let cache = InMemoryAnswerCache::new().with_entry("draft", "{}");
        cache.remove("draft").await.unwrap();
        cache.remove("draft").await.unwrap();
        assert!(cache.is_empty().await);
    }

    #[test]
    fn seeding_waits_for_a_held_lock() {
        let cache = InMemoryAnswerCache::new();
        let shared = cache.clone();
        let (locked_tx, locked_rx) = std::sync::mpsc::channel();
        let reader = std::thread::spawn(move || {
            let _guard = shared.entries.blocking_read();
            locked_tx.send(()).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(30));
        });
        locked_rx.recv().unwrap();

        let cache = cache.with_entry("draft", "{}");
        reader.join().unwrap();

        assert_eq!(
            cache.entries.blocking_read().get("draft").map(String::as_str),
            Some("{}")
        );
    }

    #[test]
    fn seeding_an_unshared_cache_needs_no_lock() {
        let cache = InMemoryAnswerCache::new()
            .with_entry("draft", "{}")
            .with_entry("step", "age");
        assert_eq!(cache.entries.blocking_read().len(), 2);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let cache = InMemoryAnswerCache::new();
        let other = cache.clone();
        cache.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
