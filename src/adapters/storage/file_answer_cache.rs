//! File-based Answer Cache Adapter
//!
//! Stores all cache entries as a single YAML mapping on disk, so a
//! questionnaire interrupted by a restart can resume.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::DomainError;
use crate::ports::AnswerCache;

type Entries = BTreeMap<String, String>;

/// File-backed key/value cache
#[derive(Debug, Clone)]
pub struct FileAnswerCache {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    lock: Arc<Mutex<()>>,
}

impl FileAnswerCache {
    /// Create a cache stored at `path`
    ///
    /// # Example
    /// ```ignore
    /// let cache = FileAnswerCache::new("./data/assessment-cache.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self, key: &str) -> Result<Entries, DomainError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let yaml = fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::cache(key, format!("read failed: {}", e)))?;

        if yaml.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_yaml::from_str(&yaml)
            .map_err(|e| DomainError::cache(key, format!("corrupt cache file: {}", e)))
    }

    async fn store(&self, key: &str, entries: &Entries) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::cache(key, format!("create dir failed: {}", e)))?;
        }

        let yaml = serde_yaml::to_string(entries)
            .map_err(|e| DomainError::cache(key, format!("serialization failed: {}", e)))?;

        // Write to a sibling file first so readers never see a partial mapping.
        let tmp = self.path.with_extension("yaml.tmp");
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| DomainError::cache(key, format!("write failed: {}", e)))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DomainError::cache(key, format!("rename failed: {}", e)))
    }
}

#[async_trait]
impl AnswerCache for FileAnswerCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.load(key).await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load(key).await?;
        entries.insert(key.to_string(), value.to_string());
        self.store(key, &entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load(key).await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.store(key, &entries).await
    }
}
