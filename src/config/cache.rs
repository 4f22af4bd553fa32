//! Fallback answer cache configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which answer cache backs the wizard session.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// No cache; every session starts empty.
    None,
    #[default]
    Memory,
    /// YAML file at `cache.path`.
    File,
}

/// Cache configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// File location, required for the file backend
    pub path: Option<String>,
}

impl CacheConfig {
    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == CacheBackend::File
            && self.path.as_deref().map_or(true, |p| p.trim().is_empty())
        {
            return Err(ValidationError::MissingRequired("cache.path"));
        }
        Ok(())
    }
}
