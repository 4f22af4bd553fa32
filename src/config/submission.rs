//! Submission configuration (remote persistence API)

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_TIMEOUT_SECS: u64 = 120;

/// Where finished assessments are sent.
///
/// Without a `base_url` the assessments are kept in memory only.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    /// Base URL of the persistence API
    pub base_url: Option<String>,

    /// Bearer token for the persistence API
    pub api_token: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SubmissionConfig {
    /// Returns true when a remote API is configured.
    pub fn is_remote(&self) -> bool {
        self.base_url
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate submission configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = self.base_url.as_deref().map(str::trim) {
            if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidBaseUrl);
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    15
}
