//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CYCLE_ASSESSMENT`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use cycle_assessment::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.telemetry.init().expect("Invalid log filter");
//! ```

mod cache;
mod error;
mod submission;
mod telemetry;

pub use cache::{CacheBackend, CacheConfig};
pub use error::{ConfigError, ValidationError};
pub use submission::SubmissionConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// local setup: in-memory submitter, in-memory cache, plain logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote persistence API
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// Fallback answer cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CYCLE_ASSESSMENT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CYCLE_ASSESSMENT__SUBMISSION__BASE_URL=https://...` -> `submission.base_url`
    /// - `CYCLE_ASSESSMENT__CACHE__BACKEND=file` -> `cache.backend`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CYCLE_ASSESSMENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.submission.validate()?;
        self.cache.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Load and validate in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}
