//! Telemetry configuration (log filter and output format)

use serde::Deserialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::error::ValidationError;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl TelemetryConfig {
    fn env_filter(&self) -> Result<EnvFilter, ValidationError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }

    /// Validate telemetry configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.env_filter().map(|_| ())
    }

    /// Installs the global subscriber.
    ///
    /// Returns `Ok(false)` when a subscriber was already installed, so calling
    /// this more than once is harmless.
    pub fn init(&self) -> Result<bool, ValidationError> {
        let filter = self.env_filter()?;
        let (plain, json) = if self.json {
            (None, Some(fmt::layer().json()))
        } else {
            (Some(fmt::layer()), None)
        };

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(plain)
            .with(json)
            .try_init()
            .is_ok();
        Ok(installed)
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info,cycle_assessment=debug".to_string()
}
