//! Bootstrap - wires configured adapters into a `WizardSession`.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::adapters::{
    FileAnswerCache, HttpSubmitter, HttpSubmitterConfig, InMemoryAnswerCache, InMemorySubmitter,
};
use crate::application::WizardSession;
use crate::config::{AppConfig, CacheBackend, ValidationError};
use crate::ports::{AnswerCache, AssessmentSubmitter, NavigationSink, SubmissionError};

/// Errors raised while assembling a session from configuration.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("Failed to create submitter: {0}")]
    Submitter(#[from] SubmissionError),
}

/// Builds the submitter selected by `submission.base_url`.
pub fn build_submitter(config: &AppConfig) -> Result<Arc<dyn AssessmentSubmitter>, BootstrapError> {
    match config.submission.base_url.as_deref().map(str::trim) {
        Some(base_url) if !base_url.is_empty() => {
            let http_config = HttpSubmitterConfig::new(base_url)
                .with_secret_token(config.submission.api_token.clone())
                .with_timeout(config.submission.timeout());
            info!(base_url = %http_config.base_url, "Using HTTP assessment submitter");
            let submitter: Arc<dyn AssessmentSubmitter> = Arc::new(HttpSubmitter::new(http_config)?);
            Ok(submitter)
        }
        _ => {
            info!("No submission API configured, keeping assessments in memory");
            let submitter: Arc<dyn AssessmentSubmitter> = Arc::new(InMemorySubmitter::untracked());
            Ok(submitter)
        }
    }
}

/// Builds the answer cache selected by `cache.backend`.
pub fn build_cache(config: &AppConfig) -> Result<Option<Arc<dyn AnswerCache>>, BootstrapError> {
    let cache: Option<Arc<dyn AnswerCache>> = match config.cache.backend {
        CacheBackend::None => None,
        CacheBackend::Memory => Some(Arc::new(InMemoryAnswerCache::new()) as Arc<dyn AnswerCache>),
        CacheBackend::File => {
            let path = config
                .cache
                .path
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .ok_or(ValidationError::MissingRequired("cache.path"))?;
            Some(Arc::new(FileAnswerCache::new(path)) as Arc<dyn AnswerCache>)
        }
    };
    Ok(cache)
}

/// Validates the configuration and assembles a ready-to-use session.
pub fn build_session(
    config: &AppConfig,
    navigator: Arc<dyn NavigationSink>,
) -> Result<WizardSession, BootstrapError> {
    config.validate()?;

    let submitter = build_submitter(config)?;
    let session = WizardSession::new(submitter, navigator);
    Ok(match build_cache(config)? {
        Some(cache) => session.with_cache(cache),
        None => session,
    })
}
