//! Assessment Submitter Port - Interface for persisting completed assessments.
//!
//! The submit pipeline calls this exactly once per attempt and never retries.
//! Any error turns into a degraded (unpersisted) outcome.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct AlwaysSaves;
//!
//! #[async_trait]
//! impl AssessmentSubmitter for AlwaysSaves {
//!     async fn submit(
//!         &self,
//!         payload: SubmissionPayload,
//!     ) -> Result<PersistedAssessment, SubmissionError> {
//!         Ok(PersistedAssessment::from_payload(AssessmentId::new(), payload, Timestamp::now()))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::assessment::{PersistedAssessment, SubmissionPayload};

/// Port for the persistence collaborator.
#[async_trait]
pub trait AssessmentSubmitter: Send + Sync {
    /// Persists the payload and returns the stored record with its new id.
    async fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> Result<PersistedAssessment, SubmissionError>;
}

/// Submission failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// Could not reach the collaborator.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator answered with a server-side failure.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The collaborator refused the payload.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// Failed to read the collaborator's response.
    #[error("parse error: {0}")]
    Parse(String),

    /// No answer within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl SubmissionError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a server error.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// True for failures where the collaborator may not have seen the payload.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SubmissionError::Network(_) | SubmissionError::Timeout { .. }
        ) || matches!(self, SubmissionError::Server { status, .. } if *status >= 500)
    }
}
