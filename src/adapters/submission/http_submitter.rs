//! HTTP Submitter - Implementation of AssessmentSubmitter over a JSON API.
//!
//! Sends `POST {base_url}/assessments` with the payload as JSON and expects
//! the stored record back. One attempt per call, no retries.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpSubmitterConfig::new("https://api.example.com/v1")
//!     .with_api_token("s3cr3t")
//!     .with_timeout(Duration::from_secs(15));
//!
//! let submitter = HttpSubmitter::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use tracing::debug;

use crate::domain::assessment::{PersistedAssessment, SubmissionPayload};
use crate::ports::{AssessmentSubmitter, SubmissionError};

/// Configuration for the HTTP submitter.
#[derive(Debug, Clone)]
pub struct HttpSubmitterConfig {
    /// Base URL of the persistence API, without trailing slash.
    pub base_url: String,
    /// Bearer token, if the API requires one.
    api_token: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpSubmitterConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the bearer token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Secret::new(token.into()));
        self
    }

    /// Sets the bearer token from an already wrapped secret.
    pub fn with_secret_token(mut self, token: Option<Secret<String>>) -> Self {
        self.api_token = token;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_token(&self) -> Option<&str> {
        self.api_token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

/// Submits assessments to a remote JSON API.
pub struct HttpSubmitter {
    config: HttpSubmitterConfig,
    client: Client,
}

impl HttpSubmitter {
    pub fn new(config: HttpSubmitterConfig) -> Result<Self, SubmissionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SubmissionError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn assessments_url(&self) -> String {
        format!("{}/assessments", self.config.base_url)
    }

    async fn send(&self, payload: &SubmissionPayload) -> Result<Response, SubmissionError> {
        let mut request = self
            .client
            .post(self.assessments_url())
            .header("Content-Type", "application/json")
            .json(payload);

        if let Some(token) = self.config.api_token() {
            request = request.bearer_auth(token);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                SubmissionError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                SubmissionError::network(format!("Connection failed: {}", e))
            } else {
                SubmissionError::network(e.to_string())
            }
        })
    }

    async fn handle_response(response: Response) -> Result<PersistedAssessment, SubmissionError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| SubmissionError::parse(format!("Failed to parse response: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status, body))
    }

    fn status_error(status: StatusCode, body: String) -> SubmissionError {
        match status.as_u16() {
            401 | 403 => SubmissionError::rejected(format!("not authorized ({})", status)),
            400 | 409 | 422 => SubmissionError::rejected(body),
            code => SubmissionError::server(code, body),
        }
    }
}

#[async_trait]
impl AssessmentSubmitter for HttpSubmitter {
    async fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> Result<PersistedAssessment, SubmissionError> {
        debug!(url = %self.assessments_url(), "Submitting assessment");
        let response = self.send(&payload).await?;
        Self::handle_response(response).await
    }
}
