//! In-memory assessment submitter.
//!
//! Persists assessments in process memory, assigning ids and timestamps the
//! way a remote collaborator would. Built for tests and demos.
//!
//! When no endpoint is configured the bootstrap falls back to an
//! [`InMemorySubmitter::untracked`] instance, which keeps no history so a
//! long-running process does not accumulate payloads.
//!
//! # Features
//!
//! - Scripted failures (consumed in order) for degraded-path testing
//! - Simulated latency for in-flight and duplicate-submit testing
//! - Call and result tracking for verification (off in untracked mode)
//!
//! # Example
//!
//! ```ignore
//! let submitter = InMemorySubmitter::new()
//!     .with_failure(SubmissionError::network("offline"))
//!     .with_delay(Duration::from_millis(50));
//!
//! assert!(submitter.submit(payload.clone()).await.is_err());
//! assert!(submitter.submit(payload).await.is_ok());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::assessment::{PersistedAssessment, SubmissionPayload};
use crate::domain::foundation::{AssessmentId, Timestamp};
use crate::ports::{AssessmentSubmitter, SubmissionError};

#[derive(Debug, Clone, Default)]
pub struct InMemorySubmitter {
    /// Failures returned before falling back to success.
    failures: Arc<Mutex<VecDeque<SubmissionError>>>,
    /// Fail every call instead of consuming `failures`.
    always_fail: Option<SubmissionError>,
    /// Simulated latency per request.
    delay: Duration,
    /// Payloads received, in call order.
    calls: Arc<Mutex<Vec<SubmissionPayload>>>,
    /// Successfully stored assessments.
    saved: Arc<Mutex<Vec<PersistedAssessment>>>,
    /// Skip recording `calls` and `saved`.
    untracked: bool,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemorySubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A submitter that answers like `new()` but records nothing.
    ///
    /// `call_count`, `calls`, `saved` and `find` stay empty.
    pub fn untracked() -> Self {
        Self {
            untracked: true,
            ..Self::default()
        }
    }

    /// A submitter whose every call fails with `error`.
    pub fn failing(error: SubmissionError) -> Self {
        Self {
            always_fail: Some(error),
            ..Self::default()
        }
    }

    /// Queues a failure for the next call.
    pub fn with_failure(self, error: SubmissionError) -> Self {
        locked(&self.failures).push_back(error);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this submitter.
    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// Returns all recorded payloads.
    pub fn calls(&self) -> Vec<SubmissionPayload> {
        locked(&self.calls).clone()
    }

    /// Returns every assessment stored so far.
    pub fn saved(&self) -> Vec<PersistedAssessment> {
        locked(&self.saved).clone()
    }

    pub fn find(&self, id: AssessmentId) -> Option<PersistedAssessment> {
        locked(&self.saved).iter().find(|s| s.id == id).cloned()
    }

    fn next_failure(&self) -> Option<SubmissionError> {
        self.always_fail
            .clone()
            .or_else(|| locked(&self.failures).pop_front())
    }
}

#[async_trait]
impl AssessmentSubmitter for InMemorySubmitter {
    async fn submit(
        &self,
        payload: SubmissionPayload,
    ) -> Result<PersistedAssessment, SubmissionError> {
        if !self.untracked {
            locked(&self.calls).push(payload.clone());
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if let Some(error) = self.next_failure() {
            return Err(error);
        }

        let saved = PersistedAssessment::from_payload(AssessmentId::new(), payload, Timestamp::now());
        if !self.untracked {
            locked(&self.saved).push(saved.clone());
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{complete, AssessmentAnswer, Pattern};
    use crate::domain::foundation::UserId;

    fn payload() -> SubmissionPayload {
        SubmissionPayload::new(complete(&AssessmentAnswer::default()), None)
    }

    #[tokio::test]
    async fn submit_assigns_id_and_stores() {
        let submitter = InMemorySubmitter::new();
        let saved = submitter.submit(payload()).await.unwrap();

        assert_eq!(saved.assessment.pattern, Pattern::Regular);
        assert_eq!(submitter.call_count(), 1);
        assert_eq!(submitter.find(saved.id), Some(saved));
    }

    #[tokio::test]
    async fn each_submit_gets_a_fresh_id() {
        let submitter = InMemorySubmitter::new();
        let first = submitter.submit(payload()).await.unwrap();
        let second = submitter.submit(payload()).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(submitter.saved().len(), 2);
    }

    #[tokio::test]
    async fn owner_is_carried_through() {
        let submitter = InMemorySubmitter::new();
        let owner = UserId::new("user-7").unwrap();
        let payload = SubmissionPayload::new(complete(&AssessmentAnswer::default()), Some(owner.clone()));

        let saved = submitter.submit(payload).await.unwrap();
        assert_eq!(saved.user_id, Some(owner));
    }

    #[tokio::test]
    async fn queued_failures_are_consumed_in_order() {
        let submitter = InMemorySubmitter::new()
            .with_failure(SubmissionError::network("offline"))
            .with_failure(SubmissionError::server(500, "boom"));

        assert_eq!(
            submitter.submit(payload()).await.unwrap_err(),
            SubmissionError::network("offline")
        );
        assert!(matches!(
            submitter.submit(payload()).await,
            Err(SubmissionError::Server { status: 500, .. })
        ));
        assert!(submitter.submit(payload()).await.is_ok());
        assert_eq!(submitter.call_count(), 3);
    }

    #[tokio::test]
    async fn failing_submitter_never_stores() {
        let submitter = InMemorySubmitter::failing(SubmissionError::rejected("nope"));
        for _ in 0..3 {
            assert!(submitter.submit(payload()).await.is_err());
        }
        assert!(submitter.saved().is_empty());
        assert_eq!(submitter.calls().len(), 3);
    }

    #[tokio::test]
    async fn untracked_submitter_keeps_no_history() {
        let submitter = InMemorySubmitter::untracked();
        let first = submitter.submit(payload()).await.unwrap();
        let second = submitter.submit(payload()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.assessment.pattern, Pattern::Regular);
        assert_eq!(submitter.call_count(), 0);
        assert!(submitter.calls().is_empty());
        assert!(submitter.saved().is_empty());
        assert_eq!(submitter.find(first.id), None);
    }

    #[tokio::test]
    async fn delay_is_applied() {
        let submitter = InMemorySubmitter::new().with_delay(Duration::from_millis(20));
        let started = tokio::time::Instant::now();
        submitter.submit(payload()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
