//! Submission records: what is sent to the persistence collaborator and
//! what comes back.

use serde::{Deserialize, Serialize};

use super::CompletedAssessment;
use crate::domain::foundation::{AssessmentId, Timestamp, UserId};

/// Audit fields reserved for the persistence collaborator.
///
/// The owner is passed through from the session when known. Timestamps are
/// left empty; the collaborator assigns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl AuditFields {
    pub fn for_owner(owner: Option<UserId>) -> Self {
        Self {
            user_id: owner,
            ..Default::default()
        }
    }
}

/// The normalized record plus audit fields, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub assessment: CompletedAssessment,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl SubmissionPayload {
    pub fn new(assessment: CompletedAssessment, owner: Option<UserId>) -> Self {
        Self {
            assessment,
            audit: AuditFields::for_owner(owner),
        }
    }
}

/// A saved assessment as returned by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAssessment {
    pub id: AssessmentId,
    #[serde(flatten)]
    pub assessment: CompletedAssessment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PersistedAssessment {
    /// Builds the stored form of a payload, the way a collaborator that
    /// assigns ids and timestamps itself would.
    pub fn from_payload(id: AssessmentId, payload: SubmissionPayload, now: Timestamp) -> Self {
        Self {
            id,
            assessment: payload.assessment,
            user_id: payload.audit.user_id,
            created_at: payload.audit.created_at.unwrap_or(now),
            updated_at: now,
        }
    }
}

/// Result of the submit pipeline.
///
/// `Unpersisted` is the degraded path: the record is complete and can be
/// shown, but it was not saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentOutcome {
    Persisted(PersistedAssessment),
    Unpersisted {
        assessment: CompletedAssessment,
        reason: String,
    },
}

impl AssessmentOutcome {
    pub fn assessment(&self) -> &CompletedAssessment {
        match self {
            AssessmentOutcome::Persisted(saved) => &saved.assessment,
            AssessmentOutcome::Unpersisted { assessment, .. } => assessment,
        }
    }

    pub fn assessment_id(&self) -> Option<AssessmentId> {
        match self {
            AssessmentOutcome::Persisted(saved) => Some(saved.id),
            AssessmentOutcome::Unpersisted { .. } => None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, AssessmentOutcome::Persisted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{complete, AgeRange, AssessmentAnswer, Pattern};
    use serde_json::json;

    fn completed() -> CompletedAssessment {
        complete(&AssessmentAnswer {
            age: Some(AgeRange::From18To24),
            ..Default::default()
        })
    }

    #[test]
    fn payload_serializes_flat_without_empty_audit_fields() {
        let payload = SubmissionPayload::new(completed(), None);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["age"], json!("18-24"));
        assert_eq!(value["pattern"], json!("regular"));
        assert_eq!(value["physical_symptoms"], json!([]));
        assert!(value.get("user_id").is_none());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn payload_carries_owner_when_known() {
        let owner = UserId::new("user-42").unwrap();
        let payload = SubmissionPayload::new(completed(), Some(owner));
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["user_id"], json!("user-42"));
    }

    #[test]
    fn persisted_from_payload_assigns_timestamps() {
        let now = Timestamp::now();
        let id = AssessmentId::new();
        let saved = PersistedAssessment::from_payload(id, SubmissionPayload::new(completed(), None), now);

        assert_eq!(saved.id, id);
        assert_eq!(saved.created_at, now);
        assert_eq!(saved.updated_at, now);
        assert_eq!(saved.assessment.pattern, Pattern::Regular);
    }

    #[test]
    fn persisted_round_trips_through_json() {
        let saved = PersistedAssessment::from_payload(
            AssessmentId::new(),
            SubmissionPayload::new(completed(), None),
            Timestamp::now(),
        );
        let text = serde_json::to_string(&saved).unwrap();
        let back: PersistedAssessment = serde_json::from_str(&text).unwrap();
        assert_eq!(back, saved);
    }

    #[test]
    fn outcome_accessors() {
        let saved = PersistedAssessment::from_payload(
            AssessmentId::new(),
            SubmissionPayload::new(completed(), None),
            Timestamp::now(),
        );
        let persisted = AssessmentOutcome::Persisted(saved.clone());
        assert!(persisted.is_persisted());
        assert_eq!(persisted.assessment_id(), Some(saved.id));

        let degraded = AssessmentOutcome::Unpersisted {
            assessment: completed(),
            reason: "network down".to_string(),
        };
        assert!(!degraded.is_persisted());
        assert_eq!(degraded.assessment_id(), None);
        assert_eq!(degraded.assessment().pattern, Pattern::Regular);
    }
}
