//! ResultStore - reducer-style container for the in-progress answers.
//!
//! One store per wizard session, owned by the session and passed by
//! reference. Every mutation is a [`ResultAction`] applied by
//! [`ResultStore::dispatch`], which reports whether anything changed.
//! Writes that leave the record as it was do not bump [`revision`].
//!
//! [`revision`]: ResultStore::revision

use super::steps::{AnswerField, StepAccessor};
use super::{AnswerPatch, AssessmentAnswer, Pattern, Recommendation};

/// A state transition for the [`ResultStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultAction {
    /// Replace the whole record and mark the session complete.
    SetResult(AssessmentAnswer),
    /// Shallow-merge a patch, creating the record if needed.
    UpdateResult(AnswerPatch),
    /// Merge `pattern`. No-op without a record.
    SetPattern(Pattern),
    /// Merge `recommendations`. No-op without a record.
    SetRecommendations(Vec<Recommendation>),
    /// Discard the record.
    Reset,
}

#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    record: Option<AssessmentAnswer>,
    complete: bool,
    revision: u64,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current record, if any step has written to it.
    pub fn record(&self) -> Option<&AssessmentAnswer> {
        self.record.as_ref()
    }

    /// An owned copy of the current record.
    pub fn snapshot(&self) -> Option<AssessmentAnswer> {
        self.record.clone()
    }

    /// True once `set_result` has stored a full record.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of state changes applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies an action, returning true if the state changed.
    pub fn dispatch(&mut self, action: ResultAction) -> bool {
        let changed = match action {
            ResultAction::SetResult(answer) => {
                let changed = !self.complete || self.record.as_ref() != Some(&answer);
                self.record = Some(answer);
                self.complete = true;
                changed
            }
            ResultAction::UpdateResult(patch) => {
                let created = self.record.is_none();
                let record = self.record.get_or_insert_with(AssessmentAnswer::new);
                patch.apply_to(record) || created
            }
            ResultAction::SetPattern(pattern) => match self.record.as_mut() {
                Some(record) if record.pattern != Some(pattern) => {
                    record.pattern = Some(pattern);
                    true
                }
                _ => false,
            },
            ResultAction::SetRecommendations(list) => match self.record.as_mut() {
                Some(record) if record.recommendations.as_ref() != Some(&list) => {
                    record.recommendations = Some(list);
                    true
                }
                _ => false,
            },
            ResultAction::Reset => {
                let changed = self.record.is_some() || self.complete;
                self.record = None;
                self.complete = false;
                changed
            }
        };

        if changed {
            self.revision += 1;
        }
        changed
    }

    pub fn set_result(&mut self, answer: AssessmentAnswer) -> bool {
        self.dispatch(ResultAction::SetResult(answer))
    }

    pub fn update_result(&mut self, patch: AnswerPatch) -> bool {
        self.dispatch(ResultAction::UpdateResult(patch))
    }

    pub fn reset_result(&mut self) -> bool {
        self.dispatch(ResultAction::Reset)
    }

    pub fn set_pattern(&mut self, pattern: Pattern) -> bool {
        self.dispatch(ResultAction::SetPattern(pattern))
    }

    pub fn set_recommendations(&mut self, recommendations: Vec<Recommendation>) -> bool {
        self.dispatch(ResultAction::SetRecommendations(recommendations))
    }

    /// Read/write view of a single step's field(s).
    pub fn accessor<F: AnswerField>(&mut self) -> StepAccessor<'_, F> {
        StepAccessor::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{AgeRange, CycleLength, RecommendationEngine};

    fn age_patch(age: AgeRange) -> AnswerPatch {
        AnswerPatch {
            age: Some(age),
            ..Default::default()
        }
    }

    #[test]
    fn new_store_is_empty() {
        let store = ResultStore::new();
        assert!(store.record().is_none());
        assert!(!store.is_complete());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn first_update_creates_record_with_empty_symptoms() {
        let mut store = ResultStore::new();
        assert!(store.update_result(age_patch(AgeRange::From18To24)));

        let record = store.record().unwrap();
        assert_eq!(record.age, Some(AgeRange::From18To24));
        assert!(record.physical_symptoms.is_empty());
        assert!(record.emotional_symptoms.is_empty());
    }

    #[test]
    fn empty_patch_still_initializes_record() {
        let mut store = ResultStore::new();
        assert!(store.update_result(AnswerPatch::default()));
        assert_eq!(store.record(), Some(&AssessmentAnswer::default()));
    }

    #[test]
    fn updates_merge_field_by_field() {
        let mut store = ResultStore::new();
        store.update_result(age_patch(AgeRange::TwentyFivePlus));
        store.update_result(AnswerPatch {
            cycle_length: Some(CycleLength::Days31To35),
            ..Default::default()
        });

        let record = store.record().unwrap();
        assert_eq!(record.age, Some(AgeRange::TwentyFivePlus));
        assert_eq!(record.cycle_length, Some(CycleLength::Days31To35));
    }

    #[test]
    fn set_pattern_without_record_is_noop() {
        let mut store = ResultStore::new();
        assert!(!store.set_pattern(Pattern::Heavy));
        assert!(store.record().is_none());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn set_recommendations_without_record_is_noop() {
        let mut store = ResultStore::new();
        let recs = RecommendationEngine::generate(Some(Pattern::Pain));
        assert!(!store.set_recommendations(recs));
        assert!(store.record().is_none());
    }

    #[test]
    fn set_pattern_merges_into_existing_record() {
        let mut store = ResultStore::new();
        store.update_result(age_patch(AgeRange::From18To24));
        assert!(store.set_pattern(Pattern::Regular));

        let record = store.record().unwrap();
        assert_eq!(record.pattern, Some(Pattern::Regular));
        assert_eq!(record.age, Some(AgeRange::From18To24));
    }

    #[test]
    fn repeated_identical_writes_do_not_bump_revision() {
        let mut store = ResultStore::new();
        store.update_result(age_patch(AgeRange::From18To24));
        store.set_pattern(Pattern::Regular);
        store.set_recommendations(RecommendationEngine::generate(Some(Pattern::Regular)));
        let revision = store.revision();

        assert!(!store.set_pattern(Pattern::Regular));
        assert!(!store.set_recommendations(RecommendationEngine::generate(Some(Pattern::Regular))));
        assert!(!store.update_result(age_patch(AgeRange::From18To24)));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn set_result_replaces_and_marks_complete() {
        let mut store = ResultStore::new();
        store.update_result(age_patch(AgeRange::Under13));

        let answer = AssessmentAnswer {
            cycle_length: Some(CycleLength::Irregular),
            ..Default::default()
        };
        assert!(store.set_result(answer.clone()));
        assert!(store.is_complete());
        assert_eq!(store.record(), Some(&answer));
    }

    #[test]
    fn reset_discards_record() {
        let mut store = ResultStore::new();
        store.set_result(AssessmentAnswer::default());
        assert!(store.reset_result());
        assert!(store.record().is_none());
        assert!(!store.is_complete());
        assert!(!store.reset_result());
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let mut store = ResultStore::new();
        store.update_result(age_patch(AgeRange::From13To17));
        let snapshot = store.snapshot().unwrap();
        store.reset_result();
        assert_eq!(snapshot.age, Some(AgeRange::From13To17));
    }
}
