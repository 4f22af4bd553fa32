//! Recording navigation sink.
//!
//! Captures every intent for later inspection. Hosts that drive their own
//! router poll `last()`; tests assert on `intents()`.
//!
//! ```ignore
//! let navigator = Arc::new(RecordingNavigator::new());
//! // ... run the wizard ...
//! assert_eq!(
//!     navigator.last(),
//!     Some(NavigationIntent::ToResults { assessment_id: Some(id) })
//! );
//! ```

use std::sync::{PoisonError, RwLock};

use crate::domain::assessment::NavigationIntent;
use crate::ports::NavigationSink;

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    intents: RwLock<Vec<NavigationIntent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All intents received, oldest first.
    pub fn intents(&self) -> Vec<NavigationIntent> {
        self.intents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent intent.
    pub fn last(&self) -> Option<NavigationIntent> {
        self.intents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    /// Number of results-view intents received.
    pub fn results_count(&self) -> usize {
        self.intents()
            .iter()
            .filter(|i| matches!(i, NavigationIntent::ToResults { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.intents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl NavigationSink for RecordingNavigator {
    fn navigate(&self, intent: NavigationIntent) {
        self.intents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(intent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::WizardStep;
    use crate::domain::foundation::AssessmentId;

    #[test]
    fn records_intents_in_order() {
        let navigator = RecordingNavigator::new();
        navigator.navigate(NavigationIntent::ToStep(WizardStep::CycleLength));
        navigator.navigate(NavigationIntent::ToStep(WizardStep::PeriodDuration));

        assert_eq!(
            navigator.intents(),
            vec![
                NavigationIntent::ToStep(WizardStep::CycleLength),
                NavigationIntent::ToStep(WizardStep::PeriodDuration),
            ]
        );
        assert_eq!(navigator.results_count(), 0);
    }

    #[test]
    fn last_returns_most_recent() {
        let navigator = RecordingNavigator::new();
        assert_eq!(navigator.last(), None);

        let id = AssessmentId::new();
        navigator.navigate(NavigationIntent::ToStep(WizardStep::Symptoms));
        navigator.navigate(NavigationIntent::ToResults {
            assessment_id: Some(id),
        });

        assert_eq!(
            navigator.last(),
            Some(NavigationIntent::ToResults {
                assessment_id: Some(id)
            })
        );
        assert_eq!(navigator.results_count(), 1);
    }

    #[test]
    fn clear_empties_history() {
        let navigator = RecordingNavigator::new();
        navigator.navigate(NavigationIntent::ToResults { assessment_id: None });
        navigator.clear();
        assert!(navigator.intents().is_empty());
    }
}
