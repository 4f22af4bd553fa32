//! Navigation sink that only logs.
//!
//! Default sink for headless hosts with no router of their own.

use tracing::info;

use crate::domain::assessment::NavigationIntent;
use crate::ports::NavigationSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl TracingNavigator {
    pub fn new() -> Self {
        Self
    }
}

impl NavigationSink for TracingNavigator {
    fn navigate(&self, intent: NavigationIntent) {
        match intent {
            NavigationIntent::ToStep(step) => {
                info!(step = %step, number = step.number(), "Navigate to step");
            }
            NavigationIntent::ToResults {
                assessment_id: Some(id),
            } => {
                info!(assessment_id = %id, "Navigate to results");
            }
            NavigationIntent::ToResults {
                assessment_id: None,
            } => {
                info!("Navigate to results without saved assessment");
            }
        }
    }
}
