//! Navigation Sink Port - where the wizard sends the user next.

use crate::domain::assessment::NavigationIntent;

/// Port for the presentation layer's router.
///
/// Called after a step change or a terminal submission event. Must not block.
pub trait NavigationSink: Send + Sync {
    fn navigate(&self, intent: NavigationIntent);
}
