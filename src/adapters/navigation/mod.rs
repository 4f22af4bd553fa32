//! Navigation Adapters
//!
//! - **RecordingNavigator** - Keeps every intent for polling and assertions
//! - **TracingNavigator** - Logs intents and does nothing else

mod recording_navigator;
mod tracing_navigator;

pub use recording_navigator::RecordingNavigator;
pub use tracing_navigator::TracingNavigator;
