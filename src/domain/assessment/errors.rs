//! Wizard-specific error types.

use thiserror::Error;

use super::WizardState;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised when an operation does not fit the wizard's current state.
///
/// An unanswered step is not an error; it yields `Advance::Blocked`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Cannot {operation} while the wizard is {state}")]
    NotAvailable {
        operation: &'static str,
        state: WizardState,
    },

    #[error(transparent)]
    InvalidTransition(#[from] ValidationError),
}

impl WizardError {
    pub fn not_available(operation: &'static str, state: WizardState) -> Self {
        WizardError::NotAvailable { operation, state }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::NotAvailable { .. } => ErrorCode::InvalidStateTransition,
            WizardError::InvalidTransition(ValidationError::InvalidFormat { .. }) => {
                ErrorCode::InvalidStateTransition
            }
            WizardError::InvalidTransition(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<WizardError> for DomainError {
    fn from(err: WizardError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            WizardError::NotAvailable { operation, state } => domain
                .with_detail("operation", operation)
                .with_detail("state", state.to_string()),
            WizardError::InvalidTransition(_) => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::WizardStep;

    #[test]
    fn not_available_maps_to_invalid_state_transition() {
        let err = WizardError::not_available("go back", WizardState::Saving);
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert_eq!(err.to_string(), "Cannot go back while the wizard is saving");
    }

    #[test]
    fn invalid_transition_wraps_validation_error() {
        let err: WizardError =
            ValidationError::invalid_format("state_transition", "Done to Saving").into();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn converts_into_domain_error_with_details() {
        let err = WizardError::not_available("advance", WizardState::Step(WizardStep::Age));
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::InvalidStateTransition);
        assert_eq!(domain.details.get("operation").map(String::as_str), Some("advance"));
        assert_eq!(domain.details.get("state").map(String::as_str), Some("step:age"));
    }
}
