//! Error handling module for the onboarding wizard
//!
//! Provides centralized error handling with proper error types using thiserror.
//! User-facing validation failures live in [`crate::validators::ValidationError`]
//! and wizard misuse in [`crate::wizard::WizardError`]; both convert into
//! [`OnboardError`] at the application boundary.

use thiserror::Error;

use crate::validators::ValidationError;
use crate::wizard::WizardError;

/// Main error type for the onboarding wizard
#[derive(Error, Debug)]
pub enum OnboardError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A step rejected its input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Wizard navigation misuse (wrong step, out of range)
    #[error("Wizard error: {0}")]
    Wizard(String),

    /// Replay script errors (unreadable script, script ended early)
    #[error("Replay error: {0}")]
    Replay(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for onboarding operations
pub type Result<T> = std::result::Result<T, OnboardError>;

// Convenient error constructors
impl OnboardError {
    /// Create a replay error
    pub fn replay(msg: impl Into<String>) -> Self {
        Self::Replay(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}

impl From<WizardError> for OnboardError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Validation(inner) => Self::Validation(inner),
            other => Self::Wizard(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::FieldName;
    use crate::wizard::WizardStep;

    #[test]
    fn test_error_display() {
        let err = OnboardError::terminal("no tty");
        assert_eq!(err.to_string(), "Terminal error: no tty");

        let err = OnboardError::replay("script ended before submit");
        assert_eq!(err.to_string(), "Replay error: script ended before submit");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OnboardError = io_err.into();
        assert!(matches!(err, OnboardError::Io(_)));
    }

    #[test]
    fn test_wizard_validation_keeps_its_kind() {
        let err: OnboardError = WizardError::Validation(ValidationError::required(FieldName::TaxId)).into();
        assert!(matches!(err, OnboardError::Validation(_)));

        let err: OnboardError = WizardError::AtFirstStep.into();
        assert!(matches!(err, OnboardError::Wizard(_)));

        let err: OnboardError = WizardError::NotAtReview {
            current: WizardStep::Contacts,
        }
        .into();
        assert!(err.to_string().contains("Contacts"));
    }
}
