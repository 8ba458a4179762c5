//! Unified error handling for Putlog Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Putlog Core operations.
///
/// This enum wraps all possible errors that can occur when using putlog-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum PutlogError {
    /// Errors from the domain layer (paths, options).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (ordering, actions, materializing).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PutlogError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Putlog".into(),
                "Re-run with -vv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// True for the ordering failures that abort a run before any action executes.
    pub fn is_ordering_error(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::CyclicOrdering { .. }
                    | ApplicationError::UnknownAnchor { .. }
                    | ApplicationError::DuplicateAction { .. }
            )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PutlogResult<T> = Result<T, PutlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_failure_takes_category_of_cause() {
        let err: PutlogError = ApplicationError::ActionFailed {
            action: "add_files".into(),
            source: Box::new(DomainError::MissingOption { key: "package".into() }.into()),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("add_files"));
        assert!(err.suggestions().iter().any(|s| s.contains("package")));
    }

    #[test]
    fn ordering_errors_are_configuration() {
        let err: PutlogError = ApplicationError::CyclicOrdering {
            cycle: vec!["a".into(), "b".into(), "a".into()],
        }
        .into();
        assert!(err.is_ordering_error());
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("a -> b -> a"));
    }
}
