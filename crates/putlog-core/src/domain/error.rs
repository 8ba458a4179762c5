// ============================================================================
// domain/error.rs - STRUCTURE & OPTIONS ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (actions may stash and re-raise them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Path Errors
    // ========================================================================
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Path '{path}' contains an empty segment")]
    EmptySegment { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Option Errors
    // ========================================================================
    #[error("Required option missing: {key}")]
    MissingOption { key: String },

    #[error("Option '{key}' has the wrong type: expected {expected}")]
    InvalidOption { key: String, expected: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPath { path, reason } => vec![
                format!("Path '{}' was rejected: {}", path, reason),
                "Paths are '/'-separated and relative to the project root".into(),
            ],
            Self::EmptySegment { path } => vec![
                format!("Remove duplicate or trailing '/' from '{}'", path),
            ],
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("Make '{}' relative to the project root", path),
            ],
            Self::MissingOption { key } => vec![
                format!("An action requires the '{}' option", key),
                "Pass it on the command line or set it in your config file".into(),
            ],
            Self::InvalidOption { key, expected } => vec![
                format!("Option '{}' must be {}", key, expected),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPath { .. } | Self::EmptySegment { .. } => ErrorCategory::Validation,
            Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::MissingOption { .. } | Self::InvalidOption { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
