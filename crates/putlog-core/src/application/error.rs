//! Application layer errors.
//!
//! These errors represent failures in orchestration (ordering, running,
//! materializing), not in the tree model. Tree and option errors are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, PutlogError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// `before` / `after` constraints form a cycle; no order exists.
    #[error("Cyclic ordering constraints: {}", .cycle.join(" -> "))]
    CyclicOrdering { cycle: Vec<String> },

    /// A constraint names neither a registered action nor an anchor.
    #[error("Action '{action}' is ordered relative to unknown action or anchor '{reference}'")]
    UnknownAnchor { action: String, reference: String },

    /// Two registrations share a name (or reuse an anchor name).
    #[error("Action '{name}' is registered more than once")]
    DuplicateAction { name: String },

    /// An action body failed; the rest of the pipeline was not run.
    #[error("Action '{action}' failed: {source}")]
    ActionFailed {
        action: String,
        #[source]
        source: Box<PutlogError>,
    },

    /// The template collaborator has no such template.
    #[error("Template not found: {template}")]
    TemplateNotFound { template: String },

    /// Content could not be rendered.
    #[error("Rendering failed for {path}: {reason}")]
    RenderingFailed { path: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// No extension is known under this name.
    #[error("Unknown extension: {name}")]
    UnknownExtension { name: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CyclicOrdering { cycle } => vec![
                format!("These actions wait on each other: {}", cycle.join(" -> ")),
                "Drop one of the before/after constraints".into(),
            ],
            Self::UnknownAnchor { reference, .. } => vec![
                format!("'{}' is not registered", reference),
                "Anchors: begin, structure_defined, requirements_resolved, end".into(),
                "Make sure the extension that provides it is enabled".into(),
            ],
            Self::DuplicateAction { name } => vec![
                format!("Rename one of the '{}' actions", name),
                "Is the same extension enabled twice?".into(),
            ],
            Self::ActionFailed { source, .. } => source.suggestions(),
            Self::TemplateNotFound { .. } => vec![
                "Check the template name and namespace".into(),
                "Try: putlog extensions to see what is available".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::UnknownExtension { name } => vec![
                format!("No extension named '{}'", name),
                "Try: putlog extensions".into(),
            ],
            Self::RenderingFailed { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CyclicOrdering { .. }
            | Self::UnknownAnchor { .. }
            | Self::DuplicateAction { .. } => ErrorCategory::Configuration,
            Self::ActionFailed { source, .. } => source.category(),
            Self::TemplateNotFound { .. } | Self::UnknownExtension { .. } => {
                ErrorCategory::NotFound
            }
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
