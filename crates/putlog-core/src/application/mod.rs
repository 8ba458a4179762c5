//! Application layer for Putlog.
//!
//! This layer contains:
//! - **Pipeline**: Action registration, constraint resolution, execution
//! - **Extension**: The trait extensions implement to register actions
//! - **Services**: Use case orchestration (ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer drives the domain layer but never interprets file
//! content itself. Tree rules live in `crate::domain`.

pub mod error;
pub mod extension;
pub mod pipeline;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{FileOutcome, MaterializeReport, ScaffoldService};

pub use extension::Extension;
pub use pipeline::{Action, ActionParams, Pipeline, Position, Schedule, anchors};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
