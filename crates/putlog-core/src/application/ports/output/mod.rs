//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `putlog-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Options, TemplateRef};
use crate::error::PutlogResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `putlog_adapters::filesystem::LocalFilesystem` (production)
/// - `putlog_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
///
/// ## Design Notes
///
/// - Paths arrive already joined onto the output root
/// - Parent directories are created by the caller before `write_file`
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PutlogResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> PutlogResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template source lookup.
///
/// Implemented by:
/// - `putlog_adapters::template_store::InMemoryStore` (built-in templates)
pub trait TemplateStore: Send + Sync {
    /// Template source text.
    fn get(&self, template: &TemplateRef) -> PutlogResult<String>;

    /// Insert or replace a template.
    fn insert(&self, template: TemplateRef, source: String) -> PutlogResult<()>;

    /// All known templates.
    fn list(&self) -> PutlogResult<Vec<TemplateRef>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `putlog_adapters::renderer::SimpleRenderer` (`{{key}}` substitution)
///
/// The core never looks inside template text; it only hands over the
/// reference and the final options.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` with `options` as its variables.
    fn render(&self, template: &TemplateRef, options: &Options) -> PutlogResult<String>;
}
