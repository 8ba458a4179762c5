//! Infrastructure adapters for Putlog.
//!
//! This crate implements the ports defined in `putlog-core::application::ports`
//! and ships the built-in extensions with their templates.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod extensions;
pub mod filesystem;
pub mod renderer;
pub mod template_store;

// Re-export commonly used adapters
pub use extensions::{Fastapi, Skeleton, builtin_extensions, find_extension};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_store::InMemoryStore;
