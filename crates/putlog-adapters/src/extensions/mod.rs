//! Built-in extensions.
//!
//! `skeleton` provides the base layout and the actions other extensions
//! anchor on; the CLI always enables it first.

mod fastapi;
mod skeleton;

use putlog_core::{
    application::{ApplicationError, Extension},
    error::PutlogResult,
};

pub use fastapi::Fastapi;
pub use skeleton::{Skeleton, package_name};

/// Action names other extensions may order against.
pub mod actions {
    pub use super::fastapi::{ADD_FILES, REMOVE_FILES};
    pub use super::skeleton::{DEFINE_STRUCTURE, FINALIZE_REQUIREMENTS, GET_DEFAULT_OPTIONS};
}

/// Every extension shipped with Putlog, `skeleton` first.
pub fn builtin_extensions() -> Vec<Box<dyn Extension>> {
    vec![Box::new(Skeleton), Box::new(Fastapi)]
}

/// Look up a built-in extension by name.
pub fn find_extension(name: &str) -> PutlogResult<Box<dyn Extension>> {
    builtin_extensions()
        .into_iter()
        .find(|ext| ext.name() == name)
        .ok_or_else(|| ApplicationError::UnknownExtension { name: name.into() }.into())
}
