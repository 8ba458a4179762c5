pub mod common;
pub mod content;
pub mod options;
pub mod structure;

pub use crate::domain::DomainError;
pub use common::StructPath;
pub use content::{ContentItem, Payload, WritePolicy};
pub use options::Options;
pub use structure::{Entry, Structure};
