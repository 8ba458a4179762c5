// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Putlog.
//!
//! This module contains the pure data model of a scaffold: the project tree
//! ([`Structure`]), its leaves ([`ContentItem`]), and the option map threaded
//! through the pipeline ([`Options`]).
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No template syntax**: Template payloads are opaque references
//! - **Value semantics**: `merge` / `reject` return new trees
//!
// Public API - what the world sees
pub mod entities;
pub mod error;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    common::StructPath,
    content::{ContentItem, Generator, GeneratorFn, Payload, TemplateRef, WritePolicy},
    options::Options,
    structure::{Entry, Structure, merge, reject},
};

pub use error::{DomainError, ErrorCategory};

pub use validation::DomainValidator;
