//! Putlog Core - Hexagonal Architecture Implementation
//!
//! This crate provides the scaffolding engine: an in-memory project tree, a
//! pipeline of composable actions that build it, and the ports through which
//! the finished tree is rendered and written.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           putlog-cli (CLI)              │
//! │     (Picks extensions, owns config)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Pipeline  ──►  ScaffoldService        │
//! │ (order + run)    (materialize)          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateStore, Renderer)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     putlog-adapters (Infrastructure)    │
//! │ (LocalFilesystem, SimpleRenderer, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Structure, ContentItem, Options)       │
//! │         No I/O, no template syntax      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use putlog_core::prelude::*;
//!
//! let pipeline = Pipeline::new()
//!     .register(
//!         "add_core",
//!         |s: Structure, o| {
//!             let core = StructPath::new("src/app/core.py");
//!             Ok((s.with_leaf(&core, ContentItem::literal("# core").no_overwrite()), o))
//!         },
//!         Position::after(anchors::STRUCTURE_DEFINED),
//!     );
//!
//! let (structure, _options) = pipeline.run(Structure::new(), Options::new()).unwrap();
//! assert_eq!(structure.leaf_count(), 1);
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Action, ActionParams, Extension, FileOutcome, MaterializeReport, Pipeline, Position,
        ScaffoldService, Schedule, anchors,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        ContentItem, Entry, Options, Payload, StructPath, Structure, TemplateRef, WritePolicy,
    };
    pub use crate::error::{PutlogError, PutlogResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
