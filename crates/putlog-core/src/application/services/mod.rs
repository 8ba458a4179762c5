//! Application services - orchestrate use cases.
//!
//! Services coordinate the pipeline and ports to accomplish high-level use
//! cases like "generate a project tree" or "write it to disk".

pub mod scaffold_service;

pub use scaffold_service::{FileOutcome, MaterializeReport, ScaffoldService};
