//! Extension point for contributing actions.

use crate::{application::pipeline::Pipeline, error::PutlogResult};

/// A bundle of actions that can be switched on by name.
///
/// Extensions never see each other; they only name actions or anchors in
/// their `before` / `after` constraints and let [`Pipeline::resolve`] work
/// out the order.
pub trait Extension: Send + Sync {
    /// Unique, user-facing name (used on the command line).
    fn name(&self) -> &str;

    /// One-line summary for listings.
    fn description(&self) -> &str {
        ""
    }

    /// Register this extension's actions.
    fn activate(&self, pipeline: Pipeline) -> PutlogResult<Pipeline>;
}
