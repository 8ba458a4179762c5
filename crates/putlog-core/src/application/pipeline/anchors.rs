//! Fixed ordering landmarks.
//!
//! Anchors exist in every pipeline and can be named in `before` / `after`
//! constraints, but nothing runs at them. They are always ordered
//! `BEGIN -> STRUCTURE_DEFINED -> REQUIREMENTS_RESOLVED -> END`.

/// Start of the pipeline.
pub const BEGIN: &str = "begin";

/// The base project tree has been laid out.
pub const STRUCTURE_DEFINED: &str = "structure_defined";

/// Every extension has declared its requirements.
pub const REQUIREMENTS_RESOLVED: &str = "requirements_resolved";

/// End of the pipeline.
pub const END: &str = "end";

/// All anchors in phase order.
pub const ALL: [&str; 4] = [BEGIN, STRUCTURE_DEFINED, REQUIREMENTS_RESOLVED, END];

pub fn is_anchor(name: &str) -> bool {
    ALL.contains(&name)
}
