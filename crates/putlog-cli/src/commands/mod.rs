//! Command handlers, one module per subcommand.

pub mod actions;
pub mod completions;
pub mod extensions;
pub mod init;
pub mod new;

use tracing::debug;

use putlog_adapters::{Skeleton, find_extension};
use putlog_core::{application::Pipeline, error::PutlogResult};

/// `skeleton` plus the named extensions, each enabled once, in the order
/// first named.
pub fn build_pipeline<'a>(extensions: impl IntoIterator<Item = &'a str>) -> PutlogResult<Pipeline> {
    let mut enabled = vec!["skeleton"];
    let mut pipeline = Pipeline::new().with_extension(&Skeleton)?;

    for name in extensions {
        if enabled.contains(&name) {
            continue;
        }
        pipeline = pipeline.with_extension(find_extension(name)?.as_ref())?;
        enabled.push(name);
    }

    debug!(extensions = ?enabled, actions = pipeline.len(), "Pipeline assembled");
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_is_always_first_and_never_doubled() {
        let pipeline = build_pipeline(["skeleton", "fastapi", "fastapi"]).unwrap();
        assert_eq!(
            pipeline.action_names(),
            [
                "get_default_options",
                "define_structure",
                "finalize_requirements",
                "add_files",
                "remove_files"
            ]
        );
    }

    #[test]
    fn unknown_extension_fails() {
        assert!(build_pipeline(["django"]).is_err());
    }
}
