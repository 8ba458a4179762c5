//! Implementation of the `putlog actions` command.

use serde_json::json;

use crate::{
    cli::{ActionsArgs, ListFormat},
    commands::build_pipeline,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Print actions in the order `putlog new` would run them.
pub fn execute(args: ActionsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let pipeline = build_pipeline(
        config
            .defaults
            .extensions
            .iter()
            .chain(&args.extensions)
            .map(String::as_str),
    )?;
    let schedule = pipeline.resolve().map_err(putlog_core::error::PutlogError::from)?;

    // Position as registered, looked up by name for display.
    let position = |name: &str| {
        pipeline
            .registrations()
            .iter()
            .find(|r| r.action.name() == name)
            .map(|r| r.position.to_string())
            .unwrap_or_default()
    };

    match args.format {
        ListFormat::Table => {
            output.header("Execution order:")?;
            for (i, name) in schedule.names().into_iter().enumerate() {
                output.print(&format!(
                    "  {:>2}. {:<24} {}",
                    i + 1,
                    name,
                    output.dim(&position(name))
                ))?;
            }
        }
        ListFormat::List => {
            for name in schedule.names() {
                output.data(name)?;
            }
        }
        ListFormat::Json => {
            let entries: Vec<_> = schedule
                .names()
                .into_iter()
                .map(|name| json!({ "name": name, "position": position(name) }))
                .collect();
            let json = serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".into());
            output.data(&json)?;
        }
    }

    Ok(())
}
