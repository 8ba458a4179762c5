//! Implementation of the `putlog extensions` command.

use serde_json::json;

use putlog_adapters::builtin_extensions;

use crate::{
    cli::{ExtensionsArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ExtensionsArgs, output: OutputManager) -> CliResult<()> {
    let extensions = builtin_extensions();

    match args.format {
        ListFormat::Table => {
            output.header("Available Extensions:")?;
            for ext in &extensions {
                output.print(&format!("  {:<12} {}", ext.name(), ext.description()))?;
            }
        }
        ListFormat::List => {
            for ext in &extensions {
                output.data(ext.name())?;
            }
        }
        ListFormat::Json => {
            let entries: Vec<_> = extensions
                .iter()
                .map(|ext| json!({ "name": ext.name(), "description": ext.description() }))
                .collect();
            let json = serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".into());
            output.data(&json)?;
        }
    }

    Ok(())
}
