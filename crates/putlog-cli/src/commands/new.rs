//! Implementation of the `putlog new` command.
//!
//! Responsibility: translate CLI arguments and config into a pipeline plus
//! options, call the core scaffold service, and display results. No business
//! logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use putlog_adapters::{InMemoryStore, LocalFilesystem, MemoryFilesystem, SimpleRenderer};
use putlog_core::{
    application::{FileOutcome, MaterializeReport, ScaffoldService, ports::Filesystem},
    domain::{Options, Structure, WritePolicy},
};

use crate::{
    cli::NewArgs,
    commands::build_pipeline,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `putlog new` command.
///
/// Dispatch sequence:
/// 1. Parse and validate the project name / output path
/// 2. Refuse an existing directory unless `--force`
/// 3. Assemble the pipeline from `skeleton`, config and `-e` extensions
/// 4. Run it and write the result (to memory for `--dry-run`)
/// 5. Report per-file outcomes
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_path) = resolve_project_path(&args.name, args.output.as_deref())?;
    validate_project_name(&project_name)?;

    // 2. Check for existing directory
    let force = args.force || config.defaults.force;
    if project_path.exists() && !force && !args.dry_run {
        return Err(CliError::ProjectExists { path: project_path });
    }

    // 3. Pipeline + options
    let extensions: Vec<&str> = config
        .defaults
        .extensions
        .iter()
        .chain(&args.extensions)
        .map(String::as_str)
        .collect();
    let pipeline = build_pipeline(extensions)?;
    let options = build_options(&args, &config, &project_name);

    debug!(
        actions = pipeline.len(),
        path = %project_path.display(),
        "Scaffold prepared"
    );

    // 4. Adapters
    let store = InMemoryStore::with_builtin()?;
    if let Some(dir) = &config.templates.local_path {
        store.load_dir(dir)?;
    }
    let renderer = Box::new(SimpleRenderer::new(Box::new(store)));

    if args.dry_run {
        let service = ScaffoldService::new(renderer, Box::new(MemoryFilesystem::new()));
        let (structure, options) = service.generate(&pipeline, options)?;
        let report = service.materialize(&structure, &options, &project_path)?;

        output.header(&format!(
            "Dry run: would write {} files to {}",
            report.outcomes.len(),
            project_path.display()
        ))?;
        print_outcomes(&report, &project_path, &output, Some(&structure))?;
        return Ok(());
    }

    let service = ScaffoldService::new(renderer, Box::new(LocalFilesystem::new()));

    output.header(&format!("Creating '{project_name}'..."))?;
    info!(project = %project_name, path = %project_path.display(), "Scaffold started");

    let report = service.scaffold(&pipeline, options, &project_path)?;
    print_outcomes(&report, &project_path, &output, None)?;

    if !report.is_success() {
        return Err(CliError::IncompleteScaffold {
            failed: report.failed(),
            total: report.outcomes.len(),
        });
    }

    info!(project = %project_name, "Scaffold completed");

    // 5. Success + next steps
    output.success(&format!(
        "Project '{project_name}' ready: {} written, {} kept",
        report.written(),
        report.skipped()
    ))?;

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project_path.display()))?;
        output.print("  pip install -e .")?;
    }

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Project name (last path component) and full project directory.
pub fn resolve_project_path(name: &str, output: Option<&Path>) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    let project_path = match output {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    };

    Ok((project_name, project_path))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if !name.chars().any(char::is_alphanumeric) {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name needs at least one letter or digit".into(),
        });
    }
    Ok(())
}

// ── Options ───────────────────────────────────────────────────────────────────

/// CLI flags win over config; anything left unset is filled by `skeleton`.
fn build_options(args: &NewArgs, config: &AppConfig, project_name: &str) -> Options {
    let mut options = Options::new().with("project", project_name);

    if let Some(package) = &args.package {
        options.insert("package", package.as_str());
    }
    if let Some(author) = args.author.as_ref().or(config.defaults.author.as_ref()) {
        options.insert("author", author.as_str());
    }
    if let Some(description) = args
        .description
        .as_ref()
        .or(config.defaults.description.as_ref())
    {
        options.insert("description", description.as_str());
    }

    options
}

// ── UI helpers ────────────────────────────────────────────────────────────────

/// One line per file. A dry run passes its structure: it wrote to memory, so
/// what would happen to files already on disk is worked out from each leaf's
/// write policy.
fn print_outcomes(
    report: &MaterializeReport,
    root: &Path,
    output: &OutputManager,
    dry_run: Option<&Structure>,
) -> CliResult<()> {
    let disk = LocalFilesystem::new();

    for (path, outcome) in &report.outcomes {
        let status = match (outcome, dry_run) {
            (FileOutcome::Failed { reason }, _) => {
                output.warning(&format!("{path}: {reason}"))?;
                continue;
            }
            (FileOutcome::SkippedExisting, _) => "kept",
            (FileOutcome::Written, None) => "written",
            (FileOutcome::Written, Some(structure)) => {
                let policy = structure.get_leaf(path).map(|item| item.policy);
                dry_run_status(policy, disk.exists(&path.to_path_buf(root)))
            }
        };
        output.print(&format!("  {path}  {}", output.dim(status)))?;
    }
    Ok(())
}

fn dry_run_status(policy: Option<WritePolicy>, on_disk: bool) -> &'static str {
    match (on_disk, policy) {
        (false, _) => "new",
        (true, Some(WritePolicy::NoOverwrite)) => "kept",
        (true, _) => "overwrite",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str) -> NewArgs {
        NewArgs {
            name: name.into(),
            package: None,
            extensions: Vec::new(),
            author: None,
            description: None,
            force: false,
            dry_run: false,
            output: None,
        }
    }

    // ── resolve_project_path ──────────────────────────────────────────────────

    #[test]
    fn simple_name_resolves_to_cwd() {
        let (name, dir) = resolve_project_path("my-app", None).unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("my-app"));
    }

    #[test]
    fn relative_path_keeps_parent() {
        let (name, dir) = resolve_project_path("../my-app", None).unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("../my-app"));
    }

    #[test]
    fn output_dir_is_prefixed() {
        let (name, dir) = resolve_project_path("my-app", Some(Path::new("/work"))).unwrap();
        assert_eq!(name, "my-app");
        assert_eq!(dir, PathBuf::from("/work/my-app"));
    }

    #[test]
    fn path_without_name_is_invalid() {
        assert!(matches!(
            resolve_project_path("..", None),
            Err(CliError::InvalidProjectName { .. })
        ));
    }

    // ── validate_project_name ─────────────────────────────────────────────────

    #[test]
    fn invalid_names() {
        for name in ["", ".hidden", "---"] {
            assert!(
                matches!(
                    validate_project_name(name),
                    Err(CliError::InvalidProjectName { .. })
                ),
                "accepted: {name:?}"
            );
        }
    }

    #[test]
    fn valid_names_pass() {
        for name in ["my-project", "my_app", "project123", "MyApp", "putlog"] {
            assert!(validate_project_name(name).is_ok(), "failed for: {name}");
        }
    }

    // ── build_options ─────────────────────────────────────────────────────────

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.defaults.author = Some("Config Author".into());
        config.defaults.description = Some("from config".into());

        let mut args = args("shop");
        args.author = Some("Flag Author".into());
        args.package = Some("shop_core".into());

        let options = build_options(&args, &config, "shop");
        assert_eq!(options.get_str("project").unwrap(), "shop");
        assert_eq!(options.get_str("package").unwrap(), "shop_core");
        assert_eq!(options.get_str("author").unwrap(), "Flag Author");
        assert_eq!(options.get_str("description").unwrap(), "from config");
    }

    #[test]
    fn dry_run_labels_follow_write_policy() {
        assert_eq!(dry_run_status(Some(WritePolicy::NoOverwrite), false), "new");
        assert_eq!(dry_run_status(Some(WritePolicy::NoOverwrite), true), "kept");
        assert_eq!(dry_run_status(Some(WritePolicy::AlwaysOverwrite), true), "overwrite");
    }

    #[test]
    fn unset_values_are_left_to_the_pipeline() {
        let options = build_options(&args("shop"), &AppConfig::default(), "shop");
        assert_eq!(options.keys().collect::<Vec<_>>(), ["project"]);
    }
}
