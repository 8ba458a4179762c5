//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "putlog",
    bin_name = "putlog",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Composable Python project scaffolding",
    long_about = "Putlog builds a project tree by running a pipeline of actions \
                  contributed by extensions, then writes it to disk.",
    after_help = "EXAMPLES:\n\
        \x20 putlog new my-lib\n\
        \x20 putlog new shop-api -e fastapi\n\
        \x20 putlog actions -e fastapi\n\
        \x20 putlog completions bash > /usr/share/bash-completion/completions/putlog",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create (or update) a project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 putlog new my-lib\n\
            \x20 putlog new shop-api --extension fastapi --package shop\n\
            \x20 putlog new shop-api -e fastapi --force   # update in place\n\
            \x20 putlog new shop-api -e fastapi --dry-run"
    )]
    New(NewArgs),

    /// Show the resolved action order.
    #[command(
        about = "Show the resolved action order",
        after_help = "EXAMPLES:\n\
            \x20 putlog actions\n\
            \x20 putlog actions -e fastapi --format json"
    )]
    Actions(ActionsArgs),

    /// List available extensions.
    #[command(
        visible_alias = "ls",
        about = "List available extensions"
    )]
    Extensions(ExtensionsArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 putlog init                      # default location\n\
            \x20 putlog -c ./putlog.toml init     # explicit file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 putlog completions bash > ~/.local/share/bash-completion/completions/putlog\n\
            \x20 putlog completions zsh  > ~/.zfunc/_putlog\n\
            \x20 putlog completions fish > ~/.config/fish/completions/putlog.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `putlog new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Python package name (default: derived from the project name).
    #[arg(long = "package", value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Extensions to enable on top of `skeleton`.
    #[arg(
        short = 'e',
        long = "extension",
        value_name = "EXT",
        help = "Enable an extension (repeatable)"
    )]
    pub extensions: Vec<String>,

    /// Author written into the generated metadata.
    #[arg(long = "author", value_name = "NAME")]
    pub author: Option<String>,

    /// One-line project description.
    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    /// Update an existing directory. Files marked no-overwrite are kept.
    #[arg(long = "force", help = "Update an existing directory in place")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Parent directory for the project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,
}

// ── actions / extensions ──────────────────────────────────────────────────────

/// Arguments for `putlog actions`.
#[derive(Debug, Args)]
pub struct ActionsArgs {
    /// Extensions to enable on top of `skeleton`.
    #[arg(short = 'e', long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ListFormat,
}

/// Arguments for `putlog extensions`.
#[derive(Debug, Args)]
pub struct ExtensionsArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ListFormat,
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `putlog init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `putlog completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
