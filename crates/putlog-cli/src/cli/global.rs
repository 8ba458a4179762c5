//! Flags accepted by every subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args};

/// Flattened into [`super::Cli`]; all flags are `global` so they may follow
/// the subcommand (`putlog new app -vv`).
#[derive(Debug, Args)]
pub struct GlobalArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Log more (-v info, -vv every action, -vvv trace)",
        long_help = "Raise the log level on stderr:
    (none)  - warnings and errors
    -v      - pipeline and materialization summaries
    -vv     - every action run and every file written
    -vvv    - everything

RUST_LOG, when set, replaces this mapping."
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print nothing but errors and requested data"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(long = "no-color", global = true, env = "NO_COLOR", help = "Disable colored output")]
    pub no_color: bool,

    /// Must exist when given, except for `putlog init`, which creates it.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the default location"
    )]
    pub config: Option<PathBuf>,
}
