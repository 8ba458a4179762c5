//! Terminal output for command results.
//!
//! Human-facing lines go through [`OutputManager::print`] and friends and are
//! dropped under `--quiet`. Listings meant for pipes (`--format list|json`)
//! go through [`OutputManager::data`], which is never suppressed.

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::global::GlobalArgs;
use crate::config::AppConfig;

/// Marker and colour of a status line.
#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}", // ✓
            Self::Warning => "\u{26a0}", // ⚠
        }
    }
}

/// Writes to stdout, honouring `--quiet` and colour settings.
pub struct OutputManager {
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// Colour is off when asked for (flag, `NO_COLOR`, config) or when stdout
    /// is not a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let term = Term::stdout();
        Self {
            quiet: args.quiet,
            color: !(args.no_color || config.output.no_color) && term.is_term(),
            term,
        }
    }

    /// Plain line.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Machine-readable line.
    pub fn data(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    /// Section header, bold cyan when coloured.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.color {
            self.print(&text.cyan().bold().to_string())
        } else {
            self.print(text)
        }
    }

    /// Secondary text such as a file's status next to its path.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_owned()
        }
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        let marker = tone.marker();
        let line = match (self.color, tone) {
            (false, _) => format!("{marker} {msg}"),
            (true, Tone::Success) => format!("{} {}", marker.green().bold(), msg.green()),
            (true, Tone::Warning) => format!("{} {}", marker.yellow().bold(), msg.yellow()),
        };
        self.print(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(quiet: bool, no_color: bool) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        }
    }

    #[test]
    fn quiet_mode_is_reported() {
        let out = OutputManager::new(&args(true, true), &AppConfig::default());
        assert!(out.is_quiet());
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
    }

    #[test]
    fn no_color_flag_leaves_text_plain() {
        let out = OutputManager::new(&args(false, true), &AppConfig::default());
        assert!(!out.supports_color());
        assert_eq!(out.dim("kept"), "kept");
    }

    #[test]
    fn config_can_disable_color() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!OutputManager::new(&args(false, false), &config).supports_color());
    }

    #[test]
    fn success_and_warning_markers_differ() {
        assert_ne!(Tone::Success.marker(), Tone::Warning.marker());
    }
}
