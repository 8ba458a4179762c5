//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `PUTLOG_<SECTION>__<KEY>`, e.g.
//!    `PUTLOG_DEFAULTS__AUTHOR=Ada` or `PUTLOG_DEFAULTS__EXTENSIONS=fastapi,other`
//! 3. Config file (`--config FILE`, else [`AppConfig::config_path`] if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ENV_PREFIX: &str = "PUTLOG";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Extensions enabled for every `putlog new`, on top of `skeleton`.
    pub extensions: Vec<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Treat every `putlog new` as `--force`.
    pub force: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `<namespace>/<name>` files overriding built-in templates.
    pub local_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from every layer.
    ///
    /// An explicit `config_file` must exist when `required` is set; the
    /// default location is always optional.
    pub fn load(config_file: Option<&Path>, required: bool) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), required),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let defaults = Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.extensions"),
            )
            .build()
            .and_then(|config| config.try_deserialize())
            .with_context(|| format!("Failed to load configuration from '{}'", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.putlog.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "putlog", "putlog")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".putlog.toml"))
    }

    /// TOML rendering, as written by `putlog init`.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_no_extensions() {
        let cfg = AppConfig::default();
        assert!(cfg.defaults.extensions.is_empty());
        assert!(!cfg.defaults.force);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("putlog.toml");
        std::fs::write(
            &path,
            "[defaults]\nextensions = [\"fastapi\"]\nauthor = \"Ada\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.defaults.extensions, ["fastapi"]);
        assert_eq!(cfg.defaults.author.as_deref(), Some("Ada"));
        assert!(!cfg.defaults.force);
    }

    #[test]
    fn missing_explicit_file_is_error_only_when_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(AppConfig::load(Some(&path), true).is_err());
        assert_eq!(
            AppConfig::load(Some(&path), false).unwrap().defaults,
            Defaults::default()
        );
    }

    #[test]
    fn init_output_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("putlog.toml");
        let mut cfg = AppConfig::default();
        cfg.defaults.author = Some("Ada".into());
        std::fs::write(&path, cfg.to_toml().unwrap()).unwrap();

        assert_eq!(AppConfig::load(Some(&path), true).unwrap().defaults, cfg.defaults);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
