//! Settings from the TOML file, overridden by command-line flags.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hearing_core::{STATE_KEY, StoreConfig};
use serde::Deserialize;
use tracing::debug;

use crate::cli::Cli;

/// Contents of `hearing-report.toml`. Every key is optional.
///
/// ```toml
/// backend = "sqlite"
/// database = "reports/hearing-report.db"
/// state_key = "hearingReportFormData"
/// log_level = "debug"
/// log_file = "hearing-report.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub backend: Option<String>,
    pub database: Option<String>,
    pub state_key: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid settings file")
    }

    /// Reads `path`; a file that does not exist yields empty settings.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                Self::parse(&text).with_context(|| format!("Failed to read {}", path.display()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to open {}", path.display())),
        }
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store: StoreConfig,
    pub state_key: String,
    /// `None` keeps the filter from `RUST_LOG` (or the built-in default).
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(file: FileConfig, cli: &Cli) -> Self {
        let defaults = StoreConfig::default();
        Self {
            store: StoreConfig {
                backend: cli.backend.clone().or(file.backend).unwrap_or(defaults.backend),
                connection_string: cli
                    .db
                    .clone()
                    .or(file.database)
                    .unwrap_or(defaults.connection_string),
            },
            state_key: cli
                .key
                .clone()
                .or(file.state_key)
                .unwrap_or_else(|| STATE_KEY.to_string()),
            log_level: cli.log_level.clone().or(file.log_level),
            log_file: cli.log_file.clone().or(file.log_file),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            state_key: STATE_KEY.to_string(),
            log_level: None,
            log_file: None,
        }
    }
}
