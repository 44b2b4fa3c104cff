//! Optional TOML settings file.
//!
//! ```toml
//! [calculator]
//! factor_r_threshold = "0.28"
//! ceiling_policy = "reject"
//!
//! [tables]
//! path = "annex_tables.csv"
//!
//! [logging]
//! level = "debug"
//! file = "simples.log"
//! ```
//!
//! Every section and key is optional. Relative paths are resolved against the
//! directory containing the settings file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use simples_core::CalculatorConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablesSettings {
    /// CSV file replacing the built-in annex tables.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub calculator: CalculatorConfig,
    pub tables: TablesSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("invalid settings")
    }

    /// Reads settings from `path`, resolving relative paths inside it
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file '{}'", path.display()))?;
        let mut settings = Self::from_toml_str(&contents)
            .with_context(|| format!("in settings file '{}'", path.display()))?;

        if let Some(base) = path.parent() {
            settings.tables.path = settings.tables.path.map(|p| base.join(p));
            settings.logging.file = settings.logging.file.map(|p| base.join(p));
        }

        Ok(settings)
    }
}
