//! # Lint Configuration
//!
//! Optional YAML file supplying defaults for the `lint` subcommand:
//!
//! ```yaml
//! exclude: [node_modules, package.json]
//! format: json
//! fail_fast: true
//! ```
//!
//! Flags given on the command line take precedence over the file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// How findings are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable blocks per file and feature.
    #[default]
    Text,
    /// One JSON document listing every file's report.
    Json,
}

/// Settings for a lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// File or directory names skipped during discovery.
    pub exclude: Vec<String>,
    /// Output format.
    pub format: OutputFormat,
    /// Stop at the first file with findings or errors.
    pub fail_fast: bool,
}

impl LintConfig {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid config document.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded lint config");
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
