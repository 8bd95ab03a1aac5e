//! CLI configuration
//!
//! Stored in `~/.config/kstatus/config.yaml`. Every setting can be overridden
//! on the command line.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Output format for classification results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// CLI configuration file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Default output format
    #[serde(default)]
    pub output: OutputFormat,

    /// Show properties under each object in table output
    #[serde(default = "default_true")]
    pub show_properties: bool,

    /// Colorize table output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Prefix for references to related objects
    #[serde(default)]
    pub link_prefix: String,
}

fn default_true() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::default(),
            show_properties: true,
            color: true,
            link_prefix: String::new(),
        }
    }
}

impl CliConfig {
    /// Load from an explicit path, or the default location if it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(
                format!("cannot read {}: {}", path.display(), e),
                "Check the --config path or the KSTATUS_CONFIG variable",
            )
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            CliError::config(
                format!("invalid {}: {}", path.display(), e),
                "Valid keys are output, showProperties, color and linkPrefix",
            )
        })
    }

    /// Get default configuration path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kstatus").join("config.yaml"))
    }
}
