//! Configuration management for the CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Industry used when neither a flag nor the config file names one
pub const DEFAULT_INDUSTRY: &str = "generic";

/// CLI configuration, read from `~/.config/ccre/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Estimator service URL
    pub api_url: Option<String>,
    /// Industry profile name or alias
    pub default_industry: Option<String>,
    /// Monthly cluster cost in USD
    pub monthly_cost: Option<f64>,
}

impl Config {
    /// Load configuration from the default location. A missing file is not an error.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("ccre").join("config.json"))
    }

    /// Flag or environment value first, then the config file
    pub fn api_url(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.api_url.clone())
    }

    pub fn monthly_cost(&self, flag: Option<f64>) -> Option<f64> {
        flag.or(self.monthly_cost)
    }

    pub fn industry(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.default_industry.clone())
            .unwrap_or_else(|| DEFAULT_INDUSTRY.to_string())
    }
}
