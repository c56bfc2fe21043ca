//! Optional TOML configuration; every key falls back to a default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Auto,
    Json,
    Human,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputFormat,
    pub log_filter: String,
    pub max_rows: usize,
    /// Omit the RUPEES/ONLY wrapper.
    pub plain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: OutputFormat::Auto,
            log_filter: default_log_filter(),
            max_rows: 1000,
            plain: false,
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        anyhow::ensure!(config.max_rows > 0, "max_rows must be greater than 0");
        Ok(config)
    }
}
