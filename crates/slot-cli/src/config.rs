//! Configuration file loading (YAML, TOML or JSON).

use anyhow::{Context, Result};
use serde::Deserialize;
use slot_engine::RawPerson;
use std::path::Path;

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Reference year for `"MM-DD HH:mm"` entries; current year when absent.
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub granularity_hours: Option<u32>,
    #[serde(default)]
    pub people: Vec<RawPerson>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, `.yaml`/`.yml` files are YAML; everything else
    /// is treated as JSON.
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

pub fn parse_config(text: &str, format: ConfigFormat) -> Result<Config> {
    match format {
        ConfigFormat::Json => serde_json::from_str(text).context("Failed to parse JSON config"),
        ConfigFormat::Toml => toml::from_str(text).context("Failed to parse TOML config"),
        ConfigFormat::Yaml => serde_norway::from_str(text).context("Failed to parse YAML config"),
    }
}
