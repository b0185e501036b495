//! Configuration file parser for ~/.config/gazette/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields`
//! off), so older files keep working as settings are added.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Cap on config file size; anything larger is certainly not ours.
const MAX_CONFIG_SIZE: u64 = 64 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site name used in page titles.
    pub site_name: String,

    /// Series label used to synthesize neighbor-link titles
    /// (`"{series_name} #{id}"`) when a record's title cannot be resolved.
    pub series_name: String,

    /// Base URL of the article data source. `None` means no reachable
    /// source: the embedded dataset is used directly.
    pub data_url: Option<String>,

    /// Articles per list page.
    pub page_size: usize,

    /// How many entries the home page's recent-articles block shows.
    pub recent_limit: usize,

    /// Whether the host environment prefers a dark color scheme; used only
    /// as the first-run theme default.
    pub prefers_dark: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_name: "Gazette".to_string(),
            series_name: "Gazette".to_string(),
            data_url: None,
            page_size: 4,
            recent_limit: 5,
            prefers_dark: false,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file. A missing file yields the
    /// defaults; a malformed one is an error worth surfacing.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let metadata = std::fs::metadata(path)?;
        if metadata.len() > MAX_CONFIG_SIZE {
            return Err(ConfigError::TooLarge(format!(
                "{} bytes (max {})",
                metadata.len(),
                MAX_CONFIG_SIZE
            )));
        }

        let raw = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&raw)?;

        // Zero values would make pagination degenerate; clamp to sane floors.
        if config.page_size == 0 {
            tracing::warn!("page_size 0 is invalid, using 1");
            config.page_size = 1;
        }
        if config.recent_limit == 0 {
            config.recent_limit = 1;
        }

        Ok(config)
    }
}
