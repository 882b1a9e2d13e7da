//! Application configuration.
//!
//! Read from a TOML file (default `~/.config/rko-calc/config.toml`).
//! Every section has defaults, so a partial or missing file still yields
//! a working configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infrastructure::links::RefLinks;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    pub referral: ReferralConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Optional pre-curated JSON catalog overriding the compiled-in one.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReferralConfig {
    /// Partner query tail appended to every bank link.
    pub tail: Option<String>,
    /// Append a unique click marker to links.
    pub add_sub_id: bool,
    /// Query key for the click marker (defaults to `sub`).
    pub sub_key: Option<String>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Referral-link builder for this configuration.
    pub fn ref_links(&self) -> RefLinks {
        RefLinks {
            tail: self.referral.tail.clone(),
            add_sub_id: self.referral.add_sub_id,
            sub_key: self.referral.sub_key.clone(),
        }
    }
}

/// Default config location under the user config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rko-calc")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────
