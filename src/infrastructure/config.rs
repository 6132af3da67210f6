// src/infrastructure/config.rs
use serde::Deserialize;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

/// TOML configuration for notesview
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means the HTTP client's own defaults
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_page_size() -> u32 { DEFAULT_PAGE_SIZE }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        if config.pagination.page_size == 0 {
            anyhow::bail!("pagination.page_size must be at least 1");
        }

        Ok(config)
    }

    /// Default location: `<config dir>/notesview/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load an explicitly given file, or the default file if it exists.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from default path");
                Self::load(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}
