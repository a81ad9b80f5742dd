//! Configuration file handling
//!
//! The harness needs very little: where the service lives, which marker
//! strings count as success, and optional HTTP client tweaks. Everything has
//! a default so running without a config file is the normal case.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::{Error, Result};

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Target service settings
    #[serde(default)]
    pub target: TargetConfig,

    /// Marker substrings expected in response bodies
    #[serde(default)]
    pub markers: Markers,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Target service settings
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    /// Base URL every check path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Literal substrings a response body must contain for a check to pass
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Markers {
    /// Expected by `check_health`
    #[serde(default = "default_healthy")]
    pub healthy: String,

    /// Expected by `check_db`
    #[serde(default = "default_database")]
    pub database: String,

    /// Expected by every other check
    #[serde(default = "default_success")]
    pub success: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            healthy: default_healthy(),
            database: default_database(),
            success: default_success(),
        }
    }
}

fn default_healthy() -> String {
    r#""status": "healthy""#.to_string()
}
fn default_database() -> String {
    r#""database_status": "healthy""#.to_string()
}
fn default_success() -> String {
    r#""status": "success""#.to_string()
}

/// HTTP client settings
#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout; the client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("meal-max-smoke/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from `path` when given, otherwise from the default location
    pub fn resolve(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Pick the base URL: command line (or its env var), then config file
    pub fn base_url(&self, flag: Option<&str>) -> String {
        match flag {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => self.target.base_url.clone(),
        }
    }
}
