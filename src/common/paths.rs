//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/meal-max-smoke/`
//! - macOS: `~/Library/Application Support/meal-max-smoke/`
//! - Windows: `%APPDATA%\meal-max-smoke\`

use std::path::PathBuf;

/// Directory name under the platform config root
const APP_NAME: &str = "meal-max-smoke";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the default configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
