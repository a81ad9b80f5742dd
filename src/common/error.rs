//! Error types for the smoke-test harness
//!
//! Check failures are not errors: a missing marker or an unreachable service
//! ends the run through [`crate::testing::RunReport`]. The variants here cover
//! everything that prevents a run from starting.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke-test harness
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Invalid configuration file '{path}': {message}")]
    ConfigParse { path: String, message: String },

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    // === Scenario Errors ===
    #[error("Invalid scenario file '{path}': {message}")]
    ScenarioParse { path: String, message: String },

    // === HTTP Errors ===
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("{method} {url} failed: {message}")]
    Transport {
        method: String,
        url: String,
        message: String,
    },

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create a transport error for a request that never produced a body
    pub fn transport(method: &str, url: &str, message: impl ToString) -> Self {
        Self::Transport {
            method: method.to_string(),
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
