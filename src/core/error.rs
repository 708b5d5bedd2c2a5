//! Error handling for the client generator.
//!
//! This module defines the main error type `Error` used throughout the crate,
//! along with a convenient `Result` type alias. Registry failures are
//! recovered by the version resolver; every other variant is fatal for a run.
//!
//! # Examples
//!
//! ```
//! use grpc_clientgen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("directory must start with \"grpc-\""))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for client generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for client generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid invocation context or configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Registry lookup failed (network, auth, parse or timeout)
    #[error("Registry error: {0}")]
    Registry(String),

    /// Expected input missing or output could not be written
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Template rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// External command failed
    #[error("Command error: {0}")]
    Command(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Malformed semantic version
    #[error("Invalid version: {0}")]
    Version(#[from] semver::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new registry error
    pub fn registry<S: Into<String>>(msg: S) -> Self {
        Self::Registry(msg.into())
    }

    /// Create a new file system error
    pub fn file_system<S: Into<String>>(msg: S) -> Self {
        Self::FileSystem(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new command error
    pub fn command<S: Into<String>>(msg: S) -> Self {
        Self::Command(msg.into())
    }
}
