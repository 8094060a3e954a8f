//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorClass;

/// Errors that can occur during configuration loading and directory resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse a TOML configuration file.
    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying TOML parse error.
        source: toml::de::Error,
    },

    /// Failed to determine user's home directory.
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    /// The mappings directory does not exist.
    #[error("directory {0} does not exist")]
    DirectoryMissing(PathBuf),

    /// The mappings path exists but is not a directory.
    #[error("path {0} is not a directory")]
    NotADirectory(PathBuf),
}

impl ConfigError {
    /// Taxonomy class of this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            ConfigError::ParseError { .. } | ConfigError::NotADirectory(_) => {
                ErrorClass::InvalidInput
            }
            ConfigError::DirectoryMissing(_) => ErrorClass::NotFound,
            ConfigError::ReadError { .. } | ConfigError::NoHomeDirectory => ErrorClass::IoFailure,
        }
    }
}
