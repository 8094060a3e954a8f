//! Error types for mapping parsing and entry store operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorClass;

/// Errors from parsing a mapping string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Input was empty after trimming.
    #[error("empty mapping")]
    Empty,

    /// Port was outside 1..=65535 or not a number.
    #[error("invalid port {0:?}")]
    InvalidPort(String),

    /// The string is not `PORT`, `HOST:PORT` or `[IPv6]:PORT`.
    #[error("invalid host:port mapping {input:?}: {reason}")]
    Malformed {
        /// The trimmed input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl MappingError {
    /// Every mapping failure is bad caller input.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        ErrorClass::InvalidInput
    }
}

/// Errors from entry store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The domain is empty or is not a plain file name.
    #[error("invalid domain {0:?}: must be a non-empty file name")]
    InvalidDomain(String),

    /// The entry does not exist.
    #[error("entry {0} not found")]
    NotFound(String),

    /// Create without overwrite on an occupied name.
    #[error("entry {0} already exists")]
    AlreadyExists(String),

    /// Any other filesystem failure, surfaced as-is.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path the operation touched.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Taxonomy class of this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            StoreError::InvalidDomain(_) => ErrorClass::InvalidInput,
            StoreError::NotFound(_) => ErrorClass::NotFound,
            StoreError::AlreadyExists(_) => ErrorClass::AlreadyExists,
            StoreError::Io { .. } => ErrorClass::IoFailure,
        }
    }
}

/// Result type for entry store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_port_message() {
        let err = MappingError::InvalidPort("70000".to_string());
        assert!(err.to_string().contains("70000"));
        assert_eq!(err.class(), ErrorClass::InvalidInput);
    }

    #[test]
    fn test_store_error_classes() {
        assert_eq!(
            StoreError::NotFound("a.test".into()).class(),
            ErrorClass::NotFound
        );
        assert_eq!(
            StoreError::AlreadyExists("a.test".into()).class(),
            ErrorClass::AlreadyExists
        );
        assert_eq!(
            StoreError::InvalidDomain(String::new()).class(),
            ErrorClass::InvalidInput
        );
        let io = StoreError::Io {
            path: PathBuf::from("/tmp/x"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(io.class(), ErrorClass::IoFailure);
        assert!(io.to_string().contains("denied"));
    }
}
