//! Error classification shared by every module.
//!
//! Each module keeps its own `thiserror` enum. This module only names the
//! coarse class an error belongs to, so callers (the CLI in particular) can
//! pick an exit status or a retry policy without matching on every variant.

use std::fmt;

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Bad caller input: empty domain, malformed mapping, bad port range.
    InvalidInput,
    /// The operation targets an entry that does not exist.
    NotFound,
    /// A create without overwrite hit an occupied name.
    AlreadyExists,
    /// No free port block is left in the requested range.
    Unavailable,
    /// The filesystem (or another OS facility) refused the operation.
    IoFailure,
}

impl ErrorClass {
    /// Process exit status used by the binary for this class.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorClass::InvalidInput => 2,
            ErrorClass::NotFound => 3,
            ErrorClass::AlreadyExists => 4,
            ErrorClass::Unavailable => 5,
            ErrorClass::IoFailure => 1,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::InvalidInput => "invalid input",
            ErrorClass::NotFound => "not found",
            ErrorClass::AlreadyExists => "already exists",
            ErrorClass::Unavailable => "unavailable",
            ErrorClass::IoFailure => "i/o failure",
        };
        f.write_str(name)
    }
}
