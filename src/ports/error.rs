//! Error types for port block allocation.

use thiserror::Error;

use crate::error::ErrorClass;

/// Errors from [`find_next_available_port_block`](super::find_next_available_port_block).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    /// Block size was zero.
    #[error("invalid block size: {0}")]
    InvalidBlockSize(u32),

    /// Range bounds outside 1..=65535 or inverted.
    #[error("invalid port range: {min}-{max}")]
    InvalidRange {
        /// Lower bound as given.
        min: u32,
        /// Upper bound as given.
        max: u32,
    },

    /// The range cannot hold even one block.
    #[error("port range too small for block size: range={width}, block={block_size}")]
    RangeTooSmall {
        /// Number of ports in the range.
        width: u32,
        /// Requested block size.
        block_size: u32,
    },

    /// Every aligned block overlaps an existing reservation.
    #[error("no available port block in {min}-{max} with block size {block_size}")]
    NoBlockAvailable {
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
        /// Requested block size.
        block_size: u32,
    },
}

impl AllocError {
    /// Taxonomy class of this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            AllocError::NoBlockAvailable { .. } => ErrorClass::Unavailable,
            _ => ErrorClass::InvalidInput,
        }
    }
}

/// Result type for allocation.
pub type AllocResult<T> = Result<T, AllocError>;
