//! Error types for the RFL database codec.

use thiserror::Error;

/// Errors that can occur when working with database images and records.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] miidb_common::Error),

    /// Buffer length does not match the fixed format size.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Invalid magic bytes at the start of a database image.
    #[error("invalid database magic: expected \"RNOD\", got {0:02X?}")]
    BadMagic([u8; 4]),

    /// Wrong number of records supplied to a database build.
    #[error("invalid record count: expected 100, got {0}")]
    InvalidMiiCount(usize),

    /// Slot index outside the database.
    #[error("invalid slot index: {0} (valid range 0-99)")]
    InvalidSlot(usize),
}

/// Result type for RFL database operations.
pub type Result<T> = std::result::Result<T, Error>;
