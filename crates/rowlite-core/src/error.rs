//! Error types for RowLite.

use std::fmt;

use crate::record::RecordId;

/// The main error type for RowLite operations.
///
/// Lookup misses are never errors: queries report absence through `Option`
/// or an empty result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A record with this identifier is already indexed and the store
    /// rejects duplicates
    DuplicateKey(RecordId),

    /// Invalid configuration value
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateKey(id) => write!(f, "Duplicate key: record {} already exists", id),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for RowLite operations.
pub type Result<T> = std::result::Result<T, Error>;
