//! Error types for recencycache

use std::fmt;

/// Result type alias for recencycache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction and consistency checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity must be at least 1
    ZeroCapacity,

    /// Could not reserve room for the requested number of entries
    Allocation {
        /// Entries the reservation asked for
        requested: usize,
    },

    /// Index and recency list disagree, or the list itself is corrupt
    Inconsistent(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Cache capacity must be greater than 0"),
            Error::Allocation { requested } => {
                write!(f, "Cannot preallocate room for {} entries", requested)
            }
            Error::Inconsistent(msg) => write!(f, "Cache inconsistent: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<recencylist::Error> for Error {
    fn from(err: recencylist::Error) -> Self {
        Error::Inconsistent(format!("recency list: {}", err))
    }
}
