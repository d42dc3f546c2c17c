//! Error handling for MPRKit
//!
//! Only whole-file failures surface as errors: a file that cannot be read
//! is reported once and skipped. Everything below file granularity
//! (missing parameters, unparsable numbers, unsupported macro variants)
//! is modeled as an absent value or a declined operation, never as an
//! error crossing a component boundary.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for MPRKit
#[derive(Error, Debug)]
pub enum Error {
    /// Path exists but is not a regular file
    #[error("Path is not a file: {}", .path.display())]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// File could not be read from disk
    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a file-read error
    pub fn is_file_read(&self) -> bool {
        matches!(self, Error::FileRead { .. } | Error::NotAFile { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
