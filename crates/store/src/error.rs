//! Error types for store operations.

use std::path::PathBuf;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An underlying SQLite error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to create the database directory.
    #[error("failed to prepare database directory {path}: {source}")]
    Io {
        /// The directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be decoded.
    ///
    /// Indicates on-disk data that does not match what the store writes
    /// (for example a hand-edited snapshot column).
    #[error("corrupt store data: {reason}")]
    Corrupt {
        /// What failed to decode.
        reason: String,
    },
}

/// A specialized Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
