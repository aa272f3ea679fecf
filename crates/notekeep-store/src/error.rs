//! Error types for the storage layer.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the token slot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The slot file couldn't be read, written, or replaced.
    #[error("token slot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The slot file exists but isn't a JSON object of strings.
    ///
    /// The file is left untouched so a human can look at it.
    #[error("token slot at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}
