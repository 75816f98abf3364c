//! Errors raised at the edges of the crate.
//!
//! Building a tree never fails. Only reading payloads and persisting preferences can.

use std::path::PathBuf;

/// Failures while loading heading payloads or writing preferences.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file (or stdin) failed.
    #[error("failed to access {path}: {source}", path = path.display())]
    Io {
        /// File involved, `-` for stdin.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// JSON could not be parsed into, or written from, the expected types.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The payload parsed as JSON but not as headings.
    #[error("invalid heading payload: {0}")]
    InvalidPayload(String),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
