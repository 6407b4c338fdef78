//! Error types for the styling system.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the styling system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The theme document is not valid JSON.
    #[error("theme parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The theme document parsed but its top level is not an object.
    #[error("theme document must be a JSON object")]
    NotAnObject,

    /// File I/O error.
    #[error("failed to read theme '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
