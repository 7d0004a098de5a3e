//! Index loading error types.

use std::path::PathBuf;

/// Fatal errors raised before any entry is validated.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The index file could not be opened or read.
    #[error("failed to read index {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The index file is not valid JSON.
    #[error("failed to parse index {} as JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The top-level JSON value is not an array.
    #[error("index {} must be a JSON array, found {found}", path.display())]
    Shape { path: PathBuf, found: &'static str },
}

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
