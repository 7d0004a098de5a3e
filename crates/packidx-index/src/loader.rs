//! Index document loading.
//!
//! Reading, JSON decoding, and the top-level shape check all fail fast:
//! an index that cannot be loaded is never partially validated.

use std::path::Path;

use serde_json::Value;

use crate::coerce::kind_name;
use crate::error::{IndexError, Result};

/// File name used when no index path is given.
pub const DEFAULT_INDEX_FILE: &str = "index.json";

/// Read and parse the index at `path`, returning its raw entries.
pub fn load(path: &Path) -> Result<Vec<Value>> {
    let bytes = std::fs::read(path).map_err(|source| IndexError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read index");
    parse(&bytes, path)
}

/// Parse raw index bytes. `path` is only used for error reporting.
pub fn parse(bytes: &[u8], path: &Path) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| IndexError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(entries) => {
            tracing::debug!(entries = entries.len(), "parsed index");
            Ok(entries)
        }
        other => Err(IndexError::Shape {
            path: path.to_path_buf(),
            found: kind_name(&other),
        }),
    }
}
