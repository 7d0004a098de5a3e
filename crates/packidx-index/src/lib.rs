//! Loader and validator for pack registry index documents.
//!
//! An index is a JSON array of entries, each describing one published
//! version of a tool/framework pack. Before an index is published or
//! consumed, every entry must carry enough metadata for a consumer to
//! authenticate the pack later: an https-only download URL, an https-only
//! public-key URL, a SHA-256 content hash, and audit fields.
//!
//! # Architecture
//!
//! Validation is a single synchronous pass made of three pieces:
//! - **Loader** ([`loader`]) — reads and parses the document; any read,
//!   JSON, or shape failure is fatal.
//! - **Entry validator** ([`validate`]) — checks each entry against the
//!   field rules in [`rules`] and the index-wide `id@version` uniqueness
//!   invariant, never stopping at the first failure.
//! - **Diagnostics** ([`diagnostics`]) — streams every violation as it is
//!   found and decides the final pass/fail status.

pub mod coerce;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod rules;
pub mod validate;

// Re-exports for convenience.
pub use diagnostics::{Diagnostics, Summary, EXIT_INVALID, EXIT_OK};
pub use error::{IndexError, Result};
pub use loader::{load, parse, DEFAULT_INDEX_FILE};
pub use rules::{Rule, Source};
pub use validate::{
    validate_entries, validate_entry, validate_index, IdentitySet, Violation, ViolationSink,
};
