//! Shared pieces of the `validate-index` and `validate-mappings` commands.

pub mod commands;
pub mod config;
pub mod logging;
