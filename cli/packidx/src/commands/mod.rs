//! Command implementations.

pub mod index;
pub mod mappings;
