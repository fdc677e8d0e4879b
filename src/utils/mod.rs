//! Shared utilities.
//!
//! - [`hash`]: content hashing for reload detection
//! - [`path`]: path normalization
//! - [`plural`]: count formatting

pub mod hash;
pub mod path;
mod plural;

pub use plural::plural_count;
