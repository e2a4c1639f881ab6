//! Shared primitives used across the crate.

/// Canvas size and geometry re-exports.
pub mod core;
/// Error type and result alias.
pub mod error;
