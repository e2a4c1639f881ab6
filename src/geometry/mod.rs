//! Radial layout of a single wheel.

/// Slice, outline and label geometry for one opportunity.
pub mod wheel;
