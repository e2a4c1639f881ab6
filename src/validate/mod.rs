//! Input normalization.
//!
//! Every function in this module is total: malformed input is mapped to a safe value instead of
//! being reported as an error.

/// Text, rating, color and file name validators.
pub mod input;
