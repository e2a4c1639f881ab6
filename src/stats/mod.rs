//! Averages, percentages, and winner detection across opportunities.

/// Per-opportunity statistics and the ranking verdict.
pub mod summary;
