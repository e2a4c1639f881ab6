//! Domain entities and the working set that owns them.

/// Opportunities and their considerations.
pub mod opportunity;
/// The 2–3 opportunity working set and the JSON data format.
pub mod workspace;
