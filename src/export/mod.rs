//! Export formats: JSON data, the composite SVG document, and its raster rendition.

/// Export formats, file naming, and the export entry points.
pub mod artifact;
/// Placement of wheels and comparison bars in the composite document.
pub mod layout;
/// SVG rasterization with an explicit timeout.
pub mod raster;
/// Destinations for finished exports.
pub mod sink;
/// SVG serialization.
pub mod svg;
