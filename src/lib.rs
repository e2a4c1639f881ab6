//! Decision wheels: compare 2–3 opportunities by rating the considerations that matter.
//!
//! Each opportunity is drawn as a wheel whose slices grow with their 0–10 rating, and the set is
//! summarized by average scores, a like-for-like check and a winner (or tie) verdict.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: raw form or JSON input is normalized (never rejected) into [`Opportunity`]
//!    values.
//! 2. **Summarize**: [`summarize`] ranks opportunities by [`Average`] and decides the [`Verdict`].
//! 3. **Lay out**: [`compute_wheel_geometry`] turns one opportunity into slice paths and labels.
//! 4. **Export**: [`render_export_document`] assembles every wheel plus comparison bars into one
//!    SVG, which [`rasterize_document`] can turn into WebP/PNG. [`export`] wraps all formats and
//!    an [`ExportSink`] stores the result.
//!
//! Everything except rasterization is pure and synchronous. Rasterization runs on a worker
//! thread bounded by [`RasterOpts::timeout`].
#![forbid(unsafe_code)]

mod export;
mod foundation;
mod geometry;
mod model;
mod stats;
mod validate;

pub use export::artifact::{
    Artifact, DEFAULT_FILE_STEM, ExportFormat, ExportOpts, export, export_all, export_at,
    export_file_name, export_to_sink,
};
pub use export::layout::{ExportLayout, export_layout};
pub use export::raster::{
    RasterFormat, RasterImage, RasterOpts, rasterize_blocking, rasterize_document,
};
pub use export::sink::{DirSink, DirSinkOpts, ExportSink, InMemorySink};
pub use export::svg::{render_export_document, render_wheel_document, xml_escape};
pub use foundation::core::{Canvas, Point, Rect, Vec2};
pub use foundation::error::{WheelsError, WheelsResult};
pub use geometry::wheel::{
    HUB_RADIUS, LABEL_DISTANCE, VALUE_LABEL_OFFSET, WHEEL_RADIUS, WHEEL_SIZE, WheelGeometry,
    WheelSegment, compute_wheel_geometry, wedge_path,
};
pub use model::opportunity::{
    Consideration, DEFAULT_CONSIDERATION_NAME, DEFAULT_OPPORTUNITY_NAME, MAX_CONSIDERATIONS,
    MAX_NAME_LEN, Opportunity,
};
pub use model::workspace::{
    MAX_OPPORTUNITIES, MIN_OPPORTUNITIES, Workspace, load_opportunities,
    load_opportunities_from_path, opportunities_to_json,
};
pub use stats::summary::{
    Average, ComparisonSummary, RankedEntry, Verdict, average, considerations_match,
    highest_rated, percentage, rank, summarize, verdict,
};
pub use validate::input::{
    DEFAULT_COLOR, DEFAULT_VALUE, MAX_FILE_NAME_LEN, MAX_VALUE, MIN_VALUE, RawRating,
    json_text, sanitize_text, validate_color, validate_file_name, validate_name, validate_value,
};
