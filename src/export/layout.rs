use crate::foundation::core::{Canvas, Point, Rect};
use crate::geometry::wheel::WHEEL_SIZE;

/// Outer margin on every side of the composite document.
pub const PADDING: f64 = 40.0;
/// Horizontal space between neighbouring wheels.
pub const WHEEL_GAP: f64 = 40.0;
/// Height reserved for the wheel row, top padding included.
pub const WHEEL_SECTION_HEIGHT: f64 = 480.0;
/// Space between the wheel row and the comparison panel.
pub const COMPARISON_PADDING: f64 = 40.0;
/// Nominal height of the comparison panel (title plus three bars).
pub const COMPARISON_SECTION_HEIGHT: f64 = 200.0;
/// Height of the comparison title row.
pub const TITLE_HEIGHT: f64 = 40.0;
pub const BAR_HEIGHT: f64 = 40.0;
pub const BAR_GAP: f64 = 20.0;
/// Filled bars narrower than this do not get a percentage label.
pub const BAR_LABEL_MIN_WIDTH: f64 = 60.0;

/// Placement of every element of the composite export, in document units.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportLayout {
    pub canvas: Canvas,
    /// Top-left corner of each 440×440 wheel box.
    pub wheel_origins: Vec<Point>,
    /// Baseline anchor of the comparison title.
    pub title_origin: Point,
    /// Full-width background track of each bar.
    pub bar_tracks: Vec<Rect>,
}

impl ExportLayout {
    /// Width available to bars (canvas width minus horizontal padding).
    pub fn inner_width(&self) -> f64 {
        f64::from(self.canvas.width) - 2.0 * PADDING
    }

    /// Filled part of bar `i` for a percentage in `0..=100`.
    pub fn bar_fill(&self, i: usize, percentage: f64) -> Option<Rect> {
        let track = self.bar_tracks.get(i)?;
        let width = self.inner_width() * percentage.clamp(0.0, 100.0) / 100.0;
        Some(Rect::new(track.x0, track.y0, track.x0 + width, track.y1))
    }
}

/// Lay out `n` wheels side by side above `n` comparison bars.
///
/// Up to three bars fit the nominal comparison panel; larger sets grow the canvas downwards.
pub fn export_layout(n: usize) -> ExportLayout {
    let wheel = f64::from(WHEEL_SIZE);
    let count = n as f64;
    let width = if n == 0 {
        2.0 * PADDING
    } else {
        wheel * count + WHEEL_GAP * (count - 1.0) + 2.0 * PADDING
    };

    let bars_height = if n == 0 {
        0.0
    } else {
        BAR_HEIGHT * count + BAR_GAP * (count - 1.0)
    };
    let comparison_height = COMPARISON_SECTION_HEIGHT.max(TITLE_HEIGHT + bars_height);
    let height = WHEEL_SECTION_HEIGHT + COMPARISON_PADDING + comparison_height;

    let wheel_origins = (0..n)
        .map(|i| Point::new(PADDING + i as f64 * (wheel + WHEEL_GAP), PADDING))
        .collect();

    let comparison_top = WHEEL_SECTION_HEIGHT + COMPARISON_PADDING;
    let bars_top = comparison_top + TITLE_HEIGHT;
    let bar_tracks = (0..n)
        .map(|i| {
            let y = bars_top + i as f64 * (BAR_HEIGHT + BAR_GAP);
            Rect::new(PADDING, y, width - PADDING, y + BAR_HEIGHT)
        })
        .collect();

    ExportLayout {
        canvas: Canvas::new(width as u32, height as u32),
        wheel_origins,
        title_origin: Point::new(PADDING, comparison_top + 26.0),
        bar_tracks,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/layout.rs"]
mod tests;
