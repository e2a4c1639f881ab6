use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write as _;

use kurbo::Line;

use crate::foundation::core::{Canvas, Point, Vec2, polar};
use crate::model::opportunity::Opportunity;

/// Side length of the square a single wheel is drawn into.
pub const WHEEL_SIZE: u32 = 440;
/// Radius of a fully rated slice.
pub const WHEEL_RADIUS: f64 = 140.0;
/// Distance from the center to a slice's name label.
pub const LABEL_DISTANCE: f64 = WHEEL_RADIUS + 30.0;
/// Vertical offset of the value label below the name label.
pub const VALUE_LABEL_OFFSET: f64 = 16.0;
/// Radius of the decorative hub drawn at the center.
pub const HUB_RADIUS: f64 = 8.0;

/// Slices start at 12 o'clock.
const START_ANGLE: f64 = -FRAC_PI_2;

pub fn wheel_canvas() -> Canvas {
    Canvas::new(WHEEL_SIZE, WHEEL_SIZE)
}

pub fn wheel_center() -> Point {
    let half = f64::from(WHEEL_SIZE) / 2.0;
    Point::new(half, half)
}

/// Drawing data for one consideration.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelSegment {
    pub index: usize,
    pub consideration_id: u32,
    pub name: String,
    pub value: u8,
    /// Radians, clockwise in screen space.
    pub start_angle: f64,
    pub end_angle: f64,
    /// Wedge out to `radius * value / 10`; empty when the value is zero.
    pub filled_path: String,
    /// Full-radius wedge marking the slice boundary.
    pub outline_path: String,
    /// Radial line from the center at the start angle.
    pub divider: Line,
    pub label: Point,
    pub value_label: Point,
}

impl WheelSegment {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Layout of a whole wheel in its own 440×440 coordinate space.
///
/// A wheel with no considerations has no segments and only draws its outer ring and hub.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelGeometry {
    pub center: Point,
    pub radius: f64,
    pub hub_radius: f64,
    pub segments: Vec<WheelSegment>,
}

impl WheelGeometry {
    pub fn slice_angle(&self) -> Option<f64> {
        (!self.segments.is_empty()).then(|| TAU / self.segments.len() as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[tracing::instrument(
    skip(opportunity),
    fields(id = opportunity.id, n = opportunity.considerations.len())
)]
pub fn compute_wheel_geometry(opportunity: &Opportunity) -> WheelGeometry {
    let center = wheel_center();
    let n = opportunity.considerations.len();
    if n == 0 {
        tracing::debug!("wheel has no considerations; drawing an empty ring");
    }

    let slice = if n == 0 { 0.0 } else { TAU / n as f64 };
    let segments = opportunity
        .considerations
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let start_angle = START_ANGLE + i as f64 * slice;
            let end_angle = start_angle + slice;
            let mid = start_angle + slice / 2.0;
            let label = polar(center, LABEL_DISTANCE, mid);
            let filled_radius = WHEEL_RADIUS * c.fill_ratio();
            WheelSegment {
                index: i,
                consideration_id: c.id,
                name: c.name.clone(),
                value: c.value,
                start_angle,
                end_angle,
                filled_path: wedge_path(center, filled_radius, start_angle, end_angle),
                outline_path: wedge_path(center, WHEEL_RADIUS, start_angle, end_angle),
                divider: Line::new(center, polar(center, WHEEL_RADIUS, start_angle)),
                label,
                value_label: label + Vec2::new(0.0, VALUE_LABEL_OFFSET),
            }
        })
        .collect();

    WheelGeometry {
        center,
        radius: WHEEL_RADIUS,
        hub_radius: HUB_RADIUS,
        segments,
    }
}

/// SVG path data for a pie wedge from `start` to `end` (clockwise), or an empty string when the
/// radius is zero.
///
/// A wedge spanning the whole circle is drawn as two half arcs, since a single arc whose end
/// point equals its start point renders nothing.
pub fn wedge_path(center: Point, radius: f64, start: f64, end: f64) -> String {
    if radius <= 0.0 || end <= start {
        return String::new();
    }
    let from = polar(center, radius, start);
    let to = polar(center, radius, end);
    let sweep = end - start;

    let mut d = String::new();
    let _ = write!(
        d,
        "M {:.2} {:.2} L {:.2} {:.2} ",
        center.x, center.y, from.x, from.y
    );
    if sweep >= TAU - 1e-9 {
        let half = polar(center, radius, start + PI);
        let _ = write!(
            d,
            "A {r:.2} {r:.2} 0 0 1 {:.2} {:.2} A {r:.2} {r:.2} 0 0 1 {:.2} {:.2} Z",
            half.x,
            half.y,
            from.x,
            from.y,
            r = radius
        );
    } else {
        let large_arc = u8::from(sweep > PI);
        let _ = write!(
            d,
            "A {r:.2} {r:.2} 0 {large_arc} 1 {:.2} {:.2} Z",
            to.x,
            to.y,
            r = radius
        );
    }
    d
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/wheel.rs"]
mod tests;
