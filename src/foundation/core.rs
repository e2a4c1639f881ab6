pub use kurbo::{Point, Rect, Vec2};

/// Pixel size of a vector document (user units map 1:1 to pixels at scale 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Scaled pixel size, rounded up and never zero.
    pub fn scaled(self, scale: f32) -> (u32, u32) {
        fn dim(v: u32, scale: f32) -> u32 {
            ((v as f32) * scale).ceil().max(1.0) as u32
        }
        (dim(self.width, scale), dim(self.height, scale))
    }
}

/// Point at `radius` from `center` along `angle` (radians, y axis pointing down).
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    center + Vec2::from_angle(angle) * radius
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
