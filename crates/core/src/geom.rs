//! Canvas-space geometry: placement rectangles and vector rotation.

use glam::DVec2;

/// Rotate `v` by `angle_deg` degrees.
///
/// This is the mathematical rotation `(x cos - y sin, x sin + y cos)`. On a
/// y-down canvas it turns vectors clockwise.
pub fn rotate_vec(v: DVec2, angle_deg: f64) -> DVec2 {
    DVec2::from_angle(angle_deg.to_radians()).rotate(v)
}

/// Axis-aligned integer rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size whose center is `center`.
    ///
    /// The center is rounded to the nearest pixel and the half sizes use integer
    /// division, so [`Rect::center`] returns the rounded center exactly.
    /// Non-finite centers saturate instead of panicking.
    pub fn centered(center: DVec2, width: u32, height: u32) -> Self {
        let cx = center.x.round() as i32;
        let cy = center.y.round() as i32;
        Self {
            x: cx.saturating_sub((width / 2) as i32),
            y: cy.saturating_sub((height / 2) as i32),
            width,
            height,
        }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(
            self.x as f64 + (self.width / 2) as f64,
            self.y as f64 + (self.height / 2) as f64,
        )
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x as i64 && x < self.right() && y >= self.y as i64 && y < self.bottom()
    }
}
