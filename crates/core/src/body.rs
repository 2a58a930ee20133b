//! BodySpec: every pixel size of the car derived from its length.

use carvis_types::{
    DOT_MULTIPLIER, WHEEL_HEIGHT_MULTIPLIER, WHEEL_OFFSET_MULTIPLIER, WHEEL_WIDTH_MULTIPLIER,
    WIDTH_MULTIPLIER,
};

use crate::error::ConfigError;

/// Fixed car geometry in pixels.
///
/// The body image is laid out along its local y axis: the rear axle sits
/// `wheel_offset` pixels below the top edge and the front axle `length` pixels
/// further down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySpec {
    /// Wheelbase `L`.
    pub length: u32,
    pub wheel_offset: u32,
    pub width: u32,
    pub height: u32,
    pub wheel_width: u32,
    pub wheel_height: u32,
    pub dot_radius: u32,
}

impl BodySpec {
    /// Derive the geometry for body length `length`. Fractions are truncated.
    pub fn new(length: f64) -> Result<Self, ConfigError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(ConfigError::NonPositiveLength(length));
        }

        let l = length.floor();
        let wheel_offset = (WHEEL_OFFSET_MULTIPLIER * length) as u32;
        let width = (WIDTH_MULTIPLIER * length) as u32;
        let height = (wheel_offset as f64 * 2.0 + l) as u32;
        let wheel_width = (WHEEL_WIDTH_MULTIPLIER * length) as u32;
        let wheel_height = (WHEEL_HEIGHT_MULTIPLIER * length) as u32;
        let dot_radius = (DOT_MULTIPLIER * wheel_width as f64) as u32;

        if wheel_width == 0 || wheel_height == 0 || width == 0 {
            return Err(ConfigError::DegenerateBody(length));
        }

        let spec = Self {
            length: l as u32,
            wheel_offset,
            width,
            height,
            wheel_width,
            wheel_height,
            dot_radius,
        };
        tracing::debug!(?spec, "derived body geometry");
        Ok(spec)
    }

    /// Body-local center of the rear wheel.
    pub fn rear_mount(&self) -> (i64, i64) {
        ((self.width / 2) as i64, self.wheel_offset as i64)
    }

    /// Body-local center of the steerable front wheel.
    pub fn front_mount(&self) -> (i64, i64) {
        (
            (self.width / 2) as i64,
            (self.wheel_offset + self.length) as i64,
        )
    }

    /// Size of the setpoint marker image.
    pub fn marker_size(&self) -> (u32, u32) {
        (self.width, self.wheel_offset * 2)
    }
}
