//! Oriented sprites: rotate an image about a pivot with an offset.
//!
//! A sprite is placed by three values:
//! - a **pivot** on the canvas (usually the pose position),
//! - an **offset** from the pivot to the image center, in the sprite's own frame,
//! - a **heading** in degrees.
//!
//! The offset turns with the heading (see [`rotate_vec`]) while the image turns
//! visually by `bias - heading`, so both stay consistent on a y-down canvas.

use glam::DVec2;
use image::RgbaImage;

use crate::geom::{rotate_vec, Rect};
use crate::rotate::{rotate, Resample};

/// Latest rotated image and where it goes. Overwritten every frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placed {
    pub image: RgbaImage,
    pub rect: Rect,
    /// Offset after rotation; `rect.center()` is `pivot + rotated_offset` rounded.
    pub rotated_offset: DVec2,
}

/// Rotate `image` and place it so its center lands on `pivot + R(heading) * offset`.
pub fn orient(
    image: &RgbaImage,
    pivot: DVec2,
    offset: DVec2,
    heading_deg: f64,
    bias_deg: f64,
    resample: Resample,
) -> Placed {
    let rotated = rotate(image, bias_deg - heading_deg, resample);
    let rotated_offset = rotate_vec(offset, heading_deg);
    let rect = Rect::centered(pivot + rotated_offset, rotated.width(), rotated.height());
    Placed {
        image: rotated,
        rect,
        rotated_offset,
    }
}

/// Immutable base image plus the parameters needed to orient it.
#[derive(Debug, Clone)]
pub struct OrientedSprite {
    base: RgbaImage,
    offset: DVec2,
    bias_deg: f64,
    resample: Resample,
}

impl OrientedSprite {
    pub fn new(base: RgbaImage) -> Self {
        Self {
            base,
            offset: DVec2::ZERO,
            bias_deg: 0.0,
            resample: Resample::Smooth,
        }
    }

    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_bias(mut self, bias_deg: f64) -> Self {
        self.bias_deg = bias_deg;
        self
    }

    pub fn with_resample(mut self, resample: Resample) -> Self {
        self.resample = resample;
        self
    }

    pub fn base(&self) -> &RgbaImage {
        &self.base
    }

    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    /// Orient the cached base image.
    pub fn orient(&self, pivot: DVec2, heading_deg: f64) -> Placed {
        self.orient_image(&self.base, pivot, heading_deg)
    }

    /// Orient a derived image (e.g. a copy of the base with extra layers drawn on it)
    /// using this sprite's offset, bias and resampling.
    pub fn orient_image(&self, image: &RgbaImage, pivot: DVec2, heading_deg: f64) -> Placed {
        orient(
            image,
            pivot,
            self.offset,
            heading_deg,
            self.bias_deg,
            self.resample,
        )
    }
}
