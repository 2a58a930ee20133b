//! Setpoint marker: translucent patch with a hub dot and a heading line.

use carvis_types::{Palette, Target, BODY_BIAS_DEG, MARKER_LINE_THICKNESS};
use glam::DVec2;

use crate::body::BodySpec;
use crate::geom::Rect;
use crate::raster::{fill_circle, filled, hline};
use crate::rotate::Resample;
use crate::sprite::{OrientedSprite, Placed};

/// Marker sprite, re-oriented only when the target changes.
#[derive(Debug, Clone)]
pub struct SetpointSprite {
    sprite: OrientedSprite,
    target: Target,
    placed: Placed,
}

impl SetpointSprite {
    /// Marker sized from the car geometry, placed at `target` (canvas space).
    pub fn new(spec: &BodySpec, palette: &Palette, target: Target) -> Self {
        let (w, h) = spec.marker_size();
        let mut image = filled(w, h, palette.marker_fill);
        fill_circle(
            &mut image,
            (w / 2) as i64,
            (h / 2) as i64,
            spec.dot_radius,
            palette.marker_accent,
        );
        hline(&mut image, 0, MARKER_LINE_THICKNESS, palette.marker_accent);

        let sprite = OrientedSprite::new(image)
            .with_bias(BODY_BIAS_DEG)
            .with_resample(Resample::Nearest);
        let placed = place(&sprite, target);
        Self {
            sprite,
            target,
            placed,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Move the marker. Returns false (and does nothing) when the target is unchanged.
    pub fn retarget(&mut self, target: Target) -> bool {
        if target == self.target {
            return false;
        }
        self.target = target;
        self.placed = place(&self.sprite, target);
        true
    }

    pub fn base_image(&self) -> &image::RgbaImage {
        self.sprite.base()
    }

    pub fn placed(&self) -> &Placed {
        &self.placed
    }

    pub fn rect(&self) -> Rect {
        self.placed.rect
    }
}

fn place(sprite: &OrientedSprite, target: Target) -> Placed {
    sprite.orient(DVec2::new(target.x, target.y), target.heading_deg())
}
