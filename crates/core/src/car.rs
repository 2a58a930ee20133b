//! Car composite: body with a steerable front wheel.
//!
//! Each update starts from the cached base body (fill + rear wheel), bakes the
//! steered front wheel into body-local space, then orients the composite by the
//! heading. Steering and heading never accumulate between frames.

use carvis_types::{Palette, PivotConvention, BODY_BIAS_DEG};
use glam::DVec2;
use image::RgbaImage;

use crate::body::BodySpec;
use crate::geom::Rect;
use crate::raster::{blit, fill_circle, filled};
use crate::rotate::{rotate, Resample};
use crate::sprite::{OrientedSprite, Placed};

#[derive(Debug, Clone)]
pub struct CarSprite {
    spec: BodySpec,
    body: OrientedSprite,
    wheel: RgbaImage,
    placed: Placed,
}

impl CarSprite {
    pub fn new(spec: BodySpec, palette: &Palette, pivot: PivotConvention) -> Self {
        let wheel = wheel_image(&spec, palette);

        let mut base = filled(spec.width, spec.height, palette.body);
        let (rx, ry) = spec.rear_mount();
        blit_centered(&mut base, &wheel, rx, ry);

        let (dx, dy) = pivot.offset(spec.length as f64);
        let body = OrientedSprite::new(base)
            .with_offset(DVec2::new(dx, dy))
            .with_bias(BODY_BIAS_DEG)
            .with_resample(Resample::Smooth);

        let mut car = Self {
            spec,
            body,
            wheel,
            placed: Placed::default(),
        };
        car.update(0.0, 0.0, 0.0, 0.0);
        car
    }

    pub fn spec(&self) -> &BodySpec {
        &self.spec
    }

    /// Body without the front wheel, as cached at construction.
    pub fn base_image(&self) -> &RgbaImage {
        self.body.base()
    }

    pub fn wheel_image(&self) -> &RgbaImage {
        &self.wheel
    }

    /// Recompute the frame for pose `(x, y)`; `theta` and `delta` in degrees.
    pub fn update(&mut self, x: f64, y: f64, theta: f64, delta: f64) -> &Placed {
        let local = self.body_with_front_wheel(delta);
        self.placed = self.body.orient_image(&local, DVec2::new(x, y), theta);
        &self.placed
    }

    /// Body-local image with the front wheel steered by `delta` degrees.
    pub fn body_with_front_wheel(&self, delta: f64) -> RgbaImage {
        let mut local = self.body.base().clone();
        let steered = rotate(&self.wheel, -delta, Resample::Nearest);
        let (fx, fy) = self.spec.front_mount();
        blit_centered(&mut local, &steered, fx, fy);
        local
    }

    pub fn placed(&self) -> &Placed {
        &self.placed
    }

    pub fn rect(&self) -> Rect {
        self.placed.rect
    }
}

fn wheel_image(spec: &BodySpec, palette: &Palette) -> RgbaImage {
    let mut wheel = filled(spec.wheel_width, spec.wheel_height, palette.wheel);
    fill_circle(
        &mut wheel,
        (spec.wheel_width / 2) as i64,
        (spec.wheel_height / 2) as i64,
        spec.dot_radius,
        palette.wheel_dot,
    );
    wheel
}

fn blit_centered(dst: &mut RgbaImage, src: &RgbaImage, cx: i64, cy: i64) {
    let rect = Rect::centered(DVec2::new(cx as f64, cy as f64), src.width(), src.height());
    blit(dst, src, rect.x as i64, rect.y as i64);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car() -> CarSprite {
        CarSprite::new(
            BodySpec::new(40.0).unwrap(),
            &Palette::default(),
            PivotConvention::RearAxle,
        )
    }

    #[test]
    fn base_has_rear_wheel_only() {
        let car = car();
        let base = car.base_image();
        let black = Palette::default().wheel;
        let red = Palette::default().body;
        // Rear wheel spans x 18..30, y 12..36.
        assert_eq!(base.get_pixel(18, 12).0, black);
        assert_eq!(base.get_pixel(17, 12).0, red);
        // Hub dot at the rear wheel center.
        assert_eq!(base.get_pixel(24, 24).0, Palette::default().wheel_dot);
        // Front mount is plain body in the base.
        assert_eq!(base.get_pixel(18, 52).0, red);
    }

    #[test]
    fn wheel_has_centered_hub() {
        let car = car();
        let wheel = car.wheel_image();
        let palette = Palette::default();
        assert_eq!(wheel.dimensions(), (12, 24));
        assert_eq!(wheel.get_pixel(6, 12).0, palette.wheel_dot);
        assert_eq!(wheel.get_pixel(6, 15).0, palette.wheel_dot);
        assert_eq!(wheel.get_pixel(6, 16).0, palette.wheel);
        assert_eq!(wheel.get_pixel(0, 0).0, palette.wheel);
    }

    #[test]
    fn unsteered_front_wheel_matches_rear() {
        let car = car();
        let local = car.body_with_front_wheel(0.0);
        for dy in 0..24 {
            for dx in 0..12 {
                assert_eq!(
                    local.get_pixel(18 + dx, 12 + dy),
                    local.get_pixel(18 + dx, 52 + dy)
                );
            }
        }
    }

    #[test]
    fn quarter_steer_lies_across_the_body() {
        let car = car();
        let local = car.body_with_front_wheel(90.0);
        let black = Palette::default().wheel;
        // Turned wheel is 24 wide, 12 tall, centered on (24, 64).
        assert_eq!(local.get_pixel(12, 58).0, black);
        assert_eq!(local.get_pixel(35, 69).0, black);
        assert_eq!(local.get_pixel(12, 57).0, Palette::default().body);
    }

    #[test]
    fn zero_pose_keeps_pivot_at_origin() {
        let mut car = car();
        let placed = car.update(0.0, 0.0, 0.0, 0.0).clone();
        assert_eq!(placed.image.dimensions(), (88, 48));
        assert_eq!(placed.rect.center() - placed.rotated_offset, DVec2::ZERO);
        assert_eq!(placed.rect.center(), DVec2::new(20.0, 0.0));
    }

    #[test]
    fn update_never_touches_base() {
        let mut car = car();
        let before = car.base_image().clone();
        car.update(10.0, 10.0, 33.0, 27.0);
        car.update(10.0, 10.0, -12.0, -45.0);
        assert_eq!(car.base_image(), &before);
    }

    #[test]
    fn body_center_pivot_centers_body_on_pose() {
        let mut car = CarSprite::new(
            BodySpec::new(40.0).unwrap(),
            &Palette::default(),
            PivotConvention::BodyCenter,
        );
        let rect = car.update(200.0, 150.0, 30.0, 0.0).rect;
        assert_eq!(rect.center(), DVec2::new(200.0, 150.0));
    }
}
