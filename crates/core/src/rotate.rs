//! Image rotation at scale 1.
//!
//! Angles are visual and counter-clockwise on a y-down canvas. The output is the
//! bounding box of the rotated rectangle; pixels the source does not cover are
//! transparent. Quarter turns are exact pixel permutations.

use image::{imageops, Rgba, RgbaImage};

use crate::raster::TRANSPARENT;

/// Tolerance used to recognize quarter turns after degree conversion.
const QUARTER_TURN_EPS: f64 = 1e-9;

/// Resampling used for angles that are not quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resample {
    /// Nearest source pixel. Hard edges, no new colors.
    Nearest,
    /// Alpha-weighted bilinear interpolation.
    #[default]
    Smooth,
}

/// Rotate `src` counter-clockwise by `angle_deg` degrees.
///
/// Non-finite angles yield an empty image.
pub fn rotate(src: &RgbaImage, angle_deg: f64, resample: Resample) -> RgbaImage {
    if !angle_deg.is_finite() {
        return RgbaImage::new(0, 0);
    }

    match quarter_turns(angle_deg) {
        Some(0) => src.clone(),
        // imageops turns clockwise
        Some(1) => imageops::rotate270(src),
        Some(2) => imageops::rotate180(src),
        Some(3) => imageops::rotate90(src),
        _ => rotate_sampled(src, angle_deg, resample),
    }
}

/// Number of counter-clockwise quarter turns when `angle_deg` is a multiple of 90.
fn quarter_turns(angle_deg: f64) -> Option<u8> {
    let norm = angle_deg.rem_euclid(360.0);
    let k = (norm / 90.0).round();
    if (norm - k * 90.0).abs() < QUARTER_TURN_EPS {
        Some((k as u8) % 4)
    } else {
        None
    }
}

/// Size of the bounding box of a `w`x`h` rectangle turned by `angle_deg`.
pub fn rotated_size(w: u32, h: u32, angle_deg: f64) -> (u32, u32) {
    if !angle_deg.is_finite() {
        return (0, 0);
    }
    if let Some(k) = quarter_turns(angle_deg) {
        return if k % 2 == 0 { (w, h) } else { (h, w) };
    }
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (w, h) = (w as f64, h as f64);
    let out_w = (w * cos.abs() + h * sin.abs() - QUARTER_TURN_EPS).ceil();
    let out_h = (w * sin.abs() + h * cos.abs() - QUARTER_TURN_EPS).ceil();
    (out_w.max(0.0) as u32, out_h.max(0.0) as u32)
}

fn rotate_sampled(src: &RgbaImage, angle_deg: f64, resample: Resample) -> RgbaImage {
    let (out_w, out_h) = rotated_size(src.width(), src.height(), angle_deg);
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (scx, scy) = (src.width() as f64 / 2.0, src.height() as f64 / 2.0);
    let (dcx, dcy) = (out_w as f64 / 2.0, out_h as f64 / 2.0);

    RgbaImage::from_fn(out_w, out_h, |x, y| {
        let dx = x as f64 + 0.5 - dcx;
        let dy = y as f64 + 0.5 - dcy;
        // Inverse mapping: destination offset back into the source frame.
        let sx = dx * cos - dy * sin + scx;
        let sy = dx * sin + dy * cos + scy;
        match resample {
            Resample::Nearest => sample_nearest(src, sx, sy),
            Resample::Smooth => sample_bilinear(src, sx, sy),
        }
    })
}

fn texel(src: &RgbaImage, x: i64, y: i64) -> Rgba<u8> {
    if x < 0 || y < 0 || x >= src.width() as i64 || y >= src.height() as i64 {
        return TRANSPARENT;
    }
    *src.get_pixel(x as u32, y as u32)
}

fn sample_nearest(src: &RgbaImage, sx: f64, sy: f64) -> Rgba<u8> {
    texel(src, sx.floor() as i64, sy.floor() as i64)
}

fn sample_bilinear(src: &RgbaImage, sx: f64, sy: f64) -> Rgba<u8> {
    let fx = sx - 0.5;
    let fy = sy - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - tx) * (1.0 - ty)),
        (x0 + 1, y0, tx * (1.0 - ty)),
        (x0, y0 + 1, (1.0 - tx) * ty),
        (x0 + 1, y0 + 1, tx * ty),
    ];

    // Premultiply so transparent neighbours do not darken edges.
    let mut acc = [0.0f64; 4];
    for (x, y, w) in taps {
        let p = texel(src, x, y).0;
        let a = p[3] as f64 * w;
        acc[0] += p[0] as f64 * a;
        acc[1] += p[1] as f64 * a;
        acc[2] += p[2] as f64 * a;
        acc[3] += a;
    }

    if acc[3] <= f64::EPSILON {
        return TRANSPARENT;
    }
    let to_u8 = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Rgba([
        to_u8(acc[0] / acc[3]),
        to_u8(acc[1] / acc[3]),
        to_u8(acc[2] / acc[3]),
        to_u8(acc[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::filled;

    /// 3x2 image with distinct pixels: value = 10 * (y * 3 + x + 1).
    fn labelled() -> RgbaImage {
        RgbaImage::from_fn(3, 2, |x, y| {
            let v = (10 * (y * 3 + x + 1)) as u8;
            Rgba([v, v, v, 255])
        })
    }

    #[test]
    fn zero_and_full_turns_are_identity() {
        let img = labelled();
        assert_eq!(rotate(&img, 0.0, Resample::Smooth), img);
        assert_eq!(rotate(&img, 360.0, Resample::Smooth), img);
        assert_eq!(rotate(&img, -720.0, Resample::Nearest), img);
    }

    #[test]
    fn quarter_turn_ccw_moves_right_column_to_top_row() {
        let img = labelled();
        let out = rotate(&img, 90.0, Resample::Smooth);
        assert_eq!(out.dimensions(), (2, 3));
        // Rightmost source column (30, 60) becomes the top row.
        assert_eq!(out.get_pixel(0, 0).0[0], 30);
        assert_eq!(out.get_pixel(1, 0).0[0], 60);
        // Leftmost column (10, 40) becomes the bottom row.
        assert_eq!(out.get_pixel(0, 2).0[0], 10);
        assert_eq!(out.get_pixel(1, 2).0[0], 40);
    }

    #[test]
    fn negative_quarter_turn_is_clockwise() {
        let img = labelled();
        assert_eq!(rotate(&img, -90.0, Resample::Nearest), imageops::rotate90(&img));
        assert_eq!(rotate(&img, 270.0, Resample::Nearest), imageops::rotate90(&img));
    }

    #[test]
    fn quarter_turn_survives_radian_round_trip() {
        let deg = std::f64::consts::FRAC_PI_2.to_degrees();
        assert_eq!(quarter_turns(deg), Some(1));
        assert_eq!(quarter_turns(-deg), Some(3));
        assert_eq!(quarter_turns(45.0), None);
    }

    #[test]
    fn quarter_turns_round_trip_exactly() {
        let img = labelled();
        let there = rotate(&img, 90.0, Resample::Smooth);
        let back = rotate(&there, -90.0, Resample::Smooth);
        assert_eq!(back, img);
    }

    #[test]
    fn diagonal_turn_grows_bounding_box() {
        let img = filled(10, 10, [255, 0, 0, 255]);
        let out = rotate(&img, 45.0, Resample::Smooth);
        assert_eq!(out.dimensions(), (15, 15));
        // Center stays opaque, corners become transparent.
        assert_eq!(out.get_pixel(7, 7).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(14, 14).0[3], 0);
    }

    #[test]
    fn smooth_edges_keep_source_color() {
        let img = filled(10, 10, [255, 0, 0, 255]);
        let out = rotate(&img, 30.0, Resample::Smooth);
        for px in out.pixels().filter(|p| p.0[3] > 0) {
            assert_eq!(&px.0[..3], &[255, 0, 0]);
        }
    }

    #[test]
    fn nearest_introduces_no_new_colors() {
        let img = labelled();
        let out = rotate(&img, 33.0, Resample::Nearest);
        for px in out.pixels().filter(|p| p.0[3] > 0) {
            assert!(img.pixels().any(|q| q == px));
        }
    }

    #[test]
    fn non_finite_angle_yields_empty_image() {
        let img = labelled();
        assert_eq!(rotate(&img, f64::NAN, Resample::Smooth).dimensions(), (0, 0));
        assert_eq!(rotate(&img, f64::INFINITY, Resample::Nearest).dimensions(), (0, 0));
    }

    #[test]
    fn rotated_size_matches_quarter_and_diagonal() {
        assert_eq!(rotated_size(48, 88, 0.0), (48, 88));
        assert_eq!(rotated_size(48, 88, 90.0), (88, 48));
        assert_eq!(rotated_size(12, 24, 180.0), (12, 24));
        let (w, h) = rotated_size(12, 24, 45.0);
        assert_eq!((w, h), (26, 26));
    }
}
