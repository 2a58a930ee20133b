//! Raster primitives on RGBA images.
//!
//! Fills and shape draws overwrite pixels (alpha included). Only [`blit`]
//! blends, using the usual "source over destination" rule.

use carvis_types::Rgba8;
use image::{Rgba, RgbaImage};

use crate::geom::Rect;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Image of the given size filled with `color`.
pub fn filled(width: u32, height: u32, color: Rgba8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

pub fn fill(img: &mut RgbaImage, color: Rgba8) {
    for px in img.pixels_mut() {
        *px = Rgba(color);
    }
}

/// Filled disc of `radius` around pixel `(cx, cy)`. A zero radius draws nothing.
pub fn fill_circle(img: &mut RgbaImage, cx: i64, cy: i64, radius: u32, color: Rgba8) {
    if radius == 0 {
        return;
    }
    let r = radius as i64;
    let (w, h) = (img.width() as i64, img.height() as i64);
    for y in (cy - r).max(0)..=(cy + r).min(h - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(w - 1) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x as u32, y as u32, Rgba(color));
            }
        }
    }
}

/// Full-width horizontal line centered on row `y`, `thickness` pixels tall.
///
/// Rows falling outside the image are clipped, so a line on row 0 only shows
/// its lower half.
pub fn hline(img: &mut RgbaImage, y: i64, thickness: u32, color: Rgba8) {
    if thickness == 0 {
        return;
    }
    let half = (thickness / 2) as i64;
    let top = y - half;
    let bottom = top + thickness as i64;
    let h = img.height() as i64;
    for row in top.max(0)..bottom.min(h) {
        for x in 0..img.width() {
            img.put_pixel(x, row as u32, Rgba(color));
        }
    }
}

/// Composite `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// Pixels outside `dst` are clipped. Returns the clipped area that was touched,
/// or `None` when the images do not overlap.
pub fn blit(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) -> Option<Rect> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + src.width() as i64).min(dst.width() as i64);
    let y1 = (y + src.height() as i64).min(dst.height() as i64);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    for dy in y0..y1 {
        for dx in x0..x1 {
            let s = src.get_pixel((dx - x) as u32, (dy - y) as u32).0;
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            d.0 = blend_over(s, d.0);
        }
    }

    Some(Rect::new(
        x0 as i32,
        y0 as i32,
        (x1 - x0) as u32,
        (y1 - y0) as u32,
    ))
}

/// Composite a placed sprite at its rectangle.
pub fn blit_at(dst: &mut RgbaImage, src: &RgbaImage, rect: Rect) -> Option<Rect> {
    blit(dst, src, rect.x as i64, rect.y as i64)
}

/// Source-over blend of two straight-alpha pixels.
pub fn blend_over(src: Rgba8, dst: Rgba8) -> Rgba8 {
    let sa = src[3] as u32;
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = dst[3] as u32;
    // out_a scaled by 255: sa*255 + da*(255 - sa)
    let out_a = sa * 255 + da * (255 - sa);
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mix = |s: u8, d: u8| -> u8 {
        let num = s as u32 * sa * 255 + d as u32 * da * (255 - sa);
        ((num + out_a / 2) / out_a).min(255) as u8
    };

    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        ((out_a + 127) / 255).min(255) as u8,
    ]
}
