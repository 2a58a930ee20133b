//! Exported frames.

use std::path::Path;

use image::{ImageFormat, ImageResult, Rgb, RgbImage, RgbaImage};

/// One composed frame as an RGB raster.
///
/// Row-major with the origin at the top-left, so the shape reads
/// `(height, width, 3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    image: RgbImage,
}

impl Frame {
    /// Copy a canvas, dropping its alpha channel.
    pub fn from_canvas(canvas: &RgbaImage) -> Self {
        let image = RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
            let [r, g, b, _] = canvas.get_pixel(x, y).0;
            Rgb([r, g, b])
        });
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.image.height() as usize, self.image.width() as usize, 3)
    }

    /// RGB at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Raw bytes, `height * width * 3` long.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.image.save_with_format(path, ImageFormat::Png)
    }
}
