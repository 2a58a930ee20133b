//! CanvasView: maps an RGBA canvas into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The canvas is scaled uniformly (nearest pixel) to fit the viewport minus the
//! status row, centered, with letterbox bars around it. Every cell carries two
//! canvas rows, which compensates for the usual 1:2 glyph aspect ratio.

use image::RgbaImage;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub struct CanvasView {
    letterbox: Rgb,
    status_style: CellStyle,
    show_status: bool,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            letterbox: Rgb::new(0, 0, 0),
            status_style: CellStyle {
                fg: Rgb::new(200, 200, 200),
                bg: Rgb::new(30, 30, 40),
            },
            show_status: true,
        }
    }
}

impl CanvasView {
    pub fn with_letterbox(mut self, color: Rgb) -> Self {
        self.letterbox = color;
        self
    }

    pub fn with_status(mut self, show: bool) -> Self {
        self.show_status = show;
        self
    }

    fn status_rows(&self, viewport: Viewport) -> u16 {
        if self.show_status && viewport.height > 1 {
            1
        } else {
            0
        }
    }

    /// Render `canvas` (and an optional status line) into `fb`.
    ///
    /// The framebuffer is resized to the viewport and fully repainted.
    pub fn render_into(
        &self,
        canvas: &RgbaImage,
        status: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::pixels(self.letterbox, self.letterbox));

        let status_rows = self.status_rows(viewport);
        let rows = viewport.height - status_rows;
        let cols = viewport.width;

        if rows > 0 && cols > 0 && canvas.width() > 0 && canvas.height() > 0 {
            self.draw_canvas(canvas, cols, rows, fb);
        }

        if status_rows > 0 {
            let y = viewport.height - 1;
            for x in 0..cols {
                fb.set(
                    x,
                    y,
                    Cell {
                        ch: ' ',
                        style: self.status_style,
                    },
                );
            }
            if let Some(text) = status {
                fb.put_str(1, y, text, self.status_style);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        canvas: &RgbaImage,
        status: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(canvas, status, viewport, &mut fb);
        fb
    }

    fn draw_canvas(&self, canvas: &RgbaImage, cols: u16, rows: u16, fb: &mut FrameBuffer) {
        let screen_w = cols as f64;
        let screen_h = rows as f64 * 2.0;
        let (cw, ch) = (canvas.width() as f64, canvas.height() as f64);

        // Canvas pixels per screen pixel.
        let scale = (cw / screen_w).max(ch / screen_h);
        let off_x = ((screen_w - cw / scale) / 2.0).floor();
        let off_y = ((screen_h - ch / scale) / 2.0).floor();

        let sample = |sx: f64, sy: f64| -> Rgb {
            let x = ((sx - off_x + 0.5) * scale).floor();
            let y = ((sy - off_y + 0.5) * scale).floor();
            if x < 0.0 || y < 0.0 || x >= cw || y >= ch {
                return self.letterbox;
            }
            Rgb::from_rgba(canvas.get_pixel(x as u32, y as u32).0)
        };

        for cy in 0..rows {
            for cx in 0..cols {
                let top = sample(cx as f64, cy as f64 * 2.0);
                let bottom = sample(cx as f64, cy as f64 * 2.0 + 1.0);
                fb.set(cx, cy, Cell::pixels(top, bottom));
            }
        }
    }
}
