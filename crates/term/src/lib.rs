//! Terminal presentation for the interactive scene.
//!
//! Frames are drawn with half-block glyphs into a simple framebuffer that is
//! flushed to the terminal with crossterm, sending only changed cells after the
//! first frame.
//!
//! - [`fb`]: cells, colors and the framebuffer
//! - [`canvas_view`]: RGBA canvas to framebuffer mapping (pure)
//! - [`renderer`]: raw mode / alternate screen ownership and diff flushing
//! - [`keys`]: stop keys and the interruptible pause between frames

pub mod canvas_view;
pub mod fb;
pub mod keys;
pub mod renderer;

pub use carvis_types as types;

pub use canvas_view::{CanvasView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use keys::{is_stop_key, pause, PauseEvents};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

/// Current terminal size, or 80x24 when it cannot be queried.
pub fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
