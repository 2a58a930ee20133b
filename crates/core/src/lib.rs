//! Sprite geometry and rasterization - pure, deterministic, and testable
//!
//! This crate turns poses into placed images. It has **no I/O**: everything
//! works on in-memory RGBA rasters, which keeps it:
//!
//! - **Deterministic**: the same pose always yields bit-identical pixels
//! - **Testable**: every transform can be checked pixel by pixel
//! - **Portable**: frames can be shown in a terminal or exported as buffers
//!
//! # Module Structure
//!
//! - [`geom`]: placement rectangles and vector rotation
//! - [`rotate`]: image rotation (exact quarter turns, nearest or bilinear otherwise)
//! - [`raster`]: fills, discs, lines and alpha blitting
//! - [`sprite`]: the pivot/offset/heading rotation primitive
//! - [`body`]: car geometry derived from the body length
//! - [`car`]: body + steerable front wheel composite
//! - [`setpoint`]: target marker
//!
//! # Example
//!
//! ```
//! use carvis_core::{BodySpec, CarSprite};
//! use carvis_types::{Palette, PivotConvention};
//!
//! let spec = BodySpec::new(40.0).unwrap();
//! let mut car = CarSprite::new(spec, &Palette::default(), PivotConvention::RearAxle);
//!
//! // Heading 90 degrees: the body stands upright, half a wheelbase below the pivot.
//! let placed = car.update(100.0, 100.0, 90.0, 45.0);
//! assert_eq!(placed.image.dimensions(), (48, 88));
//! assert_eq!(placed.rect.center().y, 120.0);
//! ```

pub mod body;
pub mod car;
pub mod error;
pub mod geom;
pub mod raster;
pub mod rotate;
pub mod setpoint;
pub mod sprite;

pub use carvis_types as types;

pub use body::BodySpec;
pub use car::CarSprite;
pub use error::ConfigError;
pub use geom::{rotate_vec, Rect};
pub use rotate::{rotate, Resample};
pub use setpoint::SetpointSprite;
pub use sprite::{orient, OrientedSprite, Placed};

pub use glam::DVec2;
pub use image::{Rgba, RgbaImage};
