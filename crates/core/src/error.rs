//! Construction-time errors.

use thiserror::Error;

/// Invalid construction parameters.
///
/// Raised before any canvas or surface is allocated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("body length must be a positive finite number, got {0}")]
    NonPositiveLength(f64),

    #[error("body length {0} is too small to draw a wheel")]
    DegenerateBody(f64),

    #[error("canvas dimensions must be positive, got {width}x{height}")]
    NonPositiveCanvas { width: u32, height: u32 },

    #[error("canvas {width}x{height} exceeds the {max} px limit per side")]
    CanvasTooLarge { width: u32, height: u32, max: u32 },
}
