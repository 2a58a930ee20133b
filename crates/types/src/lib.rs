//! Core types module - shared data structures and constants
//!
//! This module defines the plain data exchanged between the driver, the sprite
//! geometry and the presentation layers. All types are pure data with no external
//! dependencies, so they can be used by any caller that produces poses.
//!
//! # Coordinate conventions
//!
//! The canvas origin is the top-left pixel and the y axis grows downward. Angles
//! arriving from a caller are in radians and are converted to degrees exactly
//! (`degrees = radians * 180 / pi`) before any rotation happens.
//!
//! # Body geometry
//!
//! Every size of the car sprite is derived from the body length `L`:
//!
//! | Constant | Value | Derived size |
//! |----------|-------|--------------|
//! | `WIDTH_MULTIPLIER` | 1.2 | body width |
//! | `WHEEL_OFFSET_MULTIPLIER` | 0.6 | axle distance from the body ends |
//! | `WHEEL_WIDTH_MULTIPLIER` | 0.3 | wheel width |
//! | `WHEEL_HEIGHT_MULTIPLIER` | 0.6 | wheel height |
//! | `DOT_MULTIPLIER` | 0.25 | hub dot radius, relative to the wheel width |
//!
//! # Examples
//!
//! ```
//! use carvis_types::{AxisConvention, OutputMode, Pose};
//!
//! let pose = Pose::from_array([10.0, 20.0, std::f64::consts::PI, 0.0]);
//! assert!((pose.heading_deg() - 180.0).abs() < 1e-12);
//!
//! // Parse conventions (case-insensitive)
//! assert_eq!(AxisConvention::from_str("Y-UP"), Some(AxisConvention::YUp));
//! assert_eq!(OutputMode::from_str("buffer"), Some(OutputMode::Buffer));
//! ```

/// Body width as a multiple of the body length.
pub const WIDTH_MULTIPLIER: f64 = 1.2;

/// Distance from a body end to the nearest axle, as a multiple of the body length.
pub const WHEEL_OFFSET_MULTIPLIER: f64 = 0.6;

/// Wheel width as a multiple of the body length.
pub const WHEEL_WIDTH_MULTIPLIER: f64 = 0.3;

/// Wheel height as a multiple of the body length.
pub const WHEEL_HEIGHT_MULTIPLIER: f64 = 0.6;

/// Hub dot radius as a multiple of the wheel width.
pub const DOT_MULTIPLIER: f64 = 0.25;

/// Thickness in pixels of the heading line drawn on the setpoint marker.
pub const MARKER_LINE_THICKNESS: u32 = 5;

/// Fixed rotation bias (degrees) applied to the car body and the marker.
///
/// Both base images are laid out along their local y axis, so a quarter turn is
/// needed for heading 0 to point along canvas +x.
pub const BODY_BIAS_DEG: f64 = 90.0;

/// Default body length in pixels.
pub const DEFAULT_BODY_LENGTH: f64 = 40.0;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 500;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 500;

/// Default pause between steps in milliseconds (~30 FPS).
pub const DEFAULT_STEP_MS: u64 = 33;

/// Largest canvas side accepted by the composer.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// 8-bit RGBA color.
pub type Rgba8 = [u8; 4];

/// Agent pose for a single simulation step.
///
/// `heading` and `steering` are in radians. Positive angles follow the
/// mathematical convention of the active [`AxisConvention`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub steering: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, heading: f64, steering: f64) -> Self {
        Self {
            x,
            y,
            heading,
            steering,
        }
    }

    /// Build a pose from a state vector `[x, y, heading, steering]`.
    pub const fn from_array(state: [f64; 4]) -> Self {
        Self::new(state[0], state[1], state[2], state[3])
    }

    pub fn heading_deg(&self) -> f64 {
        self.heading.to_degrees()
    }

    pub fn steering_deg(&self) -> f64 {
        self.steering.to_degrees()
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.heading.is_finite()
            && self.steering.is_finite()
    }
}

/// Target pose drawn as the setpoint marker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    /// Heading in radians.
    pub heading: f64,
}

impl Target {
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// Drop the steering component of a full pose.
    pub const fn from_pose(pose: Pose) -> Self {
        Self::new(pose.x, pose.y, pose.heading)
    }

    pub fn heading_deg(&self) -> f64 {
        self.heading.to_degrees()
    }
}

/// Direction of the caller's vertical axis.
///
/// - **YDown**: caller coordinates are canvas coordinates (y grows downward)
/// - **YUp**: caller y grows upward; poses are mirrored into canvas space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisConvention {
    #[default]
    YDown,
    YUp,
}

impl AxisConvention {
    /// Parse from string (case-insensitive): "y-down" | "down", "y-up" | "up".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "y-down" | "ydown" | "down" => Some(AxisConvention::YDown),
            "y-up" | "yup" | "up" => Some(AxisConvention::YUp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AxisConvention::YDown => "y-down",
            AxisConvention::YUp => "y-up",
        }
    }

    /// Map a caller pose into canvas space.
    ///
    /// Mirroring the y axis reverses the visual sense of every rotation, so both
    /// angles flip sign together with the y coordinate.
    ///
    /// ```
    /// use carvis_types::{AxisConvention, Pose};
    ///
    /// let p = AxisConvention::YUp.to_canvas(Pose::new(5.0, 10.0, 1.0, 0.5), 100);
    /// assert_eq!(p, Pose::new(5.0, 90.0, -1.0, -0.5));
    /// ```
    pub fn to_canvas(&self, pose: Pose, canvas_height: u32) -> Pose {
        match self {
            AxisConvention::YDown => pose,
            AxisConvention::YUp => Pose::new(
                pose.x,
                canvas_height as f64 - pose.y,
                -pose.heading,
                -pose.steering,
            ),
        }
    }

    /// Map a target into canvas space (see [`AxisConvention::to_canvas`]).
    pub fn target_to_canvas(&self, target: Target, canvas_height: u32) -> Target {
        let pose = Pose::new(target.x, target.y, target.heading, 0.0);
        Target::from_pose(self.to_canvas(pose, canvas_height))
    }
}

/// Which body point the pose coordinates refer to.
///
/// The value is the offset from the pose point to the body center, expressed in
/// the heading frame before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotConvention {
    /// Pose point is the rear axle; body center lies half a wheelbase ahead.
    #[default]
    RearAxle,
    /// Offset of half a wheelbase across the heading axis.
    Lateral,
    /// Pose point is the body center.
    BodyCenter,
}

impl PivotConvention {
    /// Parse from string (case-insensitive): "rear-axle" | "rear", "lateral", "center".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rear-axle" | "rear" => Some(PivotConvention::RearAxle),
            "lateral" => Some(PivotConvention::Lateral),
            "center" | "body-center" => Some(PivotConvention::BodyCenter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PivotConvention::RearAxle => "rear-axle",
            PivotConvention::Lateral => "lateral",
            PivotConvention::BodyCenter => "center",
        }
    }

    /// Offset `(dx, dy)` for a body of length `length`.
    ///
    /// ```
    /// use carvis_types::PivotConvention;
    ///
    /// assert_eq!(PivotConvention::RearAxle.offset(41.0), (20.0, 0.0));
    /// assert_eq!(PivotConvention::Lateral.offset(40.0), (0.0, 20.0));
    /// assert_eq!(PivotConvention::BodyCenter.offset(40.0), (0.0, 0.0));
    /// ```
    pub fn offset(&self, length: f64) -> (f64, f64) {
        let half = (length / 2.0).floor();
        match self {
            PivotConvention::RearAxle => (half, 0.0),
            PivotConvention::Lateral => (0.0, half),
            PivotConvention::BodyCenter => (0.0, 0.0),
        }
    }
}

/// Where composed frames go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Present each frame to the controlling terminal.
    #[default]
    Terminal,
    /// Hand each frame back to the caller as an RGB buffer.
    Buffer,
}

impl OutputMode {
    /// Parse from string (case-insensitive): "terminal" | "tty", "buffer" | "export".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "terminal" | "tty" => Some(OutputMode::Terminal),
            "buffer" | "export" => Some(OutputMode::Buffer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Terminal => "terminal",
            OutputMode::Buffer => "buffer",
        }
    }
}

/// How the per-step pause is measured.
///
/// - **Delay**: wait the full interval after every present
/// - **Cadence**: wait only what is left of the interval since the previous present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    #[default]
    Delay,
    Cadence,
}

impl Pacing {
    /// Parse from string (case-insensitive): "delay", "cadence" | "tick".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "delay" => Some(Pacing::Delay),
            "cadence" | "tick" => Some(Pacing::Cadence),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pacing::Delay => "delay",
            Pacing::Cadence => "cadence",
        }
    }
}

/// Colors used to paint one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba8,
    pub body: Rgba8,
    pub wheel: Rgba8,
    pub wheel_dot: Rgba8,
    pub marker_fill: Rgba8,
    pub marker_accent: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [245, 245, 245, 255],
            body: [255, 0, 0, 255],
            wheel: [0, 0, 0, 255],
            wheel_dot: [255, 255, 255, 255],
            marker_fill: [0, 255, 0, 80],
            marker_accent: [0, 150, 0, 255],
        }
    }
}

impl Palette {
    /// White background with an opaque blue marker.
    pub fn classic() -> Self {
        Self {
            background: [255, 255, 255, 255],
            body: [255, 0, 0, 255],
            wheel: [0, 0, 0, 255],
            wheel_dot: [0, 0, 0, 255],
            marker_fill: [0, 0, 255, 255],
            marker_accent: [0, 0, 255, 255],
        }
    }

    /// Parse a palette name (case-insensitive): "default", "classic".
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Some(Palette::default()),
            "classic" => Some(Palette::classic()),
            _ => None,
        }
    }
}
