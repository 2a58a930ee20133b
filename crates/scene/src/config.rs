//! Scene configuration: defaults, builder methods, environment overrides.

use carvis_core::{BodySpec, ConfigError};
use carvis_types::{
    AxisConvention, OutputMode, Pacing, Palette, PivotConvention, Target, DEFAULT_BODY_LENGTH,
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_STEP_MS, MAX_CANVAS_SIDE,
};

/// Everything a [`SceneComposer`](crate::SceneComposer) needs at `open`.
///
/// `target` is given in the caller's axis convention, like the poses passed
/// to `step`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub length: f64,
    pub width: u32,
    pub height: u32,
    pub target: Target,
    pub step_ms: u64,
    pub pacing: Pacing,
    pub output: OutputMode,
    pub axis: AxisConvention,
    pub pivot: PivotConvention,
    pub palette: Palette,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_BODY_LENGTH,
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            target: Target::new(
                DEFAULT_CANVAS_WIDTH as f64 / 2.0,
                DEFAULT_CANVAS_HEIGHT as f64 / 2.0,
                0.0,
            ),
            step_ms: DEFAULT_STEP_MS,
            pacing: Pacing::default(),
            output: OutputMode::default(),
            axis: AxisConvention::default(),
            pivot: PivotConvention::default(),
            palette: Palette::default(),
        }
    }
}

impl SceneConfig {
    /// Buffer output with no pause between steps. Handy for tests and batch export.
    pub fn headless() -> Self {
        Self::default()
            .with_output(OutputMode::Buffer)
            .with_step_ms(0)
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_step_ms(mut self, step_ms: u64) -> Self {
        self.step_ms = step_ms;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn with_axis(mut self, axis: AxisConvention) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_pivot(mut self, pivot: PivotConvention) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Check the body length and canvas size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        BodySpec::new(self.length)?;
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::NonPositiveCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_CANVAS_SIDE || self.height > MAX_CANVAS_SIDE {
            return Err(ConfigError::CanvasTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_CANVAS_SIDE,
            });
        }
        Ok(())
    }

    /// Defaults overridden by `CARVIS_*` environment variables.
    ///
    /// Values that fail to parse are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(length) = lookup("CARVIS_LENGTH").and_then(|s| s.trim().parse().ok()) {
            config.length = length;
        }
        if let Some(width) = lookup("CARVIS_WIDTH").and_then(|s| s.trim().parse().ok()) {
            config.width = width;
        }
        if let Some(height) = lookup("CARVIS_HEIGHT").and_then(|s| s.trim().parse().ok()) {
            config.height = height;
        }
        if let Some(target) = lookup("CARVIS_TARGET").and_then(|s| parse_target(&s)) {
            config.target = target;
        }
        if let Some(step_ms) = lookup("CARVIS_STEP_MS").and_then(|s| s.trim().parse().ok()) {
            config.step_ms = step_ms;
        }
        if let Some(pacing) = lookup("CARVIS_PACING").and_then(|s| Pacing::from_str(&s)) {
            config.pacing = pacing;
        }
        if let Some(output) = lookup("CARVIS_OUTPUT").and_then(|s| OutputMode::from_str(&s)) {
            config.output = output;
        }
        if let Some(axis) = lookup("CARVIS_AXIS").and_then(|s| AxisConvention::from_str(&s)) {
            config.axis = axis;
        }
        if let Some(pivot) = lookup("CARVIS_PIVOT").and_then(|s| PivotConvention::from_str(&s)) {
            config.pivot = pivot;
        }
        if let Some(palette) = lookup("CARVIS_PALETTE").and_then(|s| Palette::from_name(&s)) {
            config.palette = palette;
        }

        config
    }
}

/// Parse `"x,y,heading"` (heading in radians).
pub fn parse_target(s: &str) -> Option<Target> {
    let mut parts = s.split(',').map(|p| p.trim().parse::<f64>());
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    let heading = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Target::new(x, y, heading))
}
