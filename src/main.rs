//! carvis demo runner (default binary).
//!
//! Drives a scene with a synthetic pose sequence: the car spirals in toward the
//! setpoint while steering into the turn. Settings come from `CARVIS_*`
//! environment variables, and command-line flags override them.
//!
//! Logs go to stderr. In terminal mode the frames own the screen, so redirect
//! stderr (`2>carvis.log`) when running with `--verbose`.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use carvis::scene::{parse_target, Frame, SceneComposer, SceneConfig, StepOutcome};
use carvis::types::{AxisConvention, OutputMode, Pacing, Palette, PivotConvention, Pose, Target};

/// Top-down visualizer for a bicycle-model car approaching its setpoint
#[derive(Parser)]
#[command(name = "carvis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (written to stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Body length in pixels
    #[arg(short, long)]
    length: Option<f64>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Setpoint as "x,y,heading" (heading in radians)
    #[arg(short, long, value_parser = parse_target_arg, allow_hyphen_values = true)]
    target: Option<Target>,

    /// Pause between steps in milliseconds
    #[arg(long)]
    step_ms: Option<u64>,

    /// Pacing policy
    #[arg(long, value_enum)]
    pacing: Option<PacingArg>,

    /// Output mode
    #[arg(short, long, value_enum)]
    output: Option<OutputArg>,

    /// Axis convention of the poses
    #[arg(long, value_enum)]
    axis: Option<AxisArg>,

    /// Body point the pose refers to
    #[arg(long, value_enum)]
    pivot: Option<PivotArg>,

    /// Color scheme
    #[arg(long, value_enum)]
    palette: Option<PaletteArg>,

    /// Number of steps to run
    #[arg(short, long, default_value = "300")]
    steps: u32,

    /// Save the last frame as PNG
    #[arg(long)]
    save: Option<PathBuf>,
}

fn parse_target_arg(s: &str) -> Result<Target, String> {
    parse_target(s).ok_or_else(|| format!("expected \"x,y,heading\", got {s:?}"))
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PacingArg {
    /// Sleep the full interval after every frame
    Delay,
    /// Hold a steady frame rate, counting the time spent drawing
    Cadence,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    /// Draw frames in this terminal
    Terminal,
    /// Render off-screen; only useful with --save
    Buffer,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AxisArg {
    /// Screen convention, y grows downward
    YDown,
    /// Math convention, y grows upward
    YUp,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PivotArg {
    /// Pose point is the rear axle
    RearAxle,
    /// Pose point sits half a wheelbase to the side
    Lateral,
    /// Pose point is the body center
    Center,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PaletteArg {
    Default,
    Classic,
}

impl From<PacingArg> for Pacing {
    fn from(arg: PacingArg) -> Self {
        match arg {
            PacingArg::Delay => Pacing::Delay,
            PacingArg::Cadence => Pacing::Cadence,
        }
    }
}

impl From<OutputArg> for OutputMode {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Terminal => OutputMode::Terminal,
            OutputArg::Buffer => OutputMode::Buffer,
        }
    }
}

impl From<AxisArg> for AxisConvention {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::YDown => AxisConvention::YDown,
            AxisArg::YUp => AxisConvention::YUp,
        }
    }
}

impl From<PivotArg> for PivotConvention {
    fn from(arg: PivotArg) -> Self {
        match arg {
            PivotArg::RearAxle => PivotConvention::RearAxle,
            PivotArg::Lateral => PivotConvention::Lateral,
            PivotArg::Center => PivotConvention::BodyCenter,
        }
    }
}

impl From<PaletteArg> for Palette {
    fn from(arg: PaletteArg) -> Self {
        match arg {
            PaletteArg::Default => Palette::default(),
            PaletteArg::Classic => Palette::classic(),
        }
    }
}

impl Cli {
    fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig::from_env();
        if let Some(length) = self.length {
            config = config.with_length(length);
        }
        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(config.width);
            let height = self.height.unwrap_or(config.height);
            config = config.with_canvas(width, height);
        }
        if let Some(target) = self.target {
            config = config.with_target(target);
        }
        if let Some(step_ms) = self.step_ms {
            config = config.with_step_ms(step_ms);
        }
        if let Some(pacing) = self.pacing {
            config = config.with_pacing(pacing.into());
        }
        if let Some(output) = self.output {
            config = config.with_output(output.into());
        }
        if let Some(axis) = self.axis {
            config = config.with_axis(axis.into());
        }
        if let Some(pivot) = self.pivot {
            config = config.with_pivot(pivot.into());
        }
        if let Some(palette) = self.palette {
            config = config.with_palette(palette.into());
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.scene_config();
    let poses = spiral(&config, cli.steps);

    let mut scene = SceneComposer::open(config).context("open scene")?;

    // SIGINT only reaches us in buffer mode; raw mode turns Ctrl-C into a key.
    let stop = scene.stop_handle();
    ctrlc::set_handler(move || stop.request_stop()).context("install Ctrl-C handler")?;

    let last = run(&mut scene, poses, cli.save.is_some())?;
    scene.close()?;

    if let Some(path) = cli.save {
        let frame = last.context("no frame to save")?;
        frame
            .save_png(&path)
            .with_context(|| format!("save {}", path.display()))?;
        eprintln!("saved {}x{} frame to {}", frame.width(), frame.height(), path.display());
    }

    Ok(())
}

/// Step through `poses` until they run out or a stop is requested.
///
/// With `keep_last`, returns the last frame drawn, even when the run was
/// interrupted.
fn run(
    scene: &mut SceneComposer,
    poses: impl IntoIterator<Item = Pose>,
    keep_last: bool,
) -> Result<Option<Frame>> {
    let mut last = None;
    for pose in poses {
        match scene.step(pose)? {
            StepOutcome::Exported(frame) => last = Some(frame),
            StepOutcome::Presented if keep_last => {
                last = scene.canvas().map(Frame::from_canvas);
            }
            StepOutcome::Presented => {}
            StepOutcome::Interrupted => break,
        }
    }
    Ok(last.filter(|_| keep_last))
}

/// Poses spiraling in toward the setpoint, two laps over `steps` steps.
///
/// Steering follows the bicycle relation `atan(L / r)` for the current radius.
fn spiral(config: &SceneConfig, steps: u32) -> Vec<Pose> {
    let target = config.target;
    let start_radius = (config.width.min(config.height) as f64 * 0.4).max(config.length);
    let min_radius = config.length;

    (0..steps)
        .map(|i| {
            let t = i as f64 / steps.max(1) as f64;
            let phi = t * 2.0 * TAU;
            let r = start_radius + (min_radius - start_radius) * t;
            Pose::new(
                target.x + r * phi.cos(),
                target.y + r * phi.sin(),
                phi + FRAC_PI_2,
                (config.length / r).atan(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_environment() {
        let cli = Cli::parse_from([
            "carvis",
            "--length",
            "30",
            "--width",
            "200",
            "--target",
            "10,20,-1.5",
            "--output",
            "buffer",
            "--pivot",
            "lateral",
        ]);
        let config = cli.scene_config();
        assert_eq!(config.length, 30.0);
        assert_eq!(config.width, 200);
        assert_eq!(config.target, Target::new(10.0, 20.0, -1.5));
        assert_eq!(config.output, OutputMode::Buffer);
        assert_eq!(config.pivot, PivotConvention::Lateral);
    }

    #[test]
    fn width_alone_keeps_configured_height() {
        let cli = Cli::parse_from(["carvis", "--width", "320"]);
        let config = cli.scene_config();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, SceneConfig::from_env().height);

        let cli = Cli::parse_from(["carvis", "--width", "64", "--height", "48"]);
        let config = cli.scene_config();
        assert_eq!((config.width, config.height), (64, 48));
    }

    #[test]
    fn mode_flags_map_onto_scene_types() {
        let cli = Cli::parse_from([
            "carvis",
            "--axis",
            "y-up",
            "--pacing",
            "cadence",
            "--pivot",
            "center",
            "--palette",
            "classic",
        ]);
        let config = cli.scene_config();
        assert_eq!(config.axis, AxisConvention::YUp);
        assert_eq!(config.pacing, Pacing::Cadence);
        assert_eq!(config.pivot, PivotConvention::BodyCenter);
        assert_eq!(config.palette, Palette::classic());
    }

    #[test]
    fn rejects_unknown_modes() {
        assert!(Cli::try_parse_from(["carvis", "--output", "printer"]).is_err());
        assert!(Cli::try_parse_from(["carvis", "--target", "1,2"]).is_err());
    }

    #[test]
    fn help_lists_mode_values() {
        use clap::CommandFactory;

        let help = Cli::command().render_long_help().to_string();
        for value in ["y-up", "rear-axle", "cadence", "buffer", "classic"] {
            assert!(help.contains(value), "help is missing {value}");
        }
    }

    #[test]
    fn interrupted_run_keeps_last_frame() {
        let mut scene = SceneComposer::open(SceneConfig::headless()).unwrap();
        let stop = scene.stop_handle();
        let config = scene.config().clone();

        let poses = spiral(&config, 10).into_iter().enumerate().map(|(i, pose)| {
            if i == 3 {
                stop.request_stop();
            }
            pose
        });

        let last = run(&mut scene, poses, true).unwrap();
        let frame = last.expect("frame drawn before the stop");
        assert_eq!(frame.shape(), (500, 500, 3));
        assert!(!scene.is_open());
        assert_eq!(scene.frames_presented(), 3);
    }

    #[test]
    fn run_without_save_drops_frames() {
        let mut scene = SceneComposer::open(SceneConfig::headless()).unwrap();
        let poses = spiral(scene.config(), 2);
        assert!(run(&mut scene, poses, false).unwrap().is_none());
        assert!(scene.is_open());
    }

    #[test]
    fn spiral_starts_on_the_outer_ring() {
        let config = SceneConfig::headless();
        let poses = spiral(&config, 100);
        assert_eq!(poses.len(), 100);
        let first = poses[0];
        assert_eq!(first.x, 250.0 + 200.0);
        assert_eq!(first.y, 250.0);
        assert_eq!(first.heading, FRAC_PI_2);
        assert!(poses.iter().all(|p| p.is_finite()));
    }
}
