//! SceneComposer: canvas ownership, per-step composition and presentation.
//!
//! A composer is either open (canvas and surface held, steps accepted) or
//! closed (everything released). Closing is one-way and happens on `close`,
//! on a stop request observed by `step`, or on drop.

use std::time::{Duration, Instant};

use carvis_core::raster::{blit_at, fill, filled};
use carvis_core::{BodySpec, CarSprite, RgbaImage, SetpointSprite};
use carvis_term::{CanvasView, FrameBuffer, Rgb, TerminalRenderer};
use carvis_types::{OutputMode, Pose, Target};
use tracing::{debug, info, trace, warn, Level};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::frame::Frame;
use crate::pacer::FramePacer;
use crate::stop::StopHandle;

/// Result of a successful [`SceneComposer::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The frame was drawn to the terminal.
    Presented,
    /// The frame, in buffer mode.
    Exported(Frame),
    /// A stop request closed the composer; no frame was produced.
    Interrupted,
}

impl StepOutcome {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, StepOutcome::Interrupted)
    }

    pub fn into_frame(self) -> Option<Frame> {
        match self {
            StepOutcome::Exported(frame) => Some(frame),
            _ => None,
        }
    }
}

struct TerminalSurface {
    renderer: TerminalRenderer,
    view: CanvasView,
    fb: FrameBuffer,
}

impl TerminalSurface {
    fn acquire(letterbox: Rgb) -> anyhow::Result<Self> {
        let mut renderer = TerminalRenderer::new();
        renderer.acquire()?;
        Ok(Self {
            renderer,
            view: CanvasView::default().with_letterbox(letterbox),
            fb: FrameBuffer::new(0, 0),
        })
    }

    fn present(&mut self, canvas: &RgbaImage, status: &str) -> anyhow::Result<()> {
        let viewport = carvis_term::viewport();
        self.view
            .render_into(canvas, Some(status), viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

enum Surface {
    Terminal(TerminalSurface),
    Buffer,
}

struct OpenScene {
    canvas: RgbaImage,
    car: CarSprite,
    setpoint: SetpointSprite,
    surface: Surface,
    pacer: FramePacer,
    clock: Instant,
}

enum Lifecycle {
    Open(Box<OpenScene>),
    Closed,
}

pub struct SceneComposer {
    config: SceneConfig,
    state: Lifecycle,
    stop: StopHandle,
    frames_presented: u64,
}

impl SceneComposer {
    /// Validate `config`, build the sprites and canvas, then acquire the surface.
    ///
    /// Nothing is acquired when validation fails.
    pub fn open(config: SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let spec = BodySpec::new(config.length)?;

        let car = CarSprite::new(spec, &config.palette, config.pivot);
        let target = config.axis.target_to_canvas(config.target, config.height);
        let setpoint = SetpointSprite::new(&spec, &config.palette, target);
        let canvas = filled(config.width, config.height, config.palette.background);
        let pacer = FramePacer::new(config.pacing, config.step_ms);

        let surface = match config.output {
            OutputMode::Terminal => Surface::Terminal(
                TerminalSurface::acquire(Rgb::from_rgba(config.palette.background))
                    .map_err(SceneError::Surface)?,
            ),
            OutputMode::Buffer => Surface::Buffer,
        };

        info!(
            width = config.width,
            height = config.height,
            length = config.length,
            output = config.output.as_str(),
            axis = config.axis.as_str(),
            pivot = config.pivot.as_str(),
            "scene opened"
        );

        Ok(Self {
            config,
            state: Lifecycle::Open(Box::new(OpenScene {
                canvas,
                car,
                setpoint,
                surface,
                pacer,
                clock: Instant::now(),
            })),
            stop: StopHandle::new(),
            frames_presented: 0,
        })
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, Lifecycle::Open(_))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Handle that interrupts this composer from anywhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// The last composed canvas, while open.
    pub fn canvas(&self) -> Option<&RgbaImage> {
        self.open_scene().map(|s| &s.canvas)
    }

    pub fn car(&self) -> Option<&CarSprite> {
        self.open_scene().map(|s| &s.car)
    }

    pub fn setpoint(&self) -> Option<&SetpointSprite> {
        self.open_scene().map(|s| &s.setpoint)
    }

    fn open_scene(&self) -> Option<&OpenScene> {
        match &self.state {
            Lifecycle::Open(scene) => Some(scene),
            Lifecycle::Closed => None,
        }
    }

    /// Draw one frame for `pose`, present it, then pause.
    pub fn step(&mut self, pose: Pose) -> Result<StepOutcome, SceneError> {
        if !self.is_open() {
            return Err(SceneError::Closed);
        }
        if self.stop.is_requested() {
            return self.interrupt();
        }

        let Lifecycle::Open(scene) = &mut self.state else {
            return Err(SceneError::Closed);
        };
        let scene = &mut **scene;

        if !pose.is_finite() {
            // stderr is unreadable while the terminal is in raw mode.
            if diagnostics_level(self.config.output) == Level::WARN {
                warn!(?pose, "non-finite pose");
            } else {
                debug!(?pose, "non-finite pose");
            }
        }
        let canvas_pose = self.config.axis.to_canvas(pose, self.config.height);
        scene.compose(canvas_pose, &self.config);
        trace!(?canvas_pose, frame = self.frames_presented, "composed");

        let outcome = match &mut scene.surface {
            Surface::Terminal(term) => {
                let status = status_line(canvas_pose, self.frames_presented);
                if let Err(e) = term.present(&scene.canvas, &status) {
                    self.abandon();
                    return Err(SceneError::Surface(e));
                }
                StepOutcome::Presented
            }
            Surface::Buffer => StepOutcome::Exported(Frame::from_canvas(&scene.canvas)),
        };
        self.frames_presented += 1;

        if let Err(e) = self.pause() {
            self.abandon();
            return Err(e);
        }

        if self.stop.is_requested() {
            return self.interrupt();
        }
        Ok(outcome)
    }

    /// Replace the setpoint. `target` uses the caller's axis convention.
    pub fn set_target(&mut self, target: Target) -> Result<(), SceneError> {
        let Lifecycle::Open(scene) = &mut self.state else {
            return Err(SceneError::Closed);
        };
        let mapped = self.config.axis.target_to_canvas(target, self.config.height);
        if scene.setpoint.retarget(mapped) {
            debug!(?target, "setpoint moved");
        }
        self.config.target = target;
        Ok(())
    }

    /// Release the surface and the canvas. Calling it again does nothing.
    pub fn close(&mut self) -> Result<(), SceneError> {
        let Lifecycle::Open(mut scene) = std::mem::replace(&mut self.state, Lifecycle::Closed)
        else {
            return Ok(());
        };
        info!(frames = self.frames_presented, "scene closed");
        if let Surface::Terminal(term) = &mut scene.surface {
            term.renderer.release().map_err(SceneError::Surface)?;
        }
        Ok(())
    }

    fn interrupt(&mut self) -> Result<StepOutcome, SceneError> {
        self.close()?;
        warn!(frames = self.frames_presented, "stop requested, scene interrupted");
        Ok(StepOutcome::Interrupted)
    }

    /// Close after a surface failure, keeping the original error.
    fn abandon(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "release after failure");
        }
    }

    fn pause(&mut self) -> Result<(), SceneError> {
        let Lifecycle::Open(scene) = &mut self.state else {
            return Ok(());
        };
        let scene = &mut **scene;
        let now_ms = scene.clock.elapsed().as_millis() as u64;
        let pause = Duration::from_millis(scene.pacer.pause_after_present(now_ms));

        match &mut scene.surface {
            Surface::Terminal(term) => {
                let events = carvis_term::pause(pause).map_err(SceneError::Surface)?;
                if events.resized {
                    term.renderer.invalidate();
                }
                if events.stop {
                    self.stop.request_stop();
                }
            }
            Surface::Buffer => {
                if !pause.is_zero() {
                    std::thread::sleep(pause);
                }
            }
        }
        Ok(())
    }
}

impl Drop for SceneComposer {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "close on drop");
        }
    }
}

impl OpenScene {
    /// Repaint the canvas: background, car, then the setpoint on top.
    fn compose(&mut self, pose: Pose, config: &SceneConfig) {
        fill(&mut self.canvas, config.palette.background);

        let car = self
            .car
            .update(pose.x, pose.y, pose.heading_deg(), pose.steering_deg());
        blit_at(&mut self.canvas, &car.image, car.rect);

        let marker = self.setpoint.placed();
        blit_at(&mut self.canvas, &marker.image, marker.rect);
    }
}

/// Level for per-step diagnostics. Kept below the default filter while frames
/// are being drawn to the terminal.
fn diagnostics_level(output: OutputMode) -> Level {
    match output {
        OutputMode::Terminal => Level::DEBUG,
        OutputMode::Buffer => Level::WARN,
    }
}

fn status_line(pose: Pose, frame: u64) -> String {
    format!(
        "x {:.1}  y {:.1}  heading {:.1}°  steer {:.1}°  frame {}  [q] quit",
        pose.x,
        pose.y,
        pose.heading_deg(),
        pose.steering_deg(),
        frame
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use carvis_core::ConfigError;
    use std::f64::consts::FRAC_PI_2;

    fn open() -> SceneComposer {
        SceneComposer::open(SceneConfig::headless()).unwrap()
    }

    #[test]
    fn open_rejects_invalid_config() {
        let err = SceneComposer::open(SceneConfig::headless().with_length(0.0))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SceneError::Config(ConfigError::NonPositiveLength(_))
        ));
    }

    #[test]
    fn step_exports_full_canvas() {
        let mut scene = open();
        let frame = scene
            .step(Pose::new(100.0, 100.0, FRAC_PI_2, 0.0))
            .unwrap()
            .into_frame()
            .unwrap();
        assert_eq!(frame.shape(), (500, 500, 3));
        assert_eq!(frame.pixel(0, 499), Some([245, 245, 245]));
        assert_eq!(scene.frames_presented(), 1);
    }

    #[test]
    fn close_is_idempotent_and_final() {
        let mut scene = open();
        scene.close().unwrap();
        scene.close().unwrap();
        assert!(!scene.is_open());
        assert!(scene.canvas().is_none());
        assert!(matches!(scene.step(Pose::default()), Err(SceneError::Closed)));
        assert!(matches!(
            scene.set_target(Target::default()),
            Err(SceneError::Closed)
        ));
    }

    #[test]
    fn stop_request_closes_on_next_step() {
        let mut scene = open();
        scene.stop_handle().request_stop();
        assert_eq!(scene.step(Pose::default()).unwrap(), StepOutcome::Interrupted);
        assert!(!scene.is_open());
        assert_eq!(scene.frames_presented(), 0);
    }

    #[test]
    fn non_finite_pose_does_not_poison_later_steps() {
        let mut scene = open();
        let good = Pose::new(200.0, 200.0, 0.3, 0.1);
        let before = scene.step(good).unwrap();
        assert!(scene.step(Pose::new(f64::NAN, 1.0, f64::INFINITY, 0.0)).is_ok());
        let after = scene.step(good).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn set_target_moves_marker() {
        let mut scene = open();
        scene.set_target(Target::new(60.0, 70.0, 0.0)).unwrap();
        let rect = scene.setpoint().unwrap().rect();
        assert_eq!(rect.center().x, 60.0);
        assert_eq!(rect.center().y, 70.0);
        assert_eq!(scene.config().target, Target::new(60.0, 70.0, 0.0));
    }

    #[test]
    fn terminal_mode_demotes_step_warnings() {
        assert_eq!(diagnostics_level(OutputMode::Terminal), Level::DEBUG);
        assert_eq!(diagnostics_level(OutputMode::Buffer), Level::WARN);
    }

    #[test]
    fn status_line_reports_degrees() {
        let line = status_line(Pose::new(1.0, 2.0, FRAC_PI_2, 0.0), 7);
        assert!(line.contains("heading 90.0°"));
        assert!(line.contains("frame 7"));
    }
}
