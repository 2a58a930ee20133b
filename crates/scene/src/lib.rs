//! Scene lifecycle for the car visualizer.
//!
//! [`SceneComposer`] owns one canvas plus the car and setpoint sprites, and is
//! stepped by an external driver:
//!
//! ```
//! use carvis_scene::{SceneComposer, SceneConfig};
//! use carvis_types::Pose;
//!
//! let mut scene = SceneComposer::open(SceneConfig::headless()).unwrap();
//! let outcome = scene.step(Pose::new(100.0, 100.0, 0.0, 0.0)).unwrap();
//! let frame = outcome.into_frame().unwrap();
//! assert_eq!(frame.shape(), (500, 500, 3));
//!
//! scene.close().unwrap();
//! assert!(scene.step(Pose::default()).is_err());
//! ```

pub mod composer;
pub mod config;
pub mod error;
pub mod frame;
pub mod pacer;
pub mod stop;

pub use carvis_core as core;
pub use carvis_types as types;

pub use composer::{SceneComposer, StepOutcome};
pub use config::{parse_target, SceneConfig};
pub use error::SceneError;
pub use frame::Frame;
pub use pacer::FramePacer;
pub use stop::StopHandle;
