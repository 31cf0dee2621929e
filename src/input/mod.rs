//! Host input -> cup state
//!
//! - `transform`: motion sensor reading -> gravity vector / tilt angle
//! - `tilt`: pointer-drag state machine with spring-back easing
//! - `mode`: one authoritative input source per session
//! - `schedule`: cancellable repeating step used by easing

pub mod mode;
pub mod schedule;
pub mod tilt;
pub mod transform;

pub use mode::{Capabilities, InputMode, ModeSelection, Permission, SensorPolicy};
pub use schedule::ScheduledTask;
pub use tilt::{drag_angle, PointerTarget, TiltController, TiltSettings, TiltState};
pub use transform::{gravity_from_motion, tilt_angle_from_gamma, MotionSample, OrientationReading};
