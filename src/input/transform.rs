//! Motion sensor -> screen-space gravity
//!
//! Device axes follow the platform convention (x+ device right, y+ device
//! top, z+ out of the screen) and report the *reaction* to gravity, so an
//! upright phone reads `y ≈ +9.8`. The browser rotates page content with the
//! screen, so the reading has to be rotated by the screen angle to keep
//! "down" pointing at the physical ground.

use serde::{Deserialize, Serialize};

use crate::error::{CupError, Result};
use crate::rigid_body::Vec2;

/// m/s² reported by a device at rest
pub const STANDARD_GRAVITY: f32 = 9.8;

/// Tilt policy clamps `gamma` to ±this many degrees
pub const MAX_TILT_DEG: f32 = 90.0;

/// One acceleration-including-gravity reading, device frame.
///
/// Axes are optional because platforms deliver `null` for axes they
/// cannot measure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl MotionSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x: Some(x), y: Some(y), z: Some(z) }
    }
}

/// Screen rotation as reported by the host.
///
/// `screen_angle` is the modern screen-orientation angle, `legacy` the
/// deprecated window orientation property. Either may be missing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationReading {
    pub screen_angle: Option<f32>,
    pub legacy: Option<f32>,
}

impl OrientationReading {
    pub fn modern(angle_deg: f32) -> Self {
        Self { screen_angle: Some(angle_deg), legacy: None }
    }

    /// Screen rotation in degrees, modern source first
    pub fn angle_deg(&self) -> Result<f32> {
        self.screen_angle
            .filter(|a| a.is_finite())
            .or(self.legacy.filter(|a| a.is_finite()))
            .ok_or(CupError::TransformAmbiguity)
    }

    /// Like `angle_deg`, but an unknown rotation counts as upright
    pub fn resolve(&self) -> f32 {
        match self.angle_deg() {
            Ok(angle) => angle,
            Err(e) => {
                log::debug!("{e}; assuming 0°");
                0.0
            }
        }
    }
}

fn axis(value: Option<f32>, name: char) -> Result<f32> {
    value
        .filter(|v| v.is_finite())
        .ok_or(CupError::MissingSensorData { axis: name })
}

/// Map a motion reading to the world gravity vector for a screen rotated by
/// `screen_angle_deg`.
///
/// The result is not smoothed or clamped; its length encodes tilt strength.
/// `z` is not used, so only a missing `x` or `y` rejects the sample.
pub fn gravity_from_motion(sample: &MotionSample, screen_angle_deg: f32) -> Result<Vec2> {
    let ax = axis(sample.x, 'x')?;
    let ay = axis(sample.y, 'y')?;

    let raw_x = -ax / STANDARD_GRAVITY;
    let raw_y = ay / STANDARD_GRAVITY;

    let (sin, cos) = screen_angle_deg.to_radians().sin_cos();
    Ok(Vec2::new(
        raw_x * cos + raw_y * sin,
        -raw_x * sin + raw_y * cos,
    ))
}

/// Container angle (radians) for the absolute-tilt policy.
///
/// `gamma` is the left/right tilt in degrees; gravity stays world-down.
pub fn tilt_angle_from_gamma(gamma_deg: Option<f32>) -> Result<f32> {
    let gamma = axis(gamma_deg, 'g')?;
    Ok(gamma.clamp(-MAX_TILT_DEG, MAX_TILT_DEG).to_radians())
}
