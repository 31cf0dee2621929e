use crate::input::{
    gravity_from_motion, tilt_angle_from_gamma, InputMode, MotionSample, OrientationReading, PointerTarget,
    SensorPolicy,
};
use crate::rigid_body::Vec2;

use super::CupCore;

pub(super) fn on_motion(core: &mut CupCore, sample: &MotionSample, orientation: OrientationReading) -> bool {
    if core.input_mode != InputMode::SensorDriven(SensorPolicy::GravityRotation) {
        return false;
    }

    let gravity = match gravity_from_motion(sample, orientation.resolve()) {
        Ok(g) => g,
        Err(e) => {
            // Keep the last gravity; the next sample will try again.
            log::debug!("dropping motion sample: {e}");
            return false;
        }
    };

    core.bodies.set_gravity(gravity);
    core.tilt.force_upright();
    apply_container_angle(core);
    pin_container(core);
    true
}

pub(super) fn on_tilt(core: &mut CupCore, gamma_deg: Option<f32>) -> bool {
    if core.input_mode != InputMode::SensorDriven(SensorPolicy::AbsoluteTilt) {
        return false;
    }

    match tilt_angle_from_gamma(gamma_deg) {
        Ok(angle) => {
            core.tilt.set_absolute(angle);
            apply_container_angle(core);
            pin_container(core);
            true
        }
        Err(e) => {
            log::debug!("dropping tilt sample: {e}");
            false
        }
    }
}

pub(super) fn pointer_down(core: &mut CupCore, x: f32, target: PointerTarget) -> bool {
    if !core.input_mode.accepts_pointer() {
        return false;
    }
    core.tilt.pointer_down(x, target)
}

pub(super) fn pointer_move(core: &mut CupCore, x: f32) -> bool {
    if !core.input_mode.accepts_pointer() {
        return false;
    }
    if core.tilt.pointer_move(x).is_none() {
        return false;
    }
    apply_container_angle(core);
    true
}

pub(super) fn pointer_up(core: &mut CupCore, now_ms: f64) -> bool {
    if !core.input_mode.accepts_pointer() {
        return false;
    }
    core.tilt.pointer_up(now_ms)
}

/// Push the controller's angle onto the container body
pub(super) fn apply_container_angle(core: &mut CupCore) {
    core.bodies.set_angle(core.container.id, core.tilt.angle());
}

/// Undo any drift of the nominally static container
fn pin_container(core: &mut CupCore) {
    let id = core.container.id;
    core.bodies.set_position(id, core.container.pinned);
    core.bodies.set_velocity(id, Vec2::zero());
}
