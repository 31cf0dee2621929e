use crate::input::{Capabilities, InputMode};
use crate::rigid_body::Vec2;

use super::fuse::DetonationHook;
use super::CupCore;

pub(super) fn select_input(core: &mut CupCore, caps: Capabilities) -> InputMode {
    let selection = InputMode::select(caps, core.config.sensor_policy);
    core.input_mode = selection.mode;
    core.notice = selection.notice;
    // Whatever the previous source left behind no longer applies.
    core.tilt.force_upright();
    core.bodies.set_angle(core.container.id, 0.0);
    core.input_mode
}

pub(super) fn set_gravity(core: &mut CupCore, gravity: Vec2) {
    if gravity.is_finite() {
        core.bodies.set_gravity(gravity);
    } else {
        log::debug!("ignoring non-finite gravity {gravity:?}");
    }
}

pub(super) fn set_detonation_hook(core: &mut CupCore, hook: Box<dyn DetonationHook>) {
    core.detonation_hook = hook;
}
