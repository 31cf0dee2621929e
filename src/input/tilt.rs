//! Tilt controller - owns the container angle
//!
//! Pointer input follows `Idle -> Dragging -> Easing -> Idle`. The easing
//! task lives inside the `Easing` state, so starting a new drag or
//! converging drops it and there can never be two running at once.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use super::schedule::ScheduledTask;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltSettings {
    /// Horizontal drag distance that maps to a quarter turn
    pub drag_span: f32,
    /// Angle multiplier applied per easing step
    pub ease_factor: f32,
    /// Below this |angle| (radians) easing snaps to exactly 0
    pub snap_threshold: f32,
    /// Easing step period
    pub ease_period_ms: f64,
}

impl Default for TiltSettings {
    fn default() -> Self {
        Self {
            drag_span: 300.0,
            ease_factor: 0.9,
            snap_threshold: 0.05,
            ease_period_ms: 16.0,
        }
    }
}

/// Where a pointer-down landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// The simulation surface
    Scene,
    /// Buttons, toolbars and other UI chrome; never starts a drag
    Chrome,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TiltState {
    Idle,
    Dragging { start_x: f32 },
    Easing(ScheduledTask),
}

/// Linear, unclamped drag-to-angle mapping
#[inline]
pub fn drag_angle(delta_x: f32, drag_span: f32) -> f32 {
    (delta_x / drag_span) * FRAC_PI_2
}

#[derive(Clone, Debug)]
pub struct TiltController {
    state: TiltState,
    angle: f32,
    settings: TiltSettings,
}

impl TiltController {
    pub fn new(settings: TiltSettings) -> Self {
        Self {
            state: TiltState::Idle,
            angle: 0.0,
            settings,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn state(&self) -> TiltState {
        self.state
    }

    pub fn settings(&self) -> &TiltSettings {
        &self.settings
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, TiltState::Dragging { .. })
    }

    pub fn is_easing(&self) -> bool {
        matches!(self.state, TiltState::Easing(_))
    }

    /// Start a drag unless the pointer hit UI chrome. Cancels any easing.
    pub fn pointer_down(&mut self, x: f32, target: PointerTarget) -> bool {
        if target == PointerTarget::Chrome {
            return false;
        }
        self.state = TiltState::Dragging { start_x: x };
        true
    }

    /// New container angle while dragging, `None` otherwise
    pub fn pointer_move(&mut self, x: f32) -> Option<f32> {
        let TiltState::Dragging { start_x } = self.state else {
            return None;
        };
        self.angle = drag_angle(x - start_x, self.settings.drag_span);
        Some(self.angle)
    }

    /// End the drag and start springing back. No-op when not dragging.
    pub fn pointer_up(&mut self, now_ms: f64) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.state = TiltState::Easing(ScheduledTask::start(now_ms, self.settings.ease_period_ms));
        true
    }

    /// Run the easing step if one is due. Returns true when the angle changed.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let due = match &mut self.state {
            TiltState::Easing(task) => task.poll(now_ms),
            _ => false,
        };
        if due {
            self.ease_step();
        }
        due
    }

    fn ease_step(&mut self) {
        if self.angle.abs() < self.settings.snap_threshold {
            self.angle = 0.0;
            self.state = TiltState::Idle;
        } else {
            self.angle *= self.settings.ease_factor;
        }
    }

    /// Sensor input owns the cup: upright, no drag, no easing
    pub fn force_upright(&mut self) {
        self.angle = 0.0;
        self.state = TiltState::Idle;
    }

    /// Absolute-tilt policy: the sensor sets the angle directly
    pub fn set_absolute(&mut self, angle: f32) {
        self.angle = angle;
        self.state = TiltState::Idle;
    }
}

impl Default for TiltController {
    fn default() -> Self {
        Self::new(TiltSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: f64 = 16.0;

    fn easing_from(angle: f32) -> TiltController {
        let mut ctl = TiltController::default();
        ctl.angle = angle;
        ctl.state = TiltState::Easing(ScheduledTask::start(0.0, PERIOD));
        ctl
    }

    /// Drive easing to completion; returns (decay steps, total steps)
    fn run_to_idle(ctl: &mut TiltController) -> (u32, u32) {
        let mut decays = 0;
        let mut steps = 0;
        let mut now = 0.0;
        while ctl.is_easing() {
            now += PERIOD;
            let before = ctl.angle();
            assert!(ctl.advance(now));
            steps += 1;
            if ctl.is_easing() {
                assert!(ctl.angle().abs() < before.abs());
                decays += 1;
            }
            assert!(steps < 1000, "easing never terminated");
        }
        (decays, steps)
    }

    #[test]
    fn drag_of_span_is_quarter_turn() {
        assert_eq!(drag_angle(300.0, 300.0), FRAC_PI_2);
        assert_eq!(drag_angle(0.0, 300.0), 0.0);
    }

    #[test]
    fn drag_mapping_is_odd_and_linear() {
        for delta in [1.0f32, 37.0, 150.0, 300.0, 720.0] {
            assert_eq!(drag_angle(-delta, 300.0), -drag_angle(delta, 300.0));
        }
        let a = drag_angle(150.0, 300.0);
        assert!((2.0 * a - drag_angle(300.0, 300.0)).abs() < 1e-6);
        // Unclamped past a quarter turn.
        assert!(drag_angle(600.0, 300.0) > 3.0);
    }

    #[test]
    fn drag_follows_pointer_relative_to_start() {
        let mut ctl = TiltController::default();
        assert!(ctl.pointer_down(500.0, PointerTarget::Scene));
        assert_eq!(ctl.pointer_move(800.0), Some(FRAC_PI_2));
        assert_eq!(ctl.pointer_move(500.0), Some(0.0));
        assert_eq!(ctl.angle(), 0.0);
    }

    #[test]
    fn chrome_never_starts_a_drag() {
        let mut ctl = TiltController::default();
        assert!(!ctl.pointer_down(10.0, PointerTarget::Chrome));
        assert_eq!(ctl.pointer_move(400.0), None);
        assert!(!ctl.pointer_up(0.0));
        assert_eq!(ctl.state(), TiltState::Idle);
    }

    #[test]
    fn easing_converges_in_predicted_steps() {
        for a0 in [1.0f32, -2.5, 3.0, 0.3] {
            let mut ctl = easing_from(a0);
            let (decays, steps) = run_to_idle(&mut ctl);
            let expected = ((0.05 / a0.abs()).ln() / 0.9f32.ln()).ceil() as u32;
            assert_eq!(decays, expected, "a0 = {a0}");
            assert_eq!(steps, expected + 1);
            assert_eq!(ctl.angle(), 0.0);
            assert_eq!(ctl.state(), TiltState::Idle);
        }
    }

    #[test]
    fn small_angle_snaps_on_first_step() {
        let mut ctl = easing_from(0.01);
        assert_eq!(run_to_idle(&mut ctl), (0, 1));
        assert_eq!(ctl.angle(), 0.0);
    }

    #[test]
    fn release_starts_easing_after_one_period() {
        let mut ctl = TiltController::default();
        ctl.pointer_down(0.0, PointerTarget::Scene);
        ctl.pointer_move(300.0);
        assert!(ctl.pointer_up(1000.0));
        assert!(ctl.is_easing());
        assert!(!ctl.advance(1010.0));
        assert!(ctl.advance(1016.0));
        assert!((ctl.angle() - FRAC_PI_2 * 0.9).abs() < 1e-6);
    }

    #[test]
    fn new_drag_cancels_easing() {
        let mut ctl = easing_from(1.0);
        assert!(ctl.pointer_down(50.0, PointerTarget::Scene));
        assert!(ctl.is_dragging());
        // The old task is gone: ticking does nothing to the held angle.
        assert!(!ctl.advance(10_000.0));
        assert_eq!(ctl.angle(), 1.0);
    }

    #[test]
    fn sensor_override_cancels_drag_and_easing() {
        let mut ctl = TiltController::default();
        ctl.pointer_down(0.0, PointerTarget::Scene);
        ctl.pointer_move(120.0);
        ctl.force_upright();
        assert_eq!(ctl.angle(), 0.0);
        assert_eq!(ctl.pointer_move(400.0), None);

        let mut ctl = easing_from(0.8);
        ctl.force_upright();
        assert!(!ctl.advance(1_000.0));
        assert_eq!(ctl.angle(), 0.0);
    }

    #[test]
    fn pointer_up_without_drag_is_noop() {
        let mut ctl = TiltController::default();
        assert!(!ctl.pointer_up(0.0));
        assert_eq!(ctl.state(), TiltState::Idle);
    }
}
