use virtual_cup_engine::input::{
    Capabilities, InputMode, MotionSample, OrientationReading, Permission, PointerTarget, SensorPolicy,
};
use virtual_cup_engine::{CupConfig, CupCore};

fn cup(policy: SensorPolicy) -> CupCore {
    CupCore::new(CupConfig {
        initial_items: Vec::new(),
        sensor_policy: policy,
        ..CupConfig::for_viewport(800.0, 800.0)
    })
}

#[test]
fn physical_down_survives_screen_rotation() {
    let mut core = cup(SensorPolicy::GravityRotation);
    let mode = core.select_input(Capabilities { touch: true, permission: Permission::Granted });
    assert_eq!(mode, InputMode::SensorDriven(SensorPolicy::GravityRotation));

    // Phone held so each rotation is upright for the viewer
    let poses = [(0.0, 0.0, 9.8), (90.0, 9.8, 0.0), (180.0, 0.0, -9.8), (270.0, -9.8, 0.0)];
    for (angle, x, y) in poses {
        assert!(core.on_motion(&MotionSample::new(x, y, 0.0), OrientationReading::modern(angle)));
        let g = core.gravity();
        assert!(g.x.abs() < 1e-4, "angle {angle}: {g:?}");
        assert!((g.y - 1.0).abs() < 1e-4, "angle {angle}: {g:?}");
    }
}

#[test]
fn legacy_orientation_is_used_when_modern_is_missing() {
    let mut core = cup(SensorPolicy::GravityRotation);
    core.select_input(Capabilities { touch: true, permission: Permission::NotRequired });

    let reading = OrientationReading { screen_angle: None, legacy: Some(90.0) };
    assert!(core.on_motion(&MotionSample::new(9.8, 0.0, 0.0), reading));
    assert!((core.gravity().y - 1.0).abs() < 1e-4);
}

#[test]
fn non_finite_axis_is_dropped() {
    let mut core = cup(SensorPolicy::GravityRotation);
    core.select_input(Capabilities { touch: true, permission: Permission::Granted });
    let before = core.gravity();

    let bad = MotionSample { x: Some(f32::NAN), y: Some(9.8), z: None };
    assert!(!core.on_motion(&bad, OrientationReading::modern(0.0)));
    assert_eq!(core.gravity(), before);
}

#[test]
fn drag_then_release_eases_back_to_upright() {
    let mut core = cup(SensorPolicy::GravityRotation);
    core.select_input(Capabilities { touch: false, permission: Permission::NotRequired });

    assert!(core.pointer_down(500.0, PointerTarget::Scene));
    assert!(core.pointer_move(200.0));
    let tilted = core.container_angle();
    assert!((tilted + std::f32::consts::FRAC_PI_2).abs() < 1e-5);

    assert!(core.pointer_up(1000.0));
    // Nothing happens until one easing period has passed
    core.tick(1010.0);
    assert_eq!(core.container_angle(), tilted);
    core.tick(1016.0);
    assert!((core.container_angle() - tilted * 0.9).abs() < 1e-5);

    // A new press mid-easing freezes the angle under the pointer
    assert!(core.pointer_down(200.0, PointerTarget::Scene));
    let held = core.container_angle();
    core.tick(1100.0);
    assert_eq!(core.container_angle(), held);
    assert!(core.tilt().is_dragging());
}
