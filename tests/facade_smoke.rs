use virtual_cup_engine::simulation::{BODY_STRIDE, CONTAINER_POSE_LEN, DETONATION_STRIDE};
use virtual_cup_engine::{version, Cup};

#[test]
fn desktop_session_drag_and_spawn() {
    let mut cup = Cup::new(800.0, 800.0).unwrap_or_else(|_| panic!("viewport should be valid"));
    assert!(!cup.select_input(false, String::new()));
    assert!(cup.notice().is_none());
    assert_eq!(cup.object_count(), 50);

    assert!(cup.pointer_down(100.0, false));
    assert!(cup.pointer_move(250.0));
    assert!(cup.container_angle() > 0.0);
    assert!(cup.pointer_up(0.0));

    for i in 1..=120 {
        cup.tick(i as f64 * 16.0);
    }
    assert_eq!(cup.container_angle(), 0.0);
    assert_eq!(cup.frame(), 120);

    // Tilting may have spilled some droplets already
    let before = cup.object_count();
    assert_eq!(cup.spawn("confetti", 10), 10);
    assert_eq!(cup.spawn("bomb", 3), 1);
    assert_eq!(cup.spawn("nope", 3), 0);
    assert_eq!(cup.object_count(), before + 11);

    assert_eq!(cup.body_buffer().len(), (before + 11) as usize * BODY_STRIDE);
    assert_eq!(cup.container_pose().len(), CONTAINER_POSE_LEN);
    assert!(cup.telemetry().starts_with("Objects: "));
    let json = cup.telemetry_json().unwrap_or_else(|_| panic!("telemetry should serialize"));
    assert!(json.contains("\"frame\":120"));
}

#[test]
fn denied_permission_reports_notice() {
    let mut cup = Cup::new(400.0, 800.0).unwrap_or_else(|_| panic!("viewport should be valid"));
    assert!(!cup.select_input(true, "denied".to_string()));
    assert_eq!(cup.notice().as_deref(), Some("motion sensor permission denied"));
}

#[test]
fn sensor_session_rotates_gravity() {
    let mut cup = Cup::new(400.0, 800.0).unwrap_or_else(|_| panic!("viewport should be valid"));
    assert!(cup.select_input(true, "granted".to_string()));

    // Phone held upright: world down
    assert!(cup.on_device_motion(Some(0.0), Some(9.8), None, Some(0.0), None));
    assert!(cup.gravity_x().abs() < 1e-6);
    assert!((cup.gravity_y() - 1.0).abs() < 1e-6);

    // Missing y axis: dropped
    assert!(!cup.on_device_motion(Some(1.0), None, Some(0.0), Some(0.0), None));
    // Orientation unknown: treated as upright
    assert!(cup.on_device_motion(Some(-9.8), Some(0.0), None, None, None));
    assert!((cup.gravity_x() - 1.0).abs() < 1e-6);

    // Pointer is ignored in sensor mode
    assert!(!cup.pointer_down(0.0, false));
    assert!(!cup.on_device_orientation(Some(30.0)));
}

#[test]
fn bomb_detonation_is_drained_once() {
    let mut cup = Cup::from_config(r#"{"viewport":{"width":800,"height":800},"initial_items":[],"fuse_ms":100}"#)
        .unwrap_or_else(|_| panic!("config should parse"));
    assert_eq!(cup.spawn("bomb", 1), 1);

    for i in 1..=10 {
        cup.tick(i as f64 * 16.0);
    }
    let fired = cup.drain_detonations();
    assert_eq!(fired.len(), DETONATION_STRIDE);
    assert_eq!(fired[3], 112.0);
    assert!(cup.drain_detonations().is_empty());
    assert_eq!(cup.object_count(), 0);
}

#[test]
fn version_matches_package() {
    assert_eq!(version(), env!("CARGO_PKG_VERSION"));
}
