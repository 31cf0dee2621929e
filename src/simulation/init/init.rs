use crate::core::utils::random::Rng;
use crate::input::{InputMode, TiltController};
use crate::rigid_body::RigidBody;
use crate::rigid_body_system::RigidBodySystem;

use super::fuse::{FuseRegistry, RemoveOnDetonation};
use super::spawn::spawn_by_label;
use super::telemetry::Telemetry;
use super::{ContainerHandle, CupConfig, CupCore, CONTAINER_LABEL};

pub(super) fn create_cup_core(config: CupConfig) -> CupCore {
    let geometry = config.cup_geometry();
    let mut bodies = RigidBodySystem::with_settings(config.solver);

    let cup = RigidBody::compound(&geometry.parts(), geometry.material)
        .with_label(CONTAINER_LABEL)
        .with_color(0xd2dae2);
    let pinned = cup.pos;
    let id = bodies.add_body(cup);

    let mut core = CupCore {
        tilt: TiltController::new(config.tilt),
        rng: Rng::new(config.seed),
        container: ContainerHandle { id, pinned, geometry },
        bodies,
        input_mode: InputMode::PointerDriven,
        notice: None,
        fuses: FuseRegistry::default(),
        detonation_hook: Box::new(RemoveOnDetonation),
        clock_ms: 0.0,
        frame: 0,
        telemetry: Telemetry::default(),
        render_buffer: Vec::new(),
        config,
    };

    let initial = core.config.initial_items.clone();
    for request in &initial {
        spawn_by_label(&mut core, &request.kind, request.count);
    }
    log::info!(
        "cup ready: {}x{} viewport, {} objects",
        core.config.viewport.width,
        core.config.viewport.height,
        core.object_count()
    );
    core
}
