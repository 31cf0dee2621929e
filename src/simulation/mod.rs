//! CupCore - the running cup simulation
//!
//! CupCore only orchestrates; the pieces live in submodules:
//! - init/      - config and construction
//! - commands/  - host input (sensor, pointer) mutating cup state
//! - lifecycle/ - spawn, reclaim sweep, bomb fuses
//! - step/      - per-frame tick
//! - perf/      - timing and telemetry readout
//! - render/    - flat buffers for the host renderer
//!
//! There is no global instance: the host owns a `CupCore` (or the wasm
//! `Cup` facade around it) and passes it to whatever drives the frame loop.

use crate::core::utils::random::Rng;
use crate::error::{CupError, Result};
use crate::input::{Capabilities, InputMode, MotionSample, OrientationReading, PointerTarget, TiltController};
use crate::rigid_body::{BodyId, Vec2};
use crate::rigid_body_system::RigidBodySystem;

#[path = "init/config.rs"]
mod config;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "lifecycle/spawn.rs"]
mod spawn;
#[path = "lifecycle/reclaim.rs"]
mod reclaim;
#[path = "lifecycle/fuse.rs"]
mod fuse;
#[path = "step/step.rs"]
mod step;
#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/telemetry.rs"]
mod telemetry;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use config::{CupConfig, CupGeometry, SpawnRequest, Viewport};
pub use facade::{Cup, DETONATION_STRIDE};
pub use fuse::{Detonation, DetonationHook, Fuse, RemoveOnDetonation};
pub use render_extract::{BODY_STRIDE, CONTAINER_POSE_LEN};
pub use spawn::SpawnRegion;
pub use telemetry::Telemetry;

use fuse::FuseRegistry;
use perf_timer::PerfTimer;

/// Label carried by the container body; the reclaim sweep never touches it
pub const CONTAINER_LABEL: &str = "cup";

/// The cup body inside the world, plus where it must stay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerHandle {
    pub id: BodyId,
    /// Position re-applied on every sensor update
    pub pinned: Vec2,
    pub geometry: CupGeometry,
}

pub struct CupCore {
    config: CupConfig,
    bodies: RigidBodySystem,
    container: ContainerHandle,
    tilt: TiltController,

    input_mode: InputMode,
    notice: Option<CupError>,

    fuses: FuseRegistry,
    detonation_hook: Box<dyn DetonationHook>,

    rng: Rng,
    clock_ms: f64,
    frame: u64,
    telemetry: Telemetry,

    // Render scratch (reused every frame)
    render_buffer: Vec<f32>,
}

impl CupCore {
    /// Build the cup and its initial population.
    ///
    /// An invalid config is logged and replaced by `CupConfig::default()`;
    /// use [`CupCore::try_new`] to get the error instead.
    pub fn new(config: CupConfig) -> Self {
        match config.validate() {
            Ok(()) => init::create_cup_core(config),
            Err(e) => {
                log::warn!("{e}, using default config");
                init::create_cup_core(CupConfig::default())
            }
        }
    }

    /// Validate, then build
    pub fn try_new(config: CupConfig) -> Result<Self> {
        config.validate()?;
        Ok(init::create_cup_core(config))
    }

    /// Parse, validate and build
    pub fn from_json(json: &str) -> Result<Self> {
        Self::try_new(CupConfig::from_json(json)?)
    }

    pub fn config(&self) -> &CupConfig {
        &self.config
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn container(&self) -> &ContainerHandle {
        &self.container
    }

    pub fn container_angle(&self) -> f32 {
        self.bodies.get(self.container.id).map_or(0.0, |b| b.angle)
    }

    pub fn tilt(&self) -> &TiltController {
        &self.tilt
    }

    pub fn bodies(&self) -> &RigidBodySystem {
        &self.bodies
    }

    /// Direct engine access for hosts and tests that pose bodies by hand
    pub fn bodies_mut(&mut self) -> &mut RigidBodySystem {
        &mut self.bodies
    }

    pub fn gravity(&self) -> Vec2 {
        self.bodies.gravity()
    }

    /// Dynamic objects currently in the world (the container is static)
    pub fn object_count(&self) -> usize {
        self.bodies.dynamic_count()
    }

    // === INPUT MODE ===

    /// Choose the session's input source from the start-up probe
    pub fn select_input(&mut self, caps: Capabilities) -> InputMode {
        settings::select_input(self, caps)
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// User-facing notice from input selection (e.g. permission denied)
    pub fn notice(&self) -> Option<&CupError> {
        self.notice.as_ref()
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        settings::set_gravity(self, gravity);
    }

    pub fn set_detonation_hook(&mut self, hook: Box<dyn DetonationHook>) {
        settings::set_detonation_hook(self, hook);
    }

    // === HOST EVENTS ===

    /// Motion sensor reading. Returns false when the sample was ignored or dropped.
    pub fn on_motion(&mut self, sample: &MotionSample, orientation: OrientationReading) -> bool {
        commands::on_motion(self, sample, orientation)
    }

    /// Device tilt (`gamma`, degrees) for the absolute-tilt policy
    pub fn on_tilt(&mut self, gamma_deg: Option<f32>) -> bool {
        commands::on_tilt(self, gamma_deg)
    }

    pub fn pointer_down(&mut self, x: f32, target: PointerTarget) -> bool {
        commands::pointer_down(self, x, target)
    }

    pub fn pointer_move(&mut self, x: f32) -> bool {
        commands::pointer_move(self, x)
    }

    pub fn pointer_up(&mut self, now_ms: f64) -> bool {
        commands::pointer_up(self, now_ms)
    }

    // === LIFECYCLE ===

    /// Spawn `count` items of a preset by label; unknown labels spawn nothing
    pub fn spawn(&mut self, label: &str, count: u32) -> Vec<BodyId> {
        spawn::spawn_by_label(self, label, count)
    }

    /// Remove every dynamic body outside the padded viewport
    pub fn reclaim(&mut self) -> usize {
        reclaim::reclaim(self)
    }

    pub fn armed_fuses(&self) -> &[Fuse] {
        self.fuses.fuses()
    }

    /// Detonations since the last drain, oldest first
    pub fn drain_detonations(&mut self) -> Vec<Detonation> {
        self.fuses.drain_detonations()
    }

    // === FRAME ===

    /// Advance one frame: easing, engine update, then the post-update
    /// reclaim sweep, fuses and telemetry
    pub fn tick(&mut self, now_ms: f64) {
        step::tick(self, now_ms);
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    // === RENDERING ===

    /// Flat per-body buffer, `BODY_STRIDE` floats per dynamic body
    pub fn body_buffer(&mut self) -> &[f32] {
        render_extract::fill_body_buffer(self)
    }

    /// `[x, y, angle, width, height, wall_thickness]`
    pub fn container_pose(&self) -> [f32; CONTAINER_POSE_LEN] {
        render_extract::container_pose(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
