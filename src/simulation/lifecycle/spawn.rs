use crate::core::utils::random::Rng;
use crate::domain::presets::{max_preset_contact_radius, ItemKind};
use crate::error::CupError;
use crate::rigid_body::{BodyId, Vec2};

use super::{ContainerHandle, CupCore};

/// Rectangle above the cup where new items appear
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRegion {
    pub center_x: f32,
    /// Lowest spawn y; items appear up to `band` above it
    pub base_y: f32,
    /// Total horizontal jitter
    pub spread: f32,
    pub band: f32,
}

impl SpawnRegion {
    /// Band starting 50 above the cup's height.
    ///
    /// The top of the band is held `clearance` below the reclaim line
    /// (`reclaim_margin` past the viewport top), so items pushed apart on
    /// their first update are not swept away.
    pub fn above(container: &ContainerHandle, reclaim_margin: f32, clearance: f32) -> Self {
        let g = &container.geometry;
        let band = 100.0;
        let lowest_top = clearance.max(0.0) - reclaim_margin;
        let top = (g.center.y - g.height - 50.0 - band).max(lowest_top);
        Self {
            center_x: g.center.x,
            base_y: top + band,
            spread: g.width / 2.0,
            band,
        }
    }

    /// Highest spawn y (smallest value)
    pub fn top_y(&self) -> f32 {
        self.base_y - self.band
    }

    pub fn sample(&self, rng: &mut Rng) -> Vec2 {
        let x = self.center_x + (rng.next_f32() - 0.5) * self.spread;
        let y = self.base_y - rng.next_f32() * self.band;
        Vec2::new(x, y)
    }
}

/// Distance an item may travel upward during its first update: its own size
/// plus every positional correction the solver can apply in one update
fn spawn_clearance(core: &CupCore) -> f32 {
    let s = core.bodies.settings();
    let passes = (s.substeps.max(1) * s.iterations.max(1)) as f32;
    max_preset_contact_radius() + s.max_correction * passes
}

pub(super) fn spawn_by_label(core: &mut CupCore, label: &str, count: u32) -> Vec<BodyId> {
    match ItemKind::from_label(label) {
        Some(kind) => spawn_kind(core, kind, count),
        None => {
            log::debug!("{}", CupError::UnknownSpawnType(label.to_string()));
            Vec::new()
        }
    }
}

pub(super) fn spawn_kind(core: &mut CupCore, kind: ItemKind, count: u32) -> Vec<BodyId> {
    let count = kind.fixed_batch().unwrap_or(count);
    if count == 0 {
        return Vec::new();
    }

    let region = SpawnRegion::above(&core.container, core.config.reclaim_margin, spawn_clearance(core));
    let preset = kind.preset();
    let batch = (0..count)
        .map(|_| {
            let pos = region.sample(&mut core.rng);
            preset.build(pos, &mut core.rng)
        })
        .collect();

    let ids = core.bodies.add_bodies(batch);

    if kind == ItemKind::Bomb {
        for &id in &ids {
            core.fuses.arm(id, core.clock_ms, core.config.fuse_ms);
        }
    }

    log::info!("spawned {} x {}", ids.len(), kind.label());
    ids
}
