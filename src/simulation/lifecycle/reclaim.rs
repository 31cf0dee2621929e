use crate::rigid_body::{BodyId, RigidBody};

use super::{CupCore, CONTAINER_LABEL};

/// A dynamic body is reclaimable once it leaves the viewport padded by `margin`.
/// Non-finite positions count as outside.
pub(super) fn is_out_of_bounds(body: &RigidBody, width: f32, height: f32, margin: f32) -> bool {
    let p = body.pos;
    let inside = p.x >= -margin && p.x <= width + margin && p.y >= -margin && p.y <= height + margin;
    !inside
}

pub(super) fn reclaim(core: &mut CupCore) -> usize {
    let (w, h) = (core.config.viewport.width, core.config.viewport.height);
    let margin = core.config.reclaim_margin;

    let doomed: Vec<BodyId> = core
        .bodies
        .bodies()
        .iter()
        .filter(|b| !b.is_static && b.label != CONTAINER_LABEL)
        .filter(|b| is_out_of_bounds(b, w, h, margin))
        .map(|b| b.id)
        .collect();

    if doomed.is_empty() {
        return 0;
    }

    let removed = core.bodies.remove_bodies(&doomed);
    log::debug!("reclaimed {removed} bodies");
    removed
}
