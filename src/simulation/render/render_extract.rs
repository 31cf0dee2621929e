use super::CupCore;

/// Floats per dynamic body: id, x, y, angle, shape code, a, b, color
pub const BODY_STRIDE: usize = 8;

/// Floats in the container pose: x, y, angle, width, height, wall thickness
pub const CONTAINER_POSE_LEN: usize = 6;

pub(super) fn fill_body_buffer(core: &mut CupCore) -> &[f32] {
    let buf = &mut core.render_buffer;
    buf.clear();
    buf.reserve(core.bodies.dynamic_count() * BODY_STRIDE);

    for body in core.bodies.bodies().iter().filter(|b| !b.is_static) {
        let (a, b) = body.shape.render_params();
        buf.extend_from_slice(&[
            body.id.0 as f32,
            body.pos.x,
            body.pos.y,
            body.angle,
            body.shape.code() as f32,
            a,
            b,
            body.color as f32,
        ]);
    }

    &core.render_buffer
}

pub(super) fn container_pose(core: &CupCore) -> [f32; CONTAINER_POSE_LEN] {
    let g = &core.container.geometry;
    let pos = core.bodies.get(core.container.id).map_or(core.container.pinned, |b| b.pos);
    [pos.x, pos.y, core.container_angle(), g.width, g.height, g.wall_thickness]
}
