use crate::rigid_body::{RigidBody, Shape, Vec2};

/// Overlap between a dynamic circle proxy and something else.
///
/// `normal` points in the direction the dynamic body must move to separate.
#[derive(Clone, Copy, Debug)]
pub(super) struct Contact {
    pub normal: Vec2,
    pub depth: f32,
}

/// Circle `b` against circle `a`; normal points from `a` towards `b`.
pub(super) fn circle_vs_circle(pa: Vec2, ra: f32, pb: Vec2, rb: f32) -> Option<Contact> {
    let d = pb - pa;
    let r = ra + rb;
    let dist2 = d.length_squared();
    if dist2 >= r * r {
        return None;
    }

    let dist = dist2.sqrt();
    let normal = if dist > 1e-4 {
        d * (1.0 / dist)
    } else {
        // Coincident centers: separate vertically so stacks stay stable.
        Vec2::new(0.0, -1.0)
    };
    Some(Contact { normal, depth: r - dist })
}

/// Circle (in box-local coordinates) against an axis-aligned box centered at origin.
fn circle_vs_box(local: Vec2, radius: f32, half: Vec2) -> Option<Contact> {
    let inside = local.x.abs() <= half.x && local.y.abs() <= half.y;

    if inside {
        // Push out through the nearest face.
        let pen_x = half.x - local.x.abs();
        let pen_y = half.y - local.y.abs();
        return Some(if pen_x < pen_y {
            Contact {
                normal: Vec2::new(local.x.signum(), 0.0),
                depth: pen_x + radius,
            }
        } else {
            Contact {
                normal: Vec2::new(0.0, local.y.signum()),
                depth: pen_y + radius,
            }
        });
    }

    let closest = Vec2::new(local.x.clamp(-half.x, half.x), local.y.clamp(-half.y, half.y));
    let d = local - closest;
    let dist2 = d.length_squared();
    if dist2 >= radius * radius {
        return None;
    }
    let dist = dist2.sqrt();
    Some(Contact {
        normal: d * (1.0 / dist.max(1e-6)),
        depth: radius - dist,
    })
}

/// All contacts between a circle proxy and a static body, in world space.
pub(super) fn static_contacts(obstacle: &RigidBody, center: Vec2, radius: f32, out: &mut Vec<Contact>) {
    let rotate_out = |c: Contact| Contact {
        normal: c.normal.rotate(obstacle.angle),
        depth: c.depth,
    };

    match &obstacle.shape {
        Shape::Compound { parts } => {
            let local = obstacle.world_to_local(center);
            for part in parts {
                if let Some(c) = circle_vs_box(local - part.offset, radius, part.half_extents()) {
                    out.push(rotate_out(c));
                }
            }
        }
        Shape::Rect { width, height } => {
            let local = obstacle.world_to_local(center);
            let half = Vec2::new(width * 0.5, height * 0.5);
            if let Some(c) = circle_vs_box(local, radius, half) {
                out.push(rotate_out(c));
            }
        }
        Shape::Circle { .. } | Shape::Polygon { .. } => {
            if let Some(c) = circle_vs_circle(obstacle.pos, obstacle.contact_radius(), center, radius) {
                out.push(c);
            }
        }
    }
}
