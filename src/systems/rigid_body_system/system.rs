use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::rigid_body::{BodyId, RigidBody, Vec2};

use super::collision::{circle_vs_circle, static_contacts, Contact};

/// Below this sliding speed static friction applies instead of sliding friction
const STATIC_SLIDE_SPEED: f32 = 0.05;

/// Integration and contact-solver tuning
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Position sub-steps per update; bounds per-substep travel to `max_speed / substeps`
    pub substeps: u32,
    /// Contact relaxation passes per sub-step
    pub iterations: u32,
    /// Acceleration per update for a gravity vector of length 1
    pub gravity_scale: f32,
    /// Speed clamp (units per update) to keep cost bounded and avoid tunneling
    pub max_speed: f32,
    /// Largest positional correction a body receives from other bodies per pass
    pub max_correction: f32,
    /// Fraction of body-body overlap removed per pass
    pub correction_percent: f32,
    /// Overlap tolerated between dynamic bodies before correcting
    pub slop: f32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            substeps: 4,
            iterations: 3,
            gravity_scale: 0.3,
            max_speed: 10.0,
            max_correction: 2.0,
            correction_percent: 0.8,
            slop: 0.05,
        }
    }
}

/// Owns every body in the cup world.
///
/// Adds and removes are batch operations so the collection is never
/// observed half-updated between two updates.
pub struct RigidBodySystem {
    bodies: Vec<RigidBody>,
    next_id: u32,
    gravity: Vec2,
    settings: SolverSettings,

    // Scratch buffers reused across updates
    order: Vec<usize>,
    corrections: Vec<Vec2>,
    contacts: Vec<Contact>,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self::with_settings(SolverSettings::default())
    }

    pub fn with_settings(settings: SolverSettings) -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
            gravity: Vec2::down(),
            settings,
            order: Vec::new(),
            corrections: Vec::new(),
            contacts: Vec::new(),
        }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Gravity is read once at the start of every update; writes in between win.
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Add a single body, returning its new ID
    pub fn add_body(&mut self, mut body: RigidBody) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Add a batch of bodies in one call
    pub fn add_bodies(&mut self, bodies: Vec<RigidBody>) -> Vec<BodyId> {
        self.bodies.reserve(bodies.len());
        bodies.into_iter().map(|b| self.add_body(b)).collect()
    }

    /// Remove a batch of bodies in one call. Unknown IDs are ignored.
    pub fn remove_bodies(&mut self, ids: &[BodyId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let doomed: HashSet<BodyId> = ids.iter().copied().collect();
        let before = self.bodies.len();
        self.bodies.retain(|b| !doomed.contains(&b.id));
        before - self.bodies.len()
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn dynamic_count(&self) -> usize {
        self.bodies.iter().filter(|b| !b.is_static).count()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Force-set the angle; works on static bodies too
    pub fn set_angle(&mut self, id: BodyId, angle: f32) -> bool {
        self.get_mut(id).map(|b| b.angle = angle).is_some()
    }

    /// Teleport a body; works on static bodies too
    pub fn set_position(&mut self, id: BodyId, pos: Vec2) -> bool {
        self.get_mut(id).map(|b| b.pos = pos).is_some()
    }

    pub fn set_velocity(&mut self, id: BodyId, velocity: Vec2) -> bool {
        self.get_mut(id).map(|b| b.velocity = velocity).is_some()
    }

    /// Advance the world by one update.
    ///
    /// Dynamic bodies are circle proxies; static bodies keep whatever pose
    /// was last authored for them. Rotation of dynamic bodies is not integrated.
    pub fn update(&mut self) {
        let substeps = self.settings.substeps.max(1);
        let iterations = self.settings.iterations.max(1);
        let inv_sub = 1.0 / substeps as f32;
        let accel = self.gravity * self.settings.gravity_scale;

        let statics: Vec<RigidBody> = self.bodies.iter().filter(|b| b.is_static).cloned().collect();

        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            let keep = (1.0 - body.material.friction_air).clamp(0.0, 1.0);
            body.velocity = body.velocity * keep;
        }

        for _ in 0..substeps {
            for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
                body.velocity += accel * inv_sub;
                body.velocity = body.velocity.clamp_length(self.settings.max_speed);
                body.pos += body.velocity * inv_sub;
            }

            for pass in 0..iterations {
                let respond = pass == 0;
                self.solve_body_pairs(respond, inv_sub);
                self.solve_static_contacts(&statics, respond, inv_sub);
            }
        }
    }

    /// Sweep-and-prune over x, then push overlapping dynamic pairs apart.
    fn solve_body_pairs(&mut self, respond: bool, inv_sub: f32) {
        let settings = self.settings;
        let bodies = &mut self.bodies;

        self.order.clear();
        self.order.extend((0..bodies.len()).filter(|&i| !bodies[i].is_static));
        self.order.sort_by(|&a, &b| {
            let ma = bodies[a].pos.x - bodies[a].contact_radius();
            let mb = bodies[b].pos.x - bodies[b].contact_radius();
            ma.total_cmp(&mb)
        });

        self.corrections.clear();
        self.corrections.resize(bodies.len(), Vec2::zero());

        for i in 0..self.order.len() {
            let a = self.order[i];
            let ra = bodies[a].contact_radius();
            let max_x = bodies[a].pos.x + ra;

            for &b in &self.order[i + 1..] {
                let rb = bodies[b].contact_radius();
                if bodies[b].pos.x - rb > max_x {
                    break;
                }
                let Some(contact) = circle_vs_circle(bodies[a].pos, ra, bodies[b].pos, rb) else {
                    continue;
                };

                let (ba, bb) = pair_mut(bodies, a, b);
                let total_inv = ba.inv_mass + bb.inv_mass;
                if total_inv <= 0.0 {
                    continue;
                }

                let push = (contact.depth - settings.slop).max(0.0) * settings.correction_percent / total_inv;
                self.corrections[a] -= contact.normal * (push * ba.inv_mass);
                self.corrections[b] += contact.normal * (push * bb.inv_mass);

                if respond {
                    pair_impulse(ba, bb, contact.normal, total_inv, inv_sub);
                }
            }
        }

        for &i in &self.order {
            let delta = self.corrections[i].clamp_length(settings.max_correction);
            bodies[i].pos += delta;
        }
    }

    /// Resolve every dynamic body against every static body, fully.
    ///
    /// Runs after body-body correction so walls always have the last word.
    fn solve_static_contacts(&mut self, statics: &[RigidBody], respond: bool, inv_sub: f32) {
        if statics.is_empty() {
            return;
        }
        let contacts = &mut self.contacts;

        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            let radius = body.contact_radius();
            for obstacle in statics {
                contacts.clear();
                static_contacts(obstacle, body.pos, radius, contacts);
                for contact in contacts.iter() {
                    body.pos += contact.normal * contact.depth;
                    if respond {
                        static_impulse(body, obstacle, contact.normal, inv_sub);
                    }
                }
            }
        }
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Normal + friction impulse between two dynamic bodies (`normal` points a -> b)
fn pair_impulse(a: &mut RigidBody, b: &mut RigidBody, normal: Vec2, total_inv: f32, inv_sub: f32) {
    let rel = b.velocity - a.velocity;
    let vn = rel.dot(normal);
    if vn >= 0.0 {
        return;
    }

    let e = a.material.restitution.max(b.material.restitution);
    let j = -(1.0 + e) * vn / total_inv;
    a.velocity -= normal * (j * a.inv_mass);
    b.velocity += normal * (j * b.inv_mass);

    let tangent = rel - normal * vn;
    let slide = tangent.length();
    if slide > 1e-6 {
        let mu = a.material.friction.min(b.material.friction) * inv_sub;
        let jt = (slide / total_inv).min(mu * j);
        let dir = tangent * (1.0 / slide);
        a.velocity += dir * (jt * a.inv_mass);
        b.velocity -= dir * (jt * b.inv_mass);
    }
}

/// Bounce + friction against an immovable body (`normal` points out of the obstacle)
fn static_impulse(body: &mut RigidBody, obstacle: &RigidBody, normal: Vec2, inv_sub: f32) {
    let vn = body.velocity.dot(normal);
    if vn >= 0.0 {
        return;
    }

    let e = body.material.restitution.max(obstacle.material.restitution);
    body.velocity -= normal * ((1.0 + e) * vn);

    let tangent = body.velocity - normal * body.velocity.dot(normal);
    let mu = if tangent.length() < STATIC_SLIDE_SPEED {
        body.material.friction_static.min(obstacle.material.friction_static)
    } else {
        body.material.friction.min(obstacle.material.friction)
    };
    body.velocity -= tangent * (mu * inv_sub).min(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::Material;

    fn ball(x: f32, y: f32) -> RigidBody {
        RigidBody::circle(x, y, 5.0, Material::default())
    }

    #[test]
    fn batch_add_assigns_unique_ids() {
        let mut system = RigidBodySystem::new();
        let ids = system.add_bodies(vec![ball(0.0, 0.0), ball(20.0, 0.0), ball(40.0, 0.0)]);
        assert_eq!(ids, vec![BodyId(1), BodyId(2), BodyId(3)]);
        assert_eq!(system.body_count(), 3);
    }

    #[test]
    fn batch_remove_ignores_unknown_ids() {
        let mut system = RigidBodySystem::new();
        let ids = system.add_bodies(vec![ball(0.0, 0.0), ball(20.0, 0.0)]);
        let removed = system.remove_bodies(&[ids[0], BodyId(99)]);
        assert_eq!(removed, 1);
        assert!(!system.contains(ids[0]));
        assert!(system.contains(ids[1]));
        assert_eq!(system.remove_bodies(&[]), 0);
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut system = RigidBodySystem::new();
        let first = system.add_bodies(vec![ball(0.0, 0.0), ball(20.0, 0.0)]);
        system.remove_bodies(&first);
        assert_eq!(system.body_count(), 0);

        let next = system.add_body(ball(0.0, 0.0));
        assert!(!first.contains(&next));
        assert_eq!(next, BodyId(3));
    }

    #[test]
    fn gravity_pulls_along_current_vector() {
        let mut system = RigidBodySystem::new();
        let id = system.add_body(ball(0.0, 0.0));
        system.set_gravity(Vec2::new(1.0, 0.0));
        for _ in 0..10 {
            system.update();
        }
        let body = system.get(id).unwrap();
        assert!(body.pos.x > 1.0);
        assert!(body.pos.y.abs() < 1e-3);
    }

    #[test]
    fn speed_is_clamped() {
        let mut system = RigidBodySystem::new();
        let id = system.add_body(ball(0.0, 0.0));
        system.set_velocity(id, Vec2::new(0.0, 500.0));
        system.update();
        let body = system.get(id).unwrap();
        assert!(body.velocity.length() <= system.settings().max_speed + 1e-4);
        assert!(body.pos.y <= system.settings().max_speed + 1e-3);
    }

    #[test]
    fn static_floor_stops_falling_ball() {
        let mut system = RigidBodySystem::new();
        system.add_body(RigidBody::compound(&[(Vec2::new(0.0, 100.0), 200.0, 10.0)], Material::default()));
        let id = system.add_body(ball(0.0, 0.0));
        for _ in 0..300 {
            system.update();
        }
        let body = system.get(id).unwrap();
        // Floor top is at y = 95; the ball rests on it.
        assert!(body.pos.y <= 90.0 + 0.5, "ball sank to {}", body.pos.y);
        assert!(body.pos.y > 85.0);
    }

    #[test]
    fn overlapping_bodies_separate() {
        let mut system = RigidBodySystem::new();
        system.set_gravity(Vec2::zero());
        let ids = system.add_bodies(vec![ball(0.0, 0.0), ball(2.0, 0.0)]);
        for _ in 0..20 {
            system.update();
        }
        let a = system.get(ids[0]).unwrap().pos;
        let b = system.get(ids[1]).unwrap().pos;
        assert!((b - a).length() > 9.0);
    }

    #[test]
    fn static_bodies_are_not_integrated() {
        let mut system = RigidBodySystem::new();
        let id = system.add_body(RigidBody::compound(&[(Vec2::zero(), 10.0, 10.0)], Material::default()));
        system.set_angle(id, 0.3);
        system.update();
        let body = system.get(id).unwrap();
        assert_eq!(body.pos, Vec2::zero());
        assert_eq!(body.angle, 0.3);
    }
}
