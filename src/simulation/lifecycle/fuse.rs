//! Bomb fuses
//!
//! A bomb arms a fuse when spawned. Once the fuse runs out the registry hands
//! every due bomb to a `DetonationHook` in one batch. The default hook just
//! removes the bombs; hosts can plug in blast effects of their own.

use serde::Serialize;

use crate::rigid_body::{BodyId, Vec2};
use crate::rigid_body_system::RigidBodySystem;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Fuse {
    pub body: BodyId,
    pub detonate_at_ms: f64,
}

/// A bomb that went off: where it was and when
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Detonation {
    pub body: BodyId,
    pub pos: Vec2,
    pub at_ms: f64,
}

pub trait DetonationHook {
    /// Called once per tick with every bomb whose fuse ran out.
    /// Returns what actually detonated.
    fn detonate(&mut self, bodies: &mut RigidBodySystem, bombs: &[BodyId], at_ms: f64) -> Vec<Detonation>;
}

/// Bombs vanish and nothing else is disturbed
#[derive(Clone, Copy, Debug, Default)]
pub struct RemoveOnDetonation;

impl DetonationHook for RemoveOnDetonation {
    fn detonate(&mut self, bodies: &mut RigidBodySystem, bombs: &[BodyId], at_ms: f64) -> Vec<Detonation> {
        let fired: Vec<Detonation> = bombs
            .iter()
            .filter_map(|&id| bodies.get(id).map(|b| Detonation { body: id, pos: b.pos, at_ms }))
            .collect();
        let ids: Vec<BodyId> = fired.iter().map(|d| d.body).collect();
        bodies.remove_bodies(&ids);
        fired
    }
}

#[derive(Debug, Default)]
pub(super) struct FuseRegistry {
    armed: Vec<Fuse>,
    detonated: Vec<Detonation>,
}

impl FuseRegistry {
    pub(super) fn arm(&mut self, body: BodyId, now_ms: f64, fuse_ms: f64) {
        self.armed.push(Fuse {
            body,
            detonate_at_ms: now_ms + fuse_ms,
        });
    }

    pub(super) fn fuses(&self) -> &[Fuse] {
        &self.armed
    }

    /// Forget fuses whose bomb is already gone (reclaimed off-screen)
    pub(super) fn prune(&mut self, bodies: &RigidBodySystem) {
        self.armed.retain(|f| bodies.contains(f.body));
    }

    /// Fire every fuse due at `now_ms`; returns how many bombs went off
    pub(super) fn poll(&mut self, now_ms: f64, bodies: &mut RigidBodySystem, hook: &mut dyn DetonationHook) -> usize {
        let due: Vec<BodyId> = self
            .armed
            .iter()
            .filter(|f| f.detonate_at_ms <= now_ms)
            .map(|f| f.body)
            .collect();
        if due.is_empty() {
            return 0;
        }

        self.armed.retain(|f| f.detonate_at_ms > now_ms);
        let fired = hook.detonate(bodies, &due, now_ms);
        let n = fired.len();
        for d in &fired {
            log::info!("bomb {} detonated at ({:.1}, {:.1})", d.body.0, d.pos.x, d.pos.y);
        }
        self.detonated.extend(fired);
        n
    }

    pub(super) fn drain_detonations(&mut self) -> Vec<Detonation> {
        std::mem::take(&mut self.detonated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::{Material, RigidBody};

    fn world_with_bomb() -> (RigidBodySystem, BodyId) {
        let mut bodies = RigidBodySystem::new();
        let id = bodies.add_body(RigidBody::circle(5.0, 6.0, 10.0, Material::default()));
        (bodies, id)
    }

    #[test]
    fn fuse_waits_for_its_deadline() {
        let (mut bodies, id) = world_with_bomb();
        let mut reg = FuseRegistry::default();
        reg.arm(id, 100.0, 3000.0);

        assert_eq!(reg.poll(3099.0, &mut bodies, &mut RemoveOnDetonation), 0);
        assert!(bodies.contains(id));
        assert_eq!(reg.poll(3100.0, &mut bodies, &mut RemoveOnDetonation), 1);
        assert!(!bodies.contains(id));
        assert!(reg.fuses().is_empty());

        let drained = reg.drain_detonations();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].pos, Vec2::new(5.0, 6.0));
        assert!(reg.drain_detonations().is_empty());
    }

    #[test]
    fn prune_drops_fuses_of_missing_bombs() {
        let (mut bodies, id) = world_with_bomb();
        let mut reg = FuseRegistry::default();
        reg.arm(id, 0.0, 3000.0);
        bodies.remove_bodies(&[id]);

        reg.prune(&bodies);
        assert!(reg.fuses().is_empty());
        assert_eq!(reg.poll(5000.0, &mut bodies, &mut RemoveOnDetonation), 0);
    }

    struct Counting(usize);

    impl DetonationHook for Counting {
        fn detonate(&mut self, _: &mut RigidBodySystem, bombs: &[BodyId], _: f64) -> Vec<Detonation> {
            self.0 += bombs.len();
            Vec::new()
        }
    }

    #[test]
    fn custom_hook_receives_due_bombs() {
        let (mut bodies, id) = world_with_bomb();
        let mut reg = FuseRegistry::default();
        reg.arm(id, 0.0, 10.0);

        let mut hook = Counting(0);
        reg.poll(10.0, &mut bodies, &mut hook);
        assert_eq!(hook.0, 1);
        // The hook chose not to remove it
        assert!(bodies.contains(id));
    }
}
