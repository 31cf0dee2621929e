//! RigidBodySystem - Minimal 2D rigid bodies for the cup world
//!
//! This is intentionally simple (no SAT / no rotational dynamics).
//! Goals:
//! - Batch add/remove so the body set is never half-updated.
//! - Keep contents inside a static, hand-rotated compound container.
//! - Stay deterministic for a given sequence of inputs.
//!
//! Current behavior:
//! - Dynamic bodies collide as circles (shape-dependent contact radius).
//! - Static bodies (any shape, including compounds) are posed by hand only.
//! - Sub-stepped integration with a speed clamp to avoid tunneling.

mod collision;
mod system;

pub use system::{RigidBodySystem, SolverSettings};
