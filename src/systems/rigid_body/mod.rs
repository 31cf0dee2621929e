//! RigidBody - A solid body that moves as a unit
//!
//! The body stores its shape in local coordinates (relative to center 0,0)
//! and transforms them to world coordinates using position and rotation.

mod vec2;
mod shape;
mod body;

pub use vec2::Vec2;
pub use shape::{RectPart, Shape, SHAPE_CIRCLE, SHAPE_COMPOUND, SHAPE_POLYGON, SHAPE_RECT};
pub use body::{BodyId, Material, RigidBody};
