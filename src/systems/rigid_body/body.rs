use serde::{Deserialize, Serialize};

use super::shape::{RectPart, Shape};
use super::vec2::Vec2;

/// Stable handle for a body inside a `RigidBodySystem`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Surface/bulk parameters shared by every body kind
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Sliding friction (0 = ice, 1 = glue)
    pub friction: f32,
    /// Resting friction, applied when the sliding speed is tiny
    pub friction_static: f32,
    /// Velocity fraction lost to drag every update
    pub friction_air: f32,
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
    /// Mass per unit area
    pub density: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.1,
            friction_static: 0.5,
            friction_air: 0.01,
            restitution: 0.0,
            density: 0.001,
        }
    }
}

/// Rigid Body - moves as a single unit
#[derive(Clone, Debug)]
pub struct RigidBody {
    // === Physics State ===
    /// World position (center of mass)
    pub pos: Vec2,
    /// Velocity vector (units per update)
    pub velocity: Vec2,
    /// Rotation angle (radians)
    pub angle: f32,
    /// Total mass (density * area)
    pub mass: f32,
    /// 0 for static bodies
    pub inv_mass: f32,
    /// Static bodies are never integrated, only posed by hand
    pub is_static: bool,
    /// Unique ID, assigned when the body enters a system
    pub id: BodyId,

    // === Shape Definition ===
    pub shape: Shape,
    pub material: Material,

    // === Host metadata ===
    /// Free-form label (`"cup"`, preset name, ...)
    pub label: String,
    /// Fill color as 0xRRGGBB
    pub color: u32,
}

impl RigidBody {
    fn with_shape(x: f32, y: f32, shape: Shape, material: Material, is_static: bool) -> Self {
        let mass = if is_static {
            f32::INFINITY
        } else {
            (shape.area() * material.density).max(1e-6)
        };
        let inv_mass = if is_static { 0.0 } else { 1.0 / mass };

        Self {
            pos: Vec2::new(x, y),
            velocity: Vec2::zero(),
            angle: 0.0,
            mass,
            inv_mass,
            is_static,
            id: BodyId(0),
            shape,
            material,
            label: String::new(),
            color: 0xffffff,
        }
    }

    /// Create a circular dynamic body
    pub fn circle(x: f32, y: f32, radius: f32, material: Material) -> Self {
        Self::with_shape(x, y, Shape::Circle { radius }, material, false)
    }

    /// Create a rectangular dynamic body
    pub fn rectangle(x: f32, y: f32, width: f32, height: f32, material: Material) -> Self {
        Self::with_shape(x, y, Shape::Rect { width, height }, material, false)
    }

    /// Create a regular polygon dynamic body (at least 3 sides)
    pub fn polygon(x: f32, y: f32, sides: u32, radius: f32, material: Material) -> Self {
        let sides = sides.max(3);
        Self::with_shape(x, y, Shape::Polygon { sides, radius }, material, false)
    }

    /// Merge world-space rectangles `(center, width, height)` into one static body.
    ///
    /// The body is centered on the area-weighted centroid of the parts, so
    /// `set_angle` pivots around that point.
    pub fn compound(parts: &[(Vec2, f32, f32)], material: Material) -> Self {
        let total_area: f32 = parts.iter().map(|(_, w, h)| w * h).sum();
        let centroid = if total_area > 0.0 {
            let mut sum = Vec2::zero();
            for (c, w, h) in parts {
                sum += *c * (w * h);
            }
            sum * (1.0 / total_area)
        } else {
            Vec2::zero()
        };

        let local = parts
            .iter()
            .map(|(c, w, h)| RectPart {
                offset: *c - centroid,
                width: *w,
                height: *h,
            })
            .collect();

        Self::with_shape(centroid.x, centroid.y, Shape::Compound { parts: local }, material, true)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Transform a world point into this body's local frame
    #[inline]
    pub fn world_to_local(&self, world: Vec2) -> Vec2 {
        (world - self.pos).rotate(-self.angle)
    }

    pub fn contact_radius(&self) -> f32 {
        self.shape.contact_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_centers_on_weighted_centroid() {
        // Heavy bottom plate pulls the centroid below the wall midpoints.
        let body = RigidBody::compound(
            &[
                (Vec2::new(0.0, 100.0), 100.0, 10.0),
                (Vec2::new(-50.0, 0.0), 10.0, 200.0),
                (Vec2::new(50.0, 0.0), 10.0, 200.0),
            ],
            Material::default(),
        );
        assert!(body.is_static);
        assert_eq!(body.inv_mass, 0.0);
        assert!(body.pos.x.abs() < 1e-4);
        assert!(body.pos.y > 0.0 && body.pos.y < 100.0);
    }

    #[test]
    fn dynamic_mass_follows_density() {
        let light = RigidBody::circle(0.0, 0.0, 5.0, Material { density: 0.001, ..Material::default() });
        let heavy = RigidBody::circle(0.0, 0.0, 5.0, Material { density: 0.004, ..Material::default() });
        assert!((heavy.mass / light.mass - 4.0).abs() < 1e-3);
    }

    #[test]
    fn polygon_clamps_to_triangle() {
        let body = RigidBody::polygon(0.0, 0.0, 1, 10.0, Material::default());
        assert_eq!(body.shape, Shape::Polygon { sides: 3, radius: 10.0 });
    }
}
