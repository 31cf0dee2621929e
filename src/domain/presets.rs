//! Item presets - pure data describing every spawnable kind
//!
//! A preset is a shape generator plus fixed material constants.
//! No behavior lives here; the bomb's fuse is handled by the lifecycle layer.

use serde::{Deserialize, Serialize};

use crate::core::utils::random::Rng;
use crate::rigid_body::{Material, RigidBody, Shape, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Water,
    Wood,
    Ball,
    Ice,
    Popcorn,
    Stone,
    Slime,
    Gold,
    Confetti,
    Bomb,
}

impl ItemKind {
    pub const ALL: [ItemKind; 10] = [
        ItemKind::Water,
        ItemKind::Wood,
        ItemKind::Ball,
        ItemKind::Ice,
        ItemKind::Popcorn,
        ItemKind::Stone,
        ItemKind::Slime,
        ItemKind::Gold,
        ItemKind::Confetti,
        ItemKind::Bomb,
    ];

    /// Parse a host-facing type label (`"water"`, `"gold_bar"`, ...)
    pub fn from_label(label: &str) -> Option<Self> {
        let kind = match label.trim().to_ascii_lowercase().as_str() {
            "water" => ItemKind::Water,
            "wood" => ItemKind::Wood,
            "ball" => ItemKind::Ball,
            "ice" => ItemKind::Ice,
            "popcorn" => ItemKind::Popcorn,
            "stone" => ItemKind::Stone,
            "slime" => ItemKind::Slime,
            "gold" | "gold_bar" | "goldbar" => ItemKind::Gold,
            "confetti" | "paper" => ItemKind::Confetti,
            "bomb" => ItemKind::Bomb,
            _ => return None,
        };
        Some(kind)
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Water => "water",
            ItemKind::Wood => "wood",
            ItemKind::Ball => "ball",
            ItemKind::Ice => "ice",
            ItemKind::Popcorn => "popcorn",
            ItemKind::Stone => "stone",
            ItemKind::Slime => "slime",
            ItemKind::Gold => "gold",
            ItemKind::Confetti => "confetti",
            ItemKind::Bomb => "bomb",
        }
    }

    pub fn preset(self) -> &'static Preset {
        &PRESETS[self as usize]
    }

    /// Bombs always spawn alone
    pub fn fixed_batch(self) -> Option<u32> {
        match self {
            ItemKind::Bomb => Some(1),
            _ => None,
        }
    }
}

/// Size distribution for a preset; ranges are `[min, max)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeGen {
    Circle { radius: (f32, f32) },
    Rect { width: (f32, f32), height: (f32, f32) },
    /// `sides` is an inclusive range
    Polygon { sides: (u32, u32), radius: (f32, f32) },
}

impl ShapeGen {
    /// Largest contact radius any generated body can have
    pub fn max_contact_radius(&self) -> f32 {
        match *self {
            ShapeGen::Circle { radius } => radius.1,
            ShapeGen::Rect { width, height } => Shape::Rect { width: width.1, height: height.1 }.contact_radius(),
            ShapeGen::Polygon { radius, .. } => radius.1,
        }
    }
}

/// Largest contact radius over every preset
pub fn max_preset_contact_radius() -> f32 {
    PRESETS.iter().map(|p| p.shape.max_contact_radius()).fold(0.0, f32::max)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub kind: ItemKind,
    pub shape: ShapeGen,
    pub material: Material,
    /// 0xRRGGBB
    pub color: u32,
}

const fn material(friction: f32, friction_air: f32, restitution: f32, density: f32) -> Material {
    Material {
        friction,
        friction_static: 0.5,
        friction_air,
        restitution,
        density,
    }
}

/// Indexed by `ItemKind as usize`
pub static PRESETS: [Preset; 10] = [
    Preset {
        kind: ItemKind::Water,
        shape: ShapeGen::Circle { radius: (4.0, 7.0) },
        material: material(0.001, 0.01, 0.1, 0.001),
        color: 0x3498db,
    },
    Preset {
        kind: ItemKind::Wood,
        shape: ShapeGen::Rect { width: (15.0, 25.0), height: (15.0, 25.0) },
        material: material(0.1, 0.02, 0.0, 0.0005),
        color: 0x8d6e63,
    },
    Preset {
        kind: ItemKind::Ball,
        shape: ShapeGen::Circle { radius: (10.0, 15.0) },
        material: material(0.1, 0.01, 0.9, 0.001),
        color: 0xe67e22,
    },
    Preset {
        kind: ItemKind::Ice,
        shape: ShapeGen::Rect { width: (12.0, 18.0), height: (12.0, 18.0) },
        material: Material {
            friction: 0.0,
            friction_static: 0.0,
            friction_air: 0.01,
            restitution: 0.0,
            density: 0.001,
        },
        color: 0xa29bfe,
    },
    Preset {
        kind: ItemKind::Popcorn,
        shape: ShapeGen::Polygon { sides: (3, 6), radius: (8.0, 12.0) },
        material: material(0.1, 0.01, 0.5, 0.0001),
        color: 0xfdcb6e,
    },
    Preset {
        kind: ItemKind::Stone,
        shape: ShapeGen::Polygon { sides: (5, 7), radius: (10.0, 16.0) },
        material: material(0.6, 0.01, 0.05, 0.004),
        color: 0x7f8c8d,
    },
    Preset {
        kind: ItemKind::Slime,
        shape: ShapeGen::Circle { radius: (8.0, 12.0) },
        material: Material {
            friction: 0.9,
            friction_static: 1.0,
            friction_air: 0.05,
            restitution: 0.0,
            density: 0.0015,
        },
        color: 0x2ecc71,
    },
    Preset {
        kind: ItemKind::Gold,
        shape: ShapeGen::Rect { width: (28.0, 32.0), height: (12.0, 14.0) },
        material: material(0.3, 0.01, 0.05, 0.01),
        color: 0xf1c40f,
    },
    Preset {
        kind: ItemKind::Confetti,
        shape: ShapeGen::Rect { width: (6.0, 10.0), height: (3.0, 5.0) },
        material: material(0.2, 0.08, 0.1, 0.0002),
        color: 0xff7eb6,
    },
    Preset {
        kind: ItemKind::Bomb,
        shape: ShapeGen::Circle { radius: (14.0, 14.0) },
        material: material(0.2, 0.01, 0.3, 0.003),
        color: 0x2d3436,
    },
];

impl Preset {
    /// Instantiate one body of this preset at `pos`
    pub fn build(&self, pos: Vec2, rng: &mut Rng) -> RigidBody {
        let body = match self.shape {
            ShapeGen::Circle { radius } => {
                RigidBody::circle(pos.x, pos.y, rng.range(radius.0, radius.1), self.material)
            }
            ShapeGen::Rect { width, height } => RigidBody::rectangle(
                pos.x,
                pos.y,
                rng.range(width.0, width.1),
                rng.range(height.0, height.1),
                self.material,
            ),
            ShapeGen::Polygon { sides, radius } => RigidBody::polygon(
                pos.x,
                pos.y,
                rng.range_u32(sides.0, sides.1),
                rng.range(radius.0, radius.1),
                self.material,
            ),
        };
        body.with_label(self.kind.label()).with_color(self.color)
    }
}
