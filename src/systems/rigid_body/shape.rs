use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Collision/render shape in body-local coordinates (centered at 0,0)
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
    /// Regular polygon with `sides` vertices on a circle of `radius`
    Polygon { sides: u32, radius: f32 },
    /// Rigid union of axis-aligned (in local space) rectangles
    Compound { parts: Vec<RectPart> },
}

/// One rectangle of a compound body, offset from the body center
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectPart {
    pub offset: Vec2,
    pub width: f32,
    pub height: f32,
}

impl RectPart {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Numeric shape code used in the render buffer
pub const SHAPE_CIRCLE: u8 = 0;
pub const SHAPE_RECT: u8 = 1;
pub const SHAPE_POLYGON: u8 = 2;
pub const SHAPE_COMPOUND: u8 = 3;

impl Shape {
    pub fn area(&self) -> f32 {
        match self {
            Shape::Circle { radius } => PI * radius * radius,
            Shape::Rect { width, height } => width * height,
            Shape::Polygon { sides, radius } => {
                let n = (*sides).max(3) as f32;
                0.5 * n * radius * radius * (2.0 * PI / n).sin()
            }
            Shape::Compound { parts } => parts.iter().map(RectPart::area).sum(),
        }
    }

    /// Radius of the circle proxy used for dynamic contacts.
    ///
    /// Rectangles and polygons average their inscribed and circumscribed
    /// radii so stacks neither float nor sink visibly.
    pub fn contact_radius(&self) -> f32 {
        match self {
            Shape::Circle { radius } => *radius,
            Shape::Rect { width, height } => {
                let inner = width.min(*height) * 0.5;
                let outer = 0.5 * (width * width + height * height).sqrt();
                0.5 * (inner + outer)
            }
            Shape::Polygon { sides, radius } => {
                let n = (*sides).max(3) as f32;
                let inner = radius * (PI / n).cos();
                0.5 * (inner + radius)
            }
            Shape::Compound { parts } => parts
                .iter()
                .map(|p| p.offset.length() + p.half_extents().length())
                .fold(0.0, f32::max),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Shape::Circle { .. } => SHAPE_CIRCLE,
            Shape::Rect { .. } => SHAPE_RECT,
            Shape::Polygon { .. } => SHAPE_POLYGON,
            Shape::Compound { .. } => SHAPE_COMPOUND,
        }
    }

    /// Two size parameters for the host renderer: (radius, 0), (w, h) or (radius, sides)
    pub fn render_params(&self) -> (f32, f32) {
        match self {
            Shape::Circle { radius } => (*radius, 0.0),
            Shape::Rect { width, height } => (*width, *height),
            Shape::Polygon { sides, radius } => (*radius, *sides as f32),
            Shape::Compound { parts } => (parts.len() as f32, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_area_approaches_circle() {
        let poly = Shape::Polygon { sides: 64, radius: 10.0 };
        let circle = Shape::Circle { radius: 10.0 };
        assert!((poly.area() - circle.area()).abs() / circle.area() < 0.01);
    }

    #[test]
    fn rect_contact_radius_sits_between_inner_and_outer() {
        let r = Shape::Rect { width: 20.0, height: 10.0 }.contact_radius();
        assert!(r > 5.0 && r < 11.19);
    }
}
