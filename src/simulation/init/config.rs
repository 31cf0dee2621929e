use serde::{Deserialize, Serialize};

use crate::error::{CupError, Result};
use crate::input::{SensorPolicy, TiltSettings};
use crate::rigid_body::{Material, Vec2};
use crate::rigid_body_system::SolverSettings;

/// Visible area in world units (CSS pixels on the web)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

/// Cup layout: interior width/height, wall thickness, and its material
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CupGeometry {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    pub material: Material,
}

impl CupGeometry {
    /// Centered horizontally, slightly below the middle, at most 300 wide
    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self {
            center: Vec2::new(viewport.width / 2.0, viewport.height / 2.0 + 50.0),
            width: (viewport.width * 0.5).min(300.0),
            height: 350.0,
            wall_thickness: 10.0,
            material: Material {
                friction: 0.1,
                restitution: 0.2,
                ..Material::default()
            },
        }
    }

    /// World-space `(center, width, height)` of bottom, left and right walls
    pub fn parts(&self) -> [(Vec2, f32, f32); 3] {
        let c = self.center;
        let (w, h, t) = (self.width, self.height, self.wall_thickness);
        [
            (Vec2::new(c.x, c.y + h / 2.0), w + t, t),
            (Vec2::new(c.x - w / 2.0, c.y), t, h),
            (Vec2::new(c.x + w / 2.0, c.y), t, h),
        ]
    }

    /// Interior of the upright cup: between the wall faces, above the bottom
    pub fn interior(&self) -> (Vec2, Vec2) {
        let c = self.center;
        let half_t = self.wall_thickness / 2.0;
        (
            Vec2::new(c.x - self.width / 2.0 + half_t, c.y - self.height / 2.0),
            Vec2::new(c.x + self.width / 2.0 - half_t, c.y + self.height / 2.0 - half_t),
        )
    }
}

impl Default for CupGeometry {
    fn default() -> Self {
        Self::for_viewport(&Viewport::default())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub kind: String,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CupConfig {
    pub viewport: Viewport,
    /// Derived from the viewport when absent
    pub cup: Option<CupGeometry>,
    pub solver: SolverSettings,
    pub tilt: TiltSettings,
    pub sensor_policy: SensorPolicy,
    /// Extra room around the viewport before a body is reclaimed
    pub reclaim_margin: f32,
    pub fuse_ms: f64,
    pub initial_items: Vec<SpawnRequest>,
    pub seed: u32,
}

impl Default for CupConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            cup: None,
            solver: SolverSettings::default(),
            tilt: TiltSettings::default(),
            sensor_policy: SensorPolicy::default(),
            reclaim_margin: 100.0,
            fuse_ms: 3000.0,
            initial_items: vec![SpawnRequest { kind: "water".to_string(), count: 50 }],
            seed: 12345,
        }
    }
}

impl CupConfig {
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport { width, height },
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: CupConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn cup_geometry(&self) -> CupGeometry {
        self.cup.unwrap_or_else(|| CupGeometry::for_viewport(&self.viewport))
    }

    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f32) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CupError::InvalidConfig(format!("{name} must be positive, got {v}")))
            }
        }

        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;

        let cup = self.cup_geometry();
        positive("cup.width", cup.width)?;
        positive("cup.height", cup.height)?;
        positive("cup.wall_thickness", cup.wall_thickness)?;
        if !cup.center.is_finite() {
            return Err(CupError::InvalidConfig("cup.center must be finite".to_string()));
        }

        if self.solver.substeps == 0 || self.solver.iterations == 0 {
            return Err(CupError::InvalidConfig("solver needs at least one substep and iteration".to_string()));
        }
        positive("solver.max_speed", self.solver.max_speed)?;

        positive("tilt.drag_span", self.tilt.drag_span)?;
        positive("tilt.snap_threshold", self.tilt.snap_threshold)?;
        if !(self.tilt.ease_factor > 0.0 && self.tilt.ease_factor < 1.0) {
            return Err(CupError::InvalidConfig(format!(
                "tilt.ease_factor must be in (0, 1), got {}",
                self.tilt.ease_factor
            )));
        }

        if !(self.reclaim_margin.is_finite() && self.reclaim_margin >= 0.0) {
            return Err(CupError::InvalidConfig("reclaim_margin must be >= 0".to_string()));
        }
        if !(self.fuse_ms.is_finite() && self.fuse_ms >= 0.0) {
            return Err(CupError::InvalidConfig("fuse_ms must be >= 0".to_string()));
        }
        Ok(())
    }
}
