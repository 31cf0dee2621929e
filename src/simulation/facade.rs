use wasm_bindgen::prelude::*;

use crate::error::CupError;
use crate::input::{Capabilities, MotionSample, OrientationReading, Permission, PointerTarget};

use super::{CupConfig, CupCore};

/// Floats per drained detonation: body id, x, y, time (ms)
pub const DETONATION_STRIDE: usize = 4;

fn to_js_error(e: CupError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct Cup {
    core: CupCore,
}

#[wasm_bindgen]
impl Cup {
    /// Create a cup sized for the viewport, with the default population.
    /// Throws when the viewport is empty or not finite.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<Cup, JsValue> {
        let core = CupCore::try_new(CupConfig::for_viewport(width, height)).map_err(to_js_error)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<Cup, JsValue> {
        let core = CupCore::from_json(json).map_err(to_js_error)?;
        Ok(Self { core })
    }

    // === INPUT ===

    /// Start-up probe. Returns true when sensors drive the cup.
    #[wasm_bindgen(js_name = selectInput)]
    pub fn select_input(&mut self, touch: bool, permission: String) -> bool {
        let caps = Capabilities {
            touch,
            permission: Permission::from_label(&permission),
        };
        self.core.select_input(caps).accepts_sensor()
    }

    /// Message to show the user, if input selection fell back
    pub fn notice(&self) -> Option<String> {
        self.core.notice().map(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = onDeviceMotion)]
    pub fn on_device_motion(
        &mut self,
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
        screen_angle: Option<f32>,
        legacy_orientation: Option<f32>,
    ) -> bool {
        let sample = MotionSample { x, y, z };
        let orientation = OrientationReading {
            screen_angle,
            legacy: legacy_orientation,
        };
        self.core.on_motion(&sample, orientation)
    }

    #[wasm_bindgen(js_name = onDeviceOrientation)]
    pub fn on_device_orientation(&mut self, gamma: Option<f32>) -> bool {
        self.core.on_tilt(gamma)
    }

    /// `on_chrome` is true when the press landed on a button or other control
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, on_chrome: bool) -> bool {
        let target = if on_chrome { PointerTarget::Chrome } else { PointerTarget::Scene };
        self.core.pointer_down(x, target)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32) -> bool {
        self.core.pointer_move(x)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, now_ms: f64) -> bool {
        self.core.pointer_up(now_ms)
    }

    #[wasm_bindgen(js_name = setGravity)]
    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.core.set_gravity(crate::rigid_body::Vec2::new(x, y));
    }

    // === SIMULATION ===

    /// Advance one frame at host time `now_ms`
    pub fn tick(&mut self, now_ms: f64) {
        self.core.tick(now_ms);
    }

    /// Spawn items by preset label. Returns how many were created.
    pub fn spawn(&mut self, kind: &str, count: u32) -> u32 {
        self.core.spawn(kind, count).len() as u32
    }

    pub fn reclaim(&mut self) -> u32 {
        self.core.reclaim() as u32
    }

    #[wasm_bindgen(getter, js_name = objectCount)]
    pub fn object_count(&self) -> u32 {
        self.core.object_count() as u32
    }

    #[wasm_bindgen(getter, js_name = gravityX)]
    pub fn gravity_x(&self) -> f32 {
        self.core.gravity().x
    }

    #[wasm_bindgen(getter, js_name = gravityY)]
    pub fn gravity_y(&self) -> f32 {
        self.core.gravity().y
    }

    #[wasm_bindgen(getter, js_name = containerAngle)]
    pub fn container_angle(&self) -> f32 {
        self.core.container_angle()
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.frame()
    }

    // === READOUT ===

    /// Overlay text, e.g. `Objects: 50 | FPS: 60 | Gravity: x=0.00, y=1.00`
    pub fn telemetry(&self) -> String {
        self.core.telemetry().readout()
    }

    #[wasm_bindgen(js_name = telemetryJson)]
    pub fn telemetry_json(&self) -> Result<String, JsValue> {
        self.core.telemetry().to_json().map_err(to_js_error)
    }

    /// Dynamic bodies, `BODY_STRIDE` floats each
    #[wasm_bindgen(js_name = bodyBuffer)]
    pub fn body_buffer(&mut self) -> Vec<f32> {
        self.core.body_buffer().to_vec()
    }

    #[wasm_bindgen(js_name = containerPose)]
    pub fn container_pose(&self) -> Vec<f32> {
        self.core.container_pose().to_vec()
    }

    /// Detonations since the last call, `DETONATION_STRIDE` values each
    #[wasm_bindgen(js_name = drainDetonations)]
    pub fn drain_detonations(&mut self) -> Vec<f64> {
        self.core
            .drain_detonations()
            .iter()
            .flat_map(|d| [d.body.0 as f64, d.pos.x as f64, d.pos.y as f64, d.at_ms])
            .collect()
    }
}

impl Cup {
    pub fn core(&self) -> &CupCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut CupCore {
        &mut self.core
    }
}
