use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::rigid_body::Vec2;

/// Weight of the newest frame in the FPS average
const FPS_SMOOTHING: f64 = 0.1;

/// Per-frame readout shown in the corner of the page
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Telemetry {
    pub object_count: usize,
    pub fps: f64,
    pub gravity: Vec2,
    /// Wall time of the last engine update
    pub update_ms: f64,
    pub frame: u64,
    #[serde(skip)]
    last_tick_ms: Option<f64>,
}

impl Telemetry {
    pub(crate) fn record(&mut self, now_ms: f64, update_ms: f64, object_count: usize, gravity: Vec2, frame: u64) {
        if let Some(last) = self.last_tick_ms {
            let dt = now_ms - last;
            if dt > 0.0 {
                let instant = 1000.0 / dt;
                self.fps = if self.fps == 0.0 {
                    instant
                } else {
                    self.fps + (instant - self.fps) * FPS_SMOOTHING
                };
            }
        }
        self.last_tick_ms = Some(now_ms);
        self.update_ms = update_ms;
        self.object_count = object_count;
        self.gravity = gravity;
        self.frame = frame;
    }

    /// `Objects: N | FPS: F | Gravity: x=0.00, y=1.00`
    pub fn readout(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Objects: {} | FPS: {:.0} | Gravity: x={:.2}, y={:.2}",
            self.object_count, self.fps, self.gravity.x, self.gravity.y
        )
    }
}
