use serde::{Deserialize, Serialize};

use crate::error::CupError;

/// How sensor readings drive the cup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorPolicy {
    /// Rotate gravity with the device; the cup stays upright
    #[default]
    GravityRotation,
    /// Rotate the cup by the device tilt; gravity stays world-down
    AbsoluteTilt,
}

/// Result of the platform's motion permission gate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Platform has no permission gate
    NotRequired,
    Granted,
    Denied,
}

impl Permission {
    /// Parse the host's permission string; anything unrecognised counts as denied
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "" | "not_required" | "unsupported" => Permission::NotRequired,
            "granted" => Permission::Granted,
            _ => Permission::Denied,
        }
    }
}

/// What the host probed once at start-up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub touch: bool,
    pub permission: Permission,
}

/// Exactly one input source is authoritative for the whole session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    SensorDriven(SensorPolicy),
    PointerDriven,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModeSelection {
    pub mode: InputMode,
    /// Set when the preferred mode was unavailable and the user should be told
    pub notice: Option<CupError>,
}

impl InputMode {
    /// Pick the session's input mode.
    ///
    /// Touch devices get sensors; a denied permission falls back to pointer
    /// drag with a notice instead of aborting.
    pub fn select(caps: Capabilities, policy: SensorPolicy) -> ModeSelection {
        if !caps.touch {
            log::info!("input mode: pointer drag");
            return ModeSelection { mode: InputMode::PointerDriven, notice: None };
        }

        match caps.permission {
            Permission::Denied => {
                log::warn!("{}; falling back to pointer drag", CupError::PermissionDenied);
                ModeSelection {
                    mode: InputMode::PointerDriven,
                    notice: Some(CupError::PermissionDenied),
                }
            }
            Permission::Granted | Permission::NotRequired => {
                log::info!("input mode: sensors ({policy:?})");
                ModeSelection { mode: InputMode::SensorDriven(policy), notice: None }
            }
        }
    }

    pub fn accepts_sensor(&self) -> bool {
        matches!(self, InputMode::SensorDriven(_))
    }

    pub fn accepts_pointer(&self) -> bool {
        matches!(self, InputMode::PointerDriven)
    }
}
