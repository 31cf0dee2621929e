//! Virtual Cup Engine - tilt a cup full of objects, in WASM
//!
//! Architecture:
//! - core/        - logging and RNG utilities
//! - domain/      - item presets (pure data)
//! - systems/     - rigid bodies and the solver
//! - input/       - sensor/pointer input -> gravity and cup angle
//! - simulation/  - CupCore orchestration and the wasm facade

pub mod core;
pub mod domain;
pub mod error;
pub mod input;
pub mod simulation;
pub mod systems;

pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::utils::logging::init_logging(log::Level::Info);

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"🥤 Virtual Cup engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::presets::ItemKind;
pub use error::CupError;
pub use simulation::{Cup, CupConfig, CupCore};
