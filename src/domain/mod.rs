//! Domain data: spawnable item presets

pub mod presets;
