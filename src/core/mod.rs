//! Shared plumbing: logging setup and the deterministic RNG

pub mod utils;
