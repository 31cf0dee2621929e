pub mod logging;
pub mod random;
