/// Route the `log` facade to the browser console.
///
/// Safe to call more than once; later calls keep the first logger.
/// Native builds (tests, tools) install nothing.
pub fn init_logging(level: log::Level) {
    #[cfg(target_arch = "wasm32")]
    {
        if console_log::init_with_level(level).is_ok() {
            log::debug!("console logger installed at {level}");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = level;
    }
}
