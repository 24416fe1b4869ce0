//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace, LevelFilter};

/// Log target used for messages emitted by scripts
pub const SCRIPT_TARGET: &str = "script";

/// Initialize the logging system
///
/// Honors `RUST_LOG` when set. Repeated calls are ignored so test binaries
/// and hosts can both call it.
pub fn init() {
    init_with_level(LevelFilter::Info);
}

/// Initialize the logging system with a fallback level used when `RUST_LOG`
/// is not set
pub fn init_with_level(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if builder.try_init().is_err() {
        log::trace!("Logger already initialized");
    }
}

/// Log an informational message on behalf of a script
pub fn script_info(message: &str) {
    log::info!(target: SCRIPT_TARGET, "{message}");
}

/// Log a warning on behalf of a script
pub fn script_warning(message: &str) {
    log::warn!(target: SCRIPT_TARGET, "{message}");
}

/// Log an error on behalf of a script
pub fn script_error(message: &str) {
    log::error!(target: SCRIPT_TARGET, "{message}");
}
