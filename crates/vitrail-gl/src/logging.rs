//! Logger bootstrap for embedders.
//!
//! The driver itself only ever logs through the `log` facade; embedders
//! with their own backend should install it and skip this module.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes a global `env_logger` once. Idempotent; later calls are
/// ignored.
///
/// Filtering follows `RUST_LOG` syntax, e.g. `vitrail_gl=trace` to watch
/// resource lifecycle events. Without `RUST_LOG`, only warnings and errors
/// are shown.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }
        builder.init();
        log::debug!("vitrail-gl logging initialized");
    });
}
