//! Logging utilities

pub use log::{debug, error, info, trace, warn};

use env_logger::Env;

/// Initialize the logging system with `default_level` unless `RUST_LOG` says otherwise
///
/// Safe to call more than once; later calls are ignored.
pub fn init(default_level: &str) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init();
}
