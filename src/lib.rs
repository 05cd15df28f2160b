// Popwatch Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, WatchError};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::Config;
pub use crate::core::notifier::{evaluate, Metric, NotifierState, ThresholdRule};
pub use crate::core::quantity::{parse, Quantity};
pub use crate::core::rotation::{history_limit, pick_next, ClipRotation};
pub use crate::core::session::{TickReport, WatchSession};

// Initialize logging
pub fn init_logging() {
    init_logging_with(log::LevelFilter::Info);
}

/// Initialize logging with an explicit default level (RUST_LOG still wins)
pub fn init_logging_with(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
