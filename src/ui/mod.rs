// UI and formatting module

pub mod formatters;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use formatters::{
    describe_cue, format_delay, format_hud, format_percentage, format_population, format_time,
};
pub use prompts::{confirm, success, warn};
