// Core business logic module

pub mod catalog;
pub mod config;
pub mod cues;
pub mod notifier;
pub mod quantity;
pub mod rotation;
pub mod session;

// Re-export commonly used items
pub use catalog::{Catalog, Clip, ClipKind};
pub use config::{AmbientConfig, Config, RuleConfig};
pub use cues::{BeepPattern, Cue, CueEvent, Tone};
pub use session::{TickReport, WatchSession};
