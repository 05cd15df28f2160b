// Command handlers module
pub mod config;
pub mod parse;
pub mod pick;
pub mod rules;
pub mod version;
pub mod watch;

// Re-exports for cleaner imports
pub use parse::execute as parse;
pub use pick::execute as pick;
pub use rules::execute as rules;
pub use version::execute as version;
pub use watch::execute as watch;
