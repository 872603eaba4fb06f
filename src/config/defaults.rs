//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Where the config file is looked up when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/shortcut-engine/config.json";

/// Modals that suspend keyboard shortcuts while shown.
/// Gestures are suspended by any modal regardless of this list.
pub const DEFAULT_KEYBOARD_BLOCKING_MODALS: &[&str] = &["welcome", "shortcuts", "feedback"];

/// Default tracing filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default for writing the JSONL log file
pub const DEFAULT_JSON_LOG: bool = false;
