//! Configuration module - engine settings
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.config/shortcut-engine/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! Bindings themselves are not configurable; only suspension, labelling and
//! logging behaviour is.
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_CONFIG_PATH, DEFAULT_KEYBOARD_BLOCKING_MODALS, DEFAULT_LOG_FILTER};

pub use types::Config;

pub use loader::{load_config, load_default_config, read_config};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
