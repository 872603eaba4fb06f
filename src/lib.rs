//! Shortcut Engine - keyboard and gesture shortcut resolution
//!
//! Matches key presses and traced gestures against a fixed table of command
//! descriptors, selects at most one command per input and runs it.

pub mod config;
pub mod error;
pub mod logging;
pub mod shortcuts;

pub use error::{Result, ShortcutError};
