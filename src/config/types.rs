//! Configuration type definitions

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::logging::LogSettings;
use crate::shortcuts::Platform;

/// Engine configuration, read from camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Modals that suspend keyboard dispatch (default: welcome, shortcuts, feedback)
    #[serde(default = "default_keyboard_blocking_modals")]
    pub keyboard_blocking_modals: Vec<String>,
    /// Force Apple-style ("Command") or other ("Ctrl") labels.
    /// None = follow the current platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apple_labels: Option<bool>,
    /// Tracing filter directive (default: "info"). RUST_LOG takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Also write structured JSONL logs to the log directory (default: false)
    #[serde(default = "default_json_log")]
    pub json_log: bool,
}

fn default_keyboard_blocking_modals() -> Vec<String> {
    DEFAULT_KEYBOARD_BLOCKING_MODALS
        .iter()
        .map(|modal| modal.to_string())
        .collect()
}

fn default_json_log() -> bool {
    DEFAULT_JSON_LOG
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keyboard_blocking_modals: default_keyboard_blocking_modals(),
            apple_labels: None,
            log_filter: None,
            json_log: DEFAULT_JSON_LOG,
        }
    }
}

impl Config {
    /// Whether labels use the Apple family on `platform`, honouring the override.
    pub fn uses_apple_labels(&self, platform: Platform) -> bool {
        self.apple_labels
            .unwrap_or_else(|| platform.uses_apple_labels())
    }

    /// The platform to format labels for, honouring the override.
    pub fn label_platform(&self, platform: Platform) -> Platform {
        match (self.uses_apple_labels(platform), platform) {
            (true, _) => Platform::MacOS,
            (false, Platform::MacOS) => Platform::Linux,
            (false, other) => other,
        }
    }

    pub fn get_log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            filter: self.get_log_filter().to_string(),
            json_log_path: self.json_log.then(crate::logging::log_path),
        }
    }
}
