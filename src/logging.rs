//! Structured logging: compact stderr output plus optional JSONL file.
//!
//! # Usage
//!
//! ```rust,ignore
//! use shortcut_engine::logging;
//!
//! // Keep the guard alive for the duration of the program
//! let _guard = logging::init(&config.log_settings());
//!
//! tracing::info!(event_type = "app_start", "Started");
//! ```
//!
//! # JSONL Output Format
//!
//! Each line is a valid JSON object:
//! ```json
//! {"timestamp":"2026-10-16T10:30:45.123Z","level":"DEBUG","fields":{"event_type":"key_event","key":"b","modifiers":"meta","command_id":"bold","message":"Key b -> bold"},"target":"shortcut_engine::logging"}
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Settings for [`init`]. Usually built with `Config::log_settings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive used when RUST_LOG is not set
    pub filter: String,
    /// Write JSONL logs here when set
    pub json_log_path: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: crate::config::DEFAULT_LOG_FILTER.to_string(),
            json_log_path: None,
        }
    }
}

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize logging.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
/// Calling this twice leaves the first subscriber in place.
pub fn init(settings: &LogSettings) -> LoggingGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let file = settings.json_log_path.as_deref().and_then(open_log_file);
    let (json_layer, file_guard) = match file {
        Some(file) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
    {
        eprintln!("[LOGGING] Subscriber already installed: {}", e);
    }

    if let Some(path) = &settings.json_log_path {
        tracing::info!(
            event_type = "app_lifecycle",
            action = "started",
            log_path = %path.display(),
            "Logging initialized"
        );
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("[LOGGING] Failed to create log directory: {}", e);
            return None;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| eprintln!("[LOGGING] Failed to open log file: {}", e))
        .ok()
}

/// Get the log directory path (~/.shortcut-engine/logs/)
fn get_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".shortcut-engine").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("shortcut-engine-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join("shortcut-engine.jsonl")
}

// =============================================================================
// STRUCTURED LOGGING HELPERS
// =============================================================================

/// Log a keyboard dispatch. `command_id` is None when nothing matched.
pub fn log_key_dispatch(key: &str, modifiers: &str, command_id: Option<&str>) {
    tracing::debug!(
        event_type = "key_event",
        key = key,
        modifiers = modifiers,
        command_id = command_id,
        "Key {} -> {}", key, command_id.unwrap_or("none")
    );
}

/// Log a gesture dispatch. `command_id` is None when nothing matched.
pub fn log_gesture_dispatch(gesture: &str, command_id: Option<&str>) {
    tracing::debug!(
        event_type = "gesture_event",
        gesture = gesture,
        command_id = command_id,
        "Gesture {} -> {}", gesture, command_id.unwrap_or("none")
    );
}

/// Log input dropped because the current state suspends shortcuts
pub fn log_suspended(input: &str, modal: Option<&str>, drag_in_progress: bool) {
    tracing::debug!(
        event_type = "dispatch_suspended",
        input = input,
        modal = modal,
        drag_in_progress = drag_in_progress,
        "Ignoring {} input (modal={}, drag={})", input, modal.unwrap_or("none"), drag_in_progress
    );
}
