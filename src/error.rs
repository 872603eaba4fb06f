use thiserror::Error;
use tracing::{error, warn};

use crate::shortcuts::{GestureParseError, ShortcutParseError};

/// Domain-specific errors for the shortcut engine.
///
/// Failing to match an input is not an error; see `DispatchOutcome::Unmatched`.
#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error("Invalid keyboard pattern: {0}")]
    ParsePattern(#[from] ShortcutParseError),

    #[error("Invalid gesture: {0}")]
    ParseGesture(#[from] GestureParseError),

    #[error("Configuration error in '{path}': {message}")]
    Config { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShortcutError {
    pub fn user_message(&self) -> String {
        match self {
            Self::ParsePattern(e) => format!("Could not read shortcut: {}", e),
            Self::ParseGesture(e) => format!("Could not read gesture: {}", e),
            Self::Config { path, .. } => format!("Configuration issue in {}", path),
            Self::Io(e) => format!("File access failed: {}", e),
            Self::Json(e) => format!("Invalid message format: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShortcutError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use shortcut_engine::error::ResultExt;
///
/// let config = read_config(&path).warn_on_err().unwrap_or_default();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
