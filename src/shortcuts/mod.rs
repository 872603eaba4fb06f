//! Shortcut resolution and dispatch.
//!
//! This module provides:
//! - Command descriptors carrying keyboard and gesture patterns
//! - A registry sorted once so more specific modifier combinations win
//! - First-match keyboard and gesture lookup
//! - Suspension-gated dispatch with default-action suppression
//! - Platform-aware label formatting
//!
//! # Example
//!
//! ```ignore
//! use shortcut_engine::shortcuts::{CommandDescriptor, Dispatcher, KeyEvent, KeyboardPattern,
//!     ActionOutcome, ShortcutRegistry, StateSnapshot};
//!
//! let registry = ShortcutRegistry::new(vec![
//!     CommandDescriptor::new("bold", |_, _| Ok(ActionOutcome::handled()))
//!         .with_keyboard(KeyboardPattern::new("b").with_meta()),
//! ]);
//! let state = || StateSnapshot::default();
//! let outcome = Dispatcher::new(&registry, &state)
//!     .dispatch_keyboard(&KeyEvent::new("b").with_meta())?;
//! assert_eq!(outcome.command_id(), Some("bold"));
//! ```

mod dispatch;
mod format;
mod registry;
mod types;


#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;


pub use types::{
    canonicalize_key, ActionOutcome, Direction, GestureParseError, GesturePattern,
    GestureSequence, InputEvent, InvocationContext, InvocationKind, KeyEvent, KeyboardPattern,
    Platform, ShortcutParseError,
};

pub use registry::{
    compare_priority, CommandDescriptor, ConflictKind, LazyRegistry, ShortcutAction,
    ShortcutConflict, ShortcutRegistry,
};

pub use dispatch::{DispatchOutcome, Dispatcher, StateProvider, StateSnapshot, SuspensionPolicy};

pub use format::{format_gesture_sequence, format_keyboard_pattern};
