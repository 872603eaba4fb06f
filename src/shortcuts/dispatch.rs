//! Entry points called by the input layer.
//!
//! Each dispatch reads a fresh [`StateSnapshot`], bails out when the current
//! state suspends that kind of input, otherwise resolves at most one command
//! and runs it. Errors returned by an action are propagated untouched.

use serde::{Deserialize, Serialize};

use crate::config::{Config, DEFAULT_KEYBOARD_BLOCKING_MODALS};
use crate::logging;

use super::registry::ShortcutRegistry;
use super::types::{GestureSequence, InputEvent, InvocationContext, KeyEvent};

/// The part of application state that can suspend shortcuts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// Label of the modal currently shown, if any.
    #[serde(default)]
    pub show_modal: Option<String>,
    #[serde(default)]
    pub drag_in_progress: bool,
}

/// Read access to the application state, queried once per dispatch.
pub trait StateProvider {
    fn snapshot(&self) -> StateSnapshot;
}

impl<F> StateProvider for F
where
    F: Fn() -> StateSnapshot,
{
    fn snapshot(&self) -> StateSnapshot {
        self()
    }
}

/// Decides when dispatch is suspended.
///
/// Gestures are suspended by any modal or an active drag. Keyboard input is
/// suspended only by the listed modals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuspensionPolicy {
    keyboard_blocking_modals: Vec<String>,
}

impl Default for SuspensionPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_KEYBOARD_BLOCKING_MODALS
                .iter()
                .map(|modal| modal.to_string())
                .collect(),
        )
    }
}

impl SuspensionPolicy {
    pub fn new(keyboard_blocking_modals: Vec<String>) -> Self {
        Self {
            keyboard_blocking_modals,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.keyboard_blocking_modals.clone())
    }

    pub fn suspends_gestures(&self, state: &StateSnapshot) -> bool {
        state.show_modal.is_some() || state.drag_in_progress
    }

    pub fn suspends_keyboard(&self, state: &StateSnapshot) -> bool {
        state.show_modal.as_deref().is_some_and(|modal| {
            self.keyboard_blocking_modals
                .iter()
                .any(|blocking| blocking == modal)
        })
    }
}

/// Result of a single dispatch call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Input was ignored because of the current state.
    Suspended,
    /// No command matched.
    Unmatched,
    /// A command ran. `prevent_default` tells the host to suppress its own
    /// handling of the input.
    Executed {
        command_id: String,
        prevent_default: bool,
    },
}

impl DispatchOutcome {
    pub fn command_id(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Executed { command_id, .. } => Some(command_id),
            _ => None,
        }
    }

    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            DispatchOutcome::Executed {
                prevent_default: true,
                ..
            }
        )
    }
}

/// Routes input events to commands in a registry.
pub struct Dispatcher<'a, S: StateProvider + ?Sized> {
    registry: &'a ShortcutRegistry,
    state: &'a S,
    policy: SuspensionPolicy,
}

impl<'a, S: StateProvider + ?Sized> Dispatcher<'a, S> {
    pub fn new(registry: &'a ShortcutRegistry, state: &'a S) -> Self {
        Self {
            registry,
            state,
            policy: SuspensionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SuspensionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &'a ShortcutRegistry {
        self.registry
    }

    /// Run the command bound to a completed gesture.
    pub fn dispatch_gesture(&self, sequence: &GestureSequence) -> anyhow::Result<DispatchOutcome> {
        let state = self.state.snapshot();
        if self.policy.suspends_gestures(&state) {
            logging::log_suspended("gesture", state.show_modal.as_deref(), state.drag_in_progress);
            return Ok(DispatchOutcome::Suspended);
        }

        let Some(command) = self.registry.match_gesture(sequence) else {
            logging::log_gesture_dispatch(&sequence.to_string(), None);
            return Ok(DispatchOutcome::Unmatched);
        };

        logging::log_gesture_dispatch(&sequence.to_string(), Some(&command.id));
        command.execute(InputEvent::Gesture(sequence), InvocationContext::gesture())?;

        Ok(DispatchOutcome::Executed {
            command_id: command.id.clone(),
            prevent_default: false,
        })
    }

    /// Run the command bound to a key press.
    ///
    /// The host's default handling is suppressed for every executed command
    /// unless its action returned `ActionOutcome::allowing_default()`.
    pub fn dispatch_keyboard(&self, event: &KeyEvent) -> anyhow::Result<DispatchOutcome> {
        let state = self.state.snapshot();
        if self.policy.suspends_keyboard(&state) {
            logging::log_suspended("keyboard", state.show_modal.as_deref(), state.drag_in_progress);
            return Ok(DispatchOutcome::Suspended);
        }

        let modifiers = event.modifier_summary();
        let Some(command) = self.registry.match_keyboard(event) else {
            logging::log_key_dispatch(&event.key, &modifiers, None);
            return Ok(DispatchOutcome::Unmatched);
        };

        logging::log_key_dispatch(&event.key, &modifiers, Some(&command.id));
        let outcome = command.execute(InputEvent::Key(event), InvocationContext::keyboard())?;

        Ok(DispatchOutcome::Executed {
            command_id: command.id.clone(),
            prevent_default: !outcome.allow_default,
        })
    }
}
