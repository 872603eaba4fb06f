//! Driving the engine via stdin.
//!
//! Commands are sent as JSON objects, one per line (JSONL format):
//!
//! ```json
//! {"type": "key", "key": "b", "modifiers": ["cmd"]}
//! {"type": "gesture", "sequence": "rlru"}
//! {"type": "setModal", "modal": "shortcuts"}
//! {"type": "clearModal"}
//! {"type": "setDrag", "active": true}
//! {"type": "label", "id": "newSubthought"}
//! {"type": "list"}
//! ```
//!
//! Every command produces exactly one JSON line on stdout.

use std::cell::RefCell;

use serde_json::{json, Value};
use shortcut_engine::shortcuts::{
    format_gesture_sequence, DispatchOutcome, Dispatcher, GestureSequence, KeyEvent, Platform,
    ShortcutRegistry, StateProvider, StateSnapshot,
};

/// Commands accepted on stdin.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StdinCommand {
    /// Dispatch a key press.
    /// modifiers: any of "cmd"/"meta", "ctrl", "alt", "shift"
    Key {
        key: String,
        #[serde(default)]
        modifiers: Vec<String>,
    },
    /// Dispatch a completed gesture such as "rlru"
    Gesture { sequence: String },
    /// Pretend a modal with this label is shown
    SetModal { modal: String },
    /// Pretend no modal is shown
    ClearModal,
    /// Pretend a drag is (or is no longer) in progress
    SetDrag { active: bool },
    /// Print the labels of a command
    Label { id: String },
    /// Print every command in probe order
    List,
}

/// Application state as far as the driver simulates it.
#[derive(Debug, Default)]
pub struct SessionState {
    snapshot: RefCell<StateSnapshot>,
}

impl StateProvider for SessionState {
    fn snapshot(&self) -> StateSnapshot {
        self.snapshot.borrow().clone()
    }
}

pub fn key_event(key: &str, modifiers: &[String]) -> KeyEvent {
    let mut event = KeyEvent::new(key);
    for modifier in modifiers {
        match modifier.to_lowercase().as_str() {
            "cmd" | "command" | "meta" => event.meta = true,
            "ctrl" | "control" => event.ctrl = true,
            "alt" | "opt" | "option" => event.alt = true,
            "shift" => event.shift = true,
            other => tracing::warn!(modifier = other, "Ignoring unknown modifier"),
        }
    }
    event
}

fn outcome_json(outcome: &DispatchOutcome) -> Value {
    match outcome {
        DispatchOutcome::Suspended => json!({ "outcome": "suspended" }),
        DispatchOutcome::Unmatched => json!({ "outcome": "unmatched" }),
        DispatchOutcome::Executed {
            command_id,
            prevent_default,
        } => json!({
            "outcome": "executed",
            "commandId": command_id,
            "preventDefault": prevent_default,
        }),
    }
}

fn labels_json(registry: &ShortcutRegistry, id: &str, platform: Platform) -> Value {
    match registry.by_id(id) {
        Some(command) => json!({
            "id": command.id,
            "name": command.name,
            "keyboard": command.keyboard.as_ref().map(|k| k.display_for_platform(platform)),
            "gestures": command.gesture.as_ref().map(|g| {
                g.sequences().iter().map(format_gesture_sequence).collect::<Vec<_>>()
            }),
        }),
        None => json!({ "error": format!("unknown command '{}'", id) }),
    }
}

/// Apply one command and return the line to print.
pub fn handle_command(
    command: StdinCommand,
    dispatcher: &Dispatcher<'_, SessionState>,
    session: &SessionState,
    platform: Platform,
) -> Value {
    match command {
        StdinCommand::Key { key, modifiers } => {
            let event = key_event(&key, &modifiers);
            match dispatcher.dispatch_keyboard(&event) {
                Ok(outcome) => outcome_json(&outcome),
                Err(e) => json!({ "error": format!("{:#}", e) }),
            }
        }
        StdinCommand::Gesture { sequence } => match GestureSequence::parse(&sequence) {
            Ok(sequence) => match dispatcher.dispatch_gesture(&sequence) {
                Ok(outcome) => outcome_json(&outcome),
                Err(e) => json!({ "error": format!("{:#}", e) }),
            },
            Err(e) => json!({ "error": e.to_string() }),
        },
        StdinCommand::SetModal { modal } => {
            session.snapshot.borrow_mut().show_modal = Some(modal);
            json!({ "state": session.snapshot() })
        }
        StdinCommand::ClearModal => {
            session.snapshot.borrow_mut().show_modal = None;
            json!({ "state": session.snapshot() })
        }
        StdinCommand::SetDrag { active } => {
            session.snapshot.borrow_mut().drag_in_progress = active;
            json!({ "state": session.snapshot() })
        }
        StdinCommand::Label { id } => labels_json(dispatcher.registry(), &id, platform),
        StdinCommand::List => {
            let ids: Vec<&str> = dispatcher
                .registry()
                .commands()
                .iter()
                .map(|c| c.id.as_str())
                .collect();
            json!({ "commands": ids })
        }
    }
}
