//! Deterministic command registry with Vec storage.
//!
//! Descriptors are sorted once, when the registry is built, so that patterns
//! requiring more modifiers are probed before less specific ones. Lookups are
//! a first-match linear scan over that order. Registries hold tens of
//! entries, so no index is kept.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use super::types::{
    ActionOutcome, GesturePattern, GestureSequence, InputEvent, InvocationContext, KeyEvent,
    KeyboardPattern,
};

/// Callable run when a command is triggered.
pub type ShortcutAction = Arc<
    dyn Fn(InputEvent<'_>, InvocationContext) -> anyhow::Result<ActionOutcome> + Send + Sync,
>;

/// A command together with the input patterns that trigger it.
#[derive(Clone)]
pub struct CommandDescriptor {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub keyboard: Option<KeyboardPattern>,
    pub gesture: Option<GesturePattern>,
    action: ShortcutAction,
}

impl CommandDescriptor {
    pub fn new<F>(id: impl Into<String>, action: F) -> Self
    where
        F: Fn(InputEvent<'_>, InvocationContext) -> anyhow::Result<ActionOutcome>
            + Send
            + Sync
            + 'static,
    {
        Self {
            id: id.into(),
            name: None,
            description: None,
            keyboard: None,
            gesture: None,
            action: Arc::new(action),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keyboard(mut self, pattern: impl Into<KeyboardPattern>) -> Self {
        self.keyboard = Some(pattern.into());
        self
    }

    pub fn with_gesture(mut self, pattern: impl Into<GesturePattern>) -> Self {
        self.gesture = Some(pattern.into());
        self
    }

    /// A separate gesture-only descriptor that runs the same action.
    ///
    /// Used to give one logical command extra gesture sequences that are
    /// probed independently of the original.
    pub fn alias(&self, id: impl Into<String>, gesture: impl Into<GesturePattern>) -> Self {
        Self {
            id: id.into(),
            name: self.name.clone(),
            description: self.description.clone(),
            keyboard: None,
            gesture: Some(gesture.into()),
            action: Arc::clone(&self.action),
        }
    }

    pub fn execute(
        &self,
        event: InputEvent<'_>,
        context: InvocationContext,
    ) -> anyhow::Result<ActionOutcome> {
        (self.action)(event, context)
    }

    pub fn matches_key(&self, event: &KeyEvent) -> bool {
        self.keyboard
            .as_ref()
            .is_some_and(|pattern| pattern.matches(event))
    }

    pub fn matches_gesture(&self, sequence: &GestureSequence) -> bool {
        self.gesture
            .as_ref()
            .is_some_and(|pattern| pattern.contains(sequence))
    }

    /// Modifier specificity; a missing keyboard pattern requires nothing.
    fn specificity(&self) -> (bool, bool, bool) {
        self.keyboard
            .as_ref()
            .map(KeyboardPattern::specificity)
            .unwrap_or_default()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("keyboard", &self.keyboard)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}

/// Ordering used to sort the registry.
///
/// The first asymmetry in (meta, alt, shift) decides: the side requiring the
/// modifier comes first. Everything else compares equal, and the stable sort
/// keeps registration order for it.
pub fn compare_priority(a: &CommandDescriptor, b: &CommandDescriptor) -> Ordering {
    b.specificity().cmp(&a.specificity())
}

/// Central registry of all shortcut commands, in probe order.
pub struct ShortcutRegistry {
    commands: Vec<CommandDescriptor>,
}

impl ShortcutRegistry {
    pub fn new(mut commands: Vec<CommandDescriptor>) -> Self {
        let mut seen = HashSet::new();
        for command in &commands {
            if !seen.insert(command.id.as_str()) {
                warn!(command_id = %command.id, "Duplicate command id in shortcut registry");
            }
        }

        commands.sort_by(compare_priority);
        debug!(count = commands.len(), "Shortcut registry sorted");
        Self { commands }
    }

    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|command| command.id == id)
    }

    /// First command whose keyboard pattern `event` satisfies.
    pub fn match_keyboard(&self, event: &KeyEvent) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|command| command.matches_key(event))
    }

    /// First command whose gesture pattern contains `sequence`.
    pub fn match_gesture(&self, sequence: &GestureSequence) -> Option<&CommandDescriptor> {
        self.commands
            .iter()
            .find(|command| command.matches_gesture(sequence))
    }

    /// Find every command that can never be matched.
    ///
    /// A keyboard binding is unreachable when an earlier command has the same
    /// key and requires a subset of its modifiers. A gesture sequence is
    /// unreachable when an earlier command already holds it. Each loser is
    /// reported against the first command that shadows it.
    pub fn find_conflicts(&self) -> Vec<ShortcutConflict> {
        let mut conflicts = Vec::new();

        for (index, command) in self.commands.iter().enumerate() {
            let earlier = &self.commands[..index];

            if let Some(pattern) = &command.keyboard {
                let winner = earlier.iter().find(|other| {
                    other
                        .keyboard
                        .as_ref()
                        .is_some_and(|existing| existing.subsumes(pattern))
                });
                if let Some(winner) = winner {
                    conflicts.push(ShortcutConflict {
                        kind: ConflictKind::Keyboard,
                        winner_id: winner.id.clone(),
                        loser_id: command.id.clone(),
                        pattern: pattern.to_canonical_string(),
                    });
                }
            }

            if let Some(gesture) = &command.gesture {
                for sequence in gesture.sequences() {
                    if let Some(winner) = earlier.iter().find(|other| other.matches_gesture(sequence))
                    {
                        conflicts.push(ShortcutConflict {
                            kind: ConflictKind::Gesture,
                            winner_id: winner.id.clone(),
                            loser_id: command.id.clone(),
                            pattern: sequence.to_string(),
                        });
                    }
                }
            }
        }

        conflicts
    }
}

impl fmt::Debug for ShortcutRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.commands.iter()).finish()
    }
}

/// Which input kind a conflict concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictKind {
    Keyboard,
    Gesture,
}

/// A command shadowed by an earlier one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutConflict {
    pub kind: ConflictKind,
    pub winner_id: String,
    pub loser_id: String,
    pub pattern: String,
}

/// A process-wide registry built on first use.
///
/// Construction is deferred until the first call to [`LazyRegistry::get`],
/// so command modules can still be wiring up their own lookups when the
/// `static` is declared. Every later call returns the same registry.
///
/// ```ignore
/// static SHORTCUTS: LazyRegistry = LazyRegistry::new(commands::all);
///
/// let command = SHORTCUTS.get().match_keyboard(&event);
/// ```
pub struct LazyRegistry {
    cell: OnceLock<ShortcutRegistry>,
    build: fn() -> Vec<CommandDescriptor>,
}

impl LazyRegistry {
    pub const fn new(build: fn() -> Vec<CommandDescriptor>) -> Self {
        Self {
            cell: OnceLock::new(),
            build,
        }
    }

    pub fn get(&self) -> &ShortcutRegistry {
        self.cell.get_or_init(|| {
            let registry = ShortcutRegistry::new((self.build)());
            info!(
                event_type = "registry_built",
                count = registry.len(),
                "Shortcut registry initialized"
            );
            registry
        })
    }

    pub fn commands(&self) -> &[CommandDescriptor] {
        self.get().commands()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
