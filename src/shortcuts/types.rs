//! Core shortcut types with proper error handling and platform identity.
//!
//! This module provides:
//! - `KeyboardPattern` - the key plus the modifiers a command requires
//! - `KeyEvent` - a raw key press as delivered by the input source
//! - `Direction`, `GestureSequence`, `GesturePattern` - traced gestures
//! - `Platform` - which modifier labelling family applies
//! - `InputEvent`, `InvocationContext`, `ActionOutcome` - what actions receive and return

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a keyboard pattern string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("shortcut string is empty")]
    Empty,
    #[error("shortcut has no key, only modifiers")]
    MissingKey,
    #[error("unknown token '{0}' in shortcut")]
    UnknownToken(String),
}

/// Errors that can occur when parsing a gesture sequence such as `"rlru"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GestureParseError {
    #[error("gesture sequence is empty")]
    Empty,
    #[error("unknown direction '{found}' in gesture '{input}'")]
    UnknownDirection { input: String, found: char },
}

/// Platform enum for label formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        {
            Platform::MacOS
        }
        #[cfg(target_os = "windows")]
        {
            Platform::Windows
        }
        #[cfg(target_os = "linux")]
        {
            Platform::Linux
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            Platform::Linux
        }
    }

    /// Whether the meta modifier is labelled "Command" rather than "Ctrl".
    pub fn uses_apple_labels(self) -> bool {
        matches!(self, Platform::MacOS)
    }
}

/// The key and modifiers a command requires.
///
/// Only `meta`, `alt` and `shift` take part in matching. `control` and
/// `option` are rendered by the label formatter but never checked against
/// events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyboardPattern {
    pub key: String,
    /// Platform accelerator: Command on macOS, Ctrl elsewhere.
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub control: bool,
    #[serde(default)]
    pub option: bool,
}

impl KeyboardPattern {
    /// A pattern for `key` with no modifiers required.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_control(mut self) -> Self {
        self.control = true;
        self
    }

    pub fn with_option(mut self) -> Self {
        self.option = true;
        self
    }

    /// Parse a pattern such as `"cmd+shift+k"`, `"alt ArrowUp"` or `"b"`.
    ///
    /// Modifier tokens are case-insensitive. The key keeps its case so it can
    /// be compared with event key values directly; a few common aliases
    /// (`up`, `esc`, `return`, ...) are mapped to their key value names.
    pub fn parse(s: &str) -> Result<Self, ShortcutParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShortcutParseError::Empty);
        }

        let normalized = s.replace('+', " ");
        let parts: Vec<&str> = normalized.split_whitespace().collect();
        if parts.is_empty() {
            return Err(ShortcutParseError::Empty);
        }

        let mut pattern = KeyboardPattern::default();
        let mut key_part: Option<&str> = None;

        for part in &parts {
            match part.to_lowercase().as_str() {
                "cmd" | "command" | "meta" | "mod" | "⌘" => pattern.meta = true,
                "ctrl" | "control" | "^" => pattern.control = true,
                "alt" => pattern.alt = true,
                "opt" | "option" | "⌥" => pattern.option = true,
                "shift" | "⇧" => pattern.shift = true,
                _ => {
                    if key_part.is_some() {
                        return Err(ShortcutParseError::UnknownToken(part.to_string()));
                    }
                    key_part = Some(part);
                }
            }
        }

        let key = key_part.ok_or(ShortcutParseError::MissingKey)?;
        pattern.key = canonicalize_key(key);
        Ok(pattern)
    }

    /// The (meta, alt, shift) requirements, compared lexicographically to
    /// rank patterns by specificity.
    pub fn specificity(&self) -> (bool, bool, bool) {
        (self.meta, self.alt, self.shift)
    }

    /// Whether `event` satisfies this pattern.
    ///
    /// Required modifiers must be held; modifiers the pattern does not
    /// require are ignored. Ctrl counts as meta so one binding serves every
    /// platform.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.key
            && (!self.meta || event.meta || event.ctrl)
            && (!self.alt || event.alt)
            && (!self.shift || event.shift)
    }

    /// Whether every event matched by `other` is also matched by `self`.
    pub fn subsumes(&self, other: &KeyboardPattern) -> bool {
        self.key == other.key
            && (!self.meta || other.meta)
            && (!self.alt || other.alt)
            && (!self.shift || other.shift)
    }

    pub fn display(&self) -> String {
        self.display_for_platform(Platform::current())
    }

    pub fn display_for_platform(&self, platform: Platform) -> String {
        super::format::format_keyboard_pattern(self, platform)
    }

    /// Stable machine-readable form, e.g. `"cmd+alt+shift+k"`.
    pub fn to_canonical_string(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.meta {
            parts.push("cmd");
        }
        if self.control {
            parts.push("ctrl");
        }
        if self.option {
            parts.push("opt");
        }
        if self.alt {
            parts.push("alt");
        }
        if self.shift {
            parts.push("shift");
        }
        parts.push(&self.key);
        parts.join("+")
    }
}

impl From<&str> for KeyboardPattern {
    /// Single-key shorthand: the string is the key, no modifiers.
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl FromStr for KeyboardPattern {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyboardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Map common key aliases to key value names; anything else is kept verbatim.
pub fn canonicalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        return key.to_string();
    }
    match key.to_lowercase().as_str() {
        "up" | "arrowup" | "uparrow" => "ArrowUp",
        "down" | "arrowdown" | "downarrow" => "ArrowDown",
        "left" | "arrowleft" | "leftarrow" => "ArrowLeft",
        "right" | "arrowright" | "rightarrow" => "ArrowRight",
        "enter" | "return" => "Enter",
        "esc" | "escape" => "Escape",
        "tab" => "Tab",
        "backspace" | "back" => "Backspace",
        "delete" | "del" => "Delete",
        "space" => " ",
        _ => return key.to_string(),
    }
    .to_string()
}

/// A raw key press.
///
/// `key` is the key value (`"b"`, `"B"`, `"ArrowUp"`, `"Enter"`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Held modifiers as a compact string for logs, e.g. `"meta+shift"`.
    pub fn modifier_summary(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.meta {
            parts.push("meta");
        }
        if self.ctrl {
            parts.push("ctrl");
        }
        if self.alt {
            parts.push("alt");
        }
        if self.shift {
            parts.push("shift");
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join("+")
        }
    }
}

/// One stroke of a traced gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
        }
    }
}

/// A completed gesture, written as direction letters (`"rlru"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GestureSequence(Vec<Direction>);

impl GestureSequence {
    pub fn new(directions: Vec<Direction>) -> Result<Self, GestureParseError> {
        if directions.is_empty() {
            return Err(GestureParseError::Empty);
        }
        Ok(Self(directions))
    }

    pub fn parse(s: &str) -> Result<Self, GestureParseError> {
        let directions = s
            .trim()
            .chars()
            .map(|c| {
                Direction::from_char(c).ok_or_else(|| GestureParseError::UnknownDirection {
                    input: s.to_string(),
                    found: c,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(directions)
    }

    pub fn directions(&self) -> &[Direction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for GestureSequence {
    type Err = GestureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GestureSequence {
    type Error = GestureParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<GestureSequence> for String {
    fn from(sequence: GestureSequence) -> Self {
        sequence.to_string()
    }
}

impl fmt::Display for GestureSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for direction in &self.0 {
            write!(f, "{}", direction.as_char())?;
        }
        Ok(())
    }
}

/// Every sequence that triggers a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GesturePattern(Vec<GestureSequence>);

impl GesturePattern {
    pub fn new(sequences: Vec<GestureSequence>) -> Self {
        Self(sequences)
    }

    /// Parse one or more sequences, e.g. `GesturePattern::parse(&["rd", "rdr"])`.
    pub fn parse(sequences: &[&str]) -> Result<Self, GestureParseError> {
        sequences
            .iter()
            .map(|s| GestureSequence::parse(s))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn sequences(&self) -> &[GestureSequence] {
        &self.0
    }

    pub fn contains(&self, sequence: &GestureSequence) -> bool {
        self.0.iter().any(|s| s == sequence)
    }
}

impl From<GestureSequence> for GesturePattern {
    fn from(sequence: GestureSequence) -> Self {
        Self(vec![sequence])
    }
}

impl From<Vec<GestureSequence>> for GesturePattern {
    fn from(sequences: Vec<GestureSequence>) -> Self {
        Self(sequences)
    }
}

/// How a command was triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvocationKind {
    Keyboard,
    Gesture,
}

/// Metadata passed to an action alongside the originating event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvocationContext {
    pub kind: InvocationKind,
}

impl InvocationContext {
    pub fn keyboard() -> Self {
        Self {
            kind: InvocationKind::Keyboard,
        }
    }

    pub fn gesture() -> Self {
        Self {
            kind: InvocationKind::Gesture,
        }
    }
}

/// The event an action was invoked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent<'a> {
    Key(&'a KeyEvent),
    Gesture(&'a GestureSequence),
}

impl<'a> InputEvent<'a> {
    pub fn as_key(&self) -> Option<&'a KeyEvent> {
        match *self {
            InputEvent::Key(event) => Some(event),
            InputEvent::Gesture(_) => None,
        }
    }

    pub fn as_gesture(&self) -> Option<&'a GestureSequence> {
        match *self {
            InputEvent::Gesture(sequence) => Some(sequence),
            InputEvent::Key(_) => None,
        }
    }
}

/// What an action reports back to the dispatcher.
///
/// Keyboard dispatch suppresses the host's default handling of the key
/// unless the action returns [`ActionOutcome::allowing_default`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    pub allow_default: bool,
}

impl ActionOutcome {
    pub fn handled() -> Self {
        Self::default()
    }

    pub fn allowing_default() -> Self {
        Self {
            allow_default: true,
        }
    }
}
