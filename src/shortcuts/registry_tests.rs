use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

fn noop(id: &str) -> CommandDescriptor {
    CommandDescriptor::new(id, |_, _| Ok(ActionOutcome::handled()))
}

fn keyed(id: &str, pattern: KeyboardPattern) -> CommandDescriptor {
    noop(id).with_keyboard(pattern)
}

fn gestured(id: &str, sequences: &[&str]) -> CommandDescriptor {
    noop(id).with_gesture(GesturePattern::parse(sequences).unwrap())
}

fn ids(registry: &ShortcutRegistry) -> Vec<&str> {
    registry.commands().iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn test_meta_sorts_before_plain_with_same_key() {
    let registry = ShortcutRegistry::new(vec![
        keyed("outline", KeyboardPattern::new("b")),
        keyed("bold", KeyboardPattern::new("b").with_meta()),
    ]);
    assert_eq!(ids(&registry), vec!["bold", "outline"]);
}

#[test]
fn test_sort_priority_meta_then_alt_then_shift() {
    let registry = ShortcutRegistry::new(vec![
        keyed("plain", KeyboardPattern::new("x")),
        keyed("shift", KeyboardPattern::new("x").with_shift()),
        keyed("alt", KeyboardPattern::new("x").with_alt()),
        keyed("alt-shift", KeyboardPattern::new("x").with_alt().with_shift()),
        keyed("meta", KeyboardPattern::new("x").with_meta()),
    ]);
    assert_eq!(
        ids(&registry),
        vec!["meta", "alt-shift", "alt", "shift", "plain"]
    );
}

#[test]
fn test_sort_is_stable_for_equal_specificity() {
    let registry = ShortcutRegistry::new(vec![
        keyed("first", KeyboardPattern::new("a").with_meta()),
        keyed("second", KeyboardPattern::new("z").with_meta()),
        keyed("third", KeyboardPattern::new("m").with_meta()),
    ]);
    assert_eq!(ids(&registry), vec!["first", "second", "third"]);
}

#[test]
fn test_commands_without_keyboard_keep_registration_order() {
    let registry = ShortcutRegistry::new(vec![
        gestured("g1", &["r"]),
        keyed("plain", KeyboardPattern::new("Enter")),
        gestured("g2", &["l"]),
        keyed("meta", KeyboardPattern::new("Enter").with_meta()),
        gestured("g3", &["u"]),
    ]);
    assert_eq!(ids(&registry), vec!["meta", "g1", "plain", "g2", "g3"]);
}

#[test]
fn test_compare_priority() {
    let meta = keyed("meta", KeyboardPattern::new("s").with_meta());
    let plain = keyed("plain", KeyboardPattern::new("s"));
    let gesture = gestured("gesture", &["r"]);

    assert_eq!(compare_priority(&meta, &plain), std::cmp::Ordering::Less);
    assert_eq!(compare_priority(&plain, &meta), std::cmp::Ordering::Greater);
    assert_eq!(compare_priority(&plain, &gesture), std::cmp::Ordering::Equal);
}

#[test]
fn test_match_keyboard_first_match_wins() {
    let registry = ShortcutRegistry::new(vec![
        keyed("outline", KeyboardPattern::new("b")),
        keyed("bold", KeyboardPattern::new("b").with_meta()),
    ]);

    let meta_b = KeyEvent::new("b").with_meta();
    assert_eq!(registry.match_keyboard(&meta_b).unwrap().id, "bold");
    assert_eq!(
        registry.match_keyboard(&KeyEvent::new("b")).unwrap().id,
        "outline"
    );
}

#[test]
fn test_match_keyboard_ctrl_counts_as_meta() {
    let registry = ShortcutRegistry::new(vec![
        keyed("outline", KeyboardPattern::new("b")),
        keyed("bold", KeyboardPattern::new("b").with_meta()),
    ]);
    let ctrl_b = KeyEvent::new("b").with_ctrl();
    assert_eq!(registry.match_keyboard(&ctrl_b).unwrap().id, "bold");
}

#[test]
fn test_match_keyboard_overlapping_patterns_resolve_to_higher_priority() {
    // alt+shift+Tab satisfies both patterns; the alt one is probed first.
    let registry = ShortcutRegistry::new(vec![
        keyed("outdent", KeyboardPattern::new("Tab").with_shift()),
        keyed("move-up", KeyboardPattern::new("Tab").with_alt()),
    ]);
    let event = KeyEvent::new("Tab").with_alt().with_shift();
    assert_eq!(registry.match_keyboard(&event).unwrap().id, "move-up");
}

#[test]
fn test_match_keyboard_equal_specificity_depends_on_registration_order() {
    // Both patterns match meta+shift+alt+k equally; registration order decides.
    let forward = ShortcutRegistry::new(vec![
        keyed("meta-shift", KeyboardPattern::new("k").with_meta().with_shift()),
        keyed("meta-shift-again", KeyboardPattern::new("k").with_meta().with_shift()),
    ]);
    let reversed = ShortcutRegistry::new(vec![
        keyed("meta-shift-again", KeyboardPattern::new("k").with_meta().with_shift()),
        keyed("meta-shift", KeyboardPattern::new("k").with_meta().with_shift()),
    ]);
    let event = KeyEvent::new("k").with_meta().with_shift();
    assert_eq!(forward.match_keyboard(&event).unwrap().id, "meta-shift");
    assert_eq!(reversed.match_keyboard(&event).unwrap().id, "meta-shift-again");
}

#[test]
fn test_match_keyboard_is_deterministic() {
    let registry = ShortcutRegistry::new(vec![
        keyed("a", KeyboardPattern::new("ArrowUp")),
        keyed("b", KeyboardPattern::new("ArrowUp").with_alt()),
        keyed("c", KeyboardPattern::new("ArrowUp").with_meta()),
    ]);
    let event = KeyEvent::new("ArrowUp").with_alt();
    let first = registry.match_keyboard(&event).map(|c| c.id.clone());
    for _ in 0..10 {
        assert_eq!(registry.match_keyboard(&event).map(|c| c.id.clone()), first);
    }
    assert_eq!(first.as_deref(), Some("b"));
}

#[test]
fn test_match_keyboard_no_match() {
    let registry = ShortcutRegistry::new(vec![
        keyed("bold", KeyboardPattern::new("b").with_meta()),
        gestured("search", &["rlru"]),
    ]);
    assert!(registry.match_keyboard(&KeyEvent::new("b")).is_none());
    assert!(registry.match_keyboard(&KeyEvent::new("q").with_meta()).is_none());
}

#[test]
fn test_match_gesture() {
    let registry = ShortcutRegistry::new(vec![
        keyed("bold", KeyboardPattern::new("b").with_meta()),
        gestured("new-thought", &["rd", "rdr"]),
        gestured("search", &["rlru"]),
    ]);

    let rlru = GestureSequence::parse("rlru").unwrap();
    assert_eq!(registry.match_gesture(&rlru).unwrap().id, "search");

    let rdr = GestureSequence::parse("rdr").unwrap();
    assert_eq!(registry.match_gesture(&rdr).unwrap().id, "new-thought");

    let prefix = GestureSequence::parse("rl").unwrap();
    assert!(registry.match_gesture(&prefix).is_none());
}

#[test]
fn test_gesture_alias_shares_action() {
    let calls = std::sync::Arc::new(AtomicUsize::new(0));
    let counter = std::sync::Arc::clone(&calls);
    let delete = CommandDescriptor::new("delete", move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(ActionOutcome::handled())
    })
    .with_name("Delete")
    .with_keyboard(KeyboardPattern::new("Backspace").with_meta().with_shift())
    .with_gesture(GesturePattern::parse(&["ldl"]).unwrap());
    let alias = delete.alias("delete-alias", GesturePattern::parse(&["ldlr"]).unwrap());

    assert_eq!(alias.name.as_deref(), Some("Delete"));
    assert!(alias.keyboard.is_none());

    let registry = ShortcutRegistry::new(vec![delete, alias]);
    let sequence = GestureSequence::parse("ldlr").unwrap();
    let command = registry.match_gesture(&sequence).unwrap();
    assert_eq!(command.id, "delete-alias");

    command
        .execute(InputEvent::Gesture(&sequence), InvocationContext::gesture())
        .unwrap();
    registry
        .by_id("delete")
        .unwrap()
        .execute(InputEvent::Gesture(&sequence), InvocationContext::gesture())
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_by_id() {
    let registry = ShortcutRegistry::new(vec![
        keyed("bold", KeyboardPattern::new("b").with_meta()),
        gestured("search", &["rlru"]),
    ]);
    assert_eq!(registry.by_id("search").unwrap().id, "search");
    assert!(registry.by_id("missing").is_none());
    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());
}

#[test]
fn test_find_conflicts_reports_identical_keyboard_pattern() {
    let registry = ShortcutRegistry::new(vec![
        keyed("first", KeyboardPattern::new("Enter")),
        keyed("second", KeyboardPattern::new("Enter")),
    ]);
    assert_eq!(
        registry.find_conflicts(),
        vec![ShortcutConflict {
            kind: ConflictKind::Keyboard,
            winner_id: "first".to_string(),
            loser_id: "second".to_string(),
            pattern: "Enter".to_string(),
        }]
    );
}

#[test]
fn test_find_conflicts_ignores_reachable_patterns() {
    let registry = ShortcutRegistry::new(vec![
        keyed("outline", KeyboardPattern::new("b")),
        keyed("bold", KeyboardPattern::new("b").with_meta()),
        keyed("outdent", KeyboardPattern::new("Tab").with_shift()),
        keyed("move-up", KeyboardPattern::new("Tab").with_alt()),
        gestured("search", &["rlru"]),
        gestured("new-thought", &["rd"]),
    ]);
    assert!(registry.find_conflicts().is_empty());
}

#[test]
fn test_find_conflicts_reports_duplicate_gesture() {
    let registry = ShortcutRegistry::new(vec![
        gestured("search", &["rlru"]),
        gestured("other", &["u", "rlru"]),
    ]);
    let conflicts = registry.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::Gesture);
    assert_eq!(conflicts[0].winner_id, "search");
    assert_eq!(conflicts[0].loser_id, "other");
    assert_eq!(conflicts[0].pattern, "rlru");
}

static BUILD_COUNT: AtomicUsize = AtomicUsize::new(0);

fn counted_commands() -> Vec<CommandDescriptor> {
    BUILD_COUNT.fetch_add(1, Ordering::SeqCst);
    vec![
        keyed("outline", KeyboardPattern::new("b")),
        keyed("bold", KeyboardPattern::new("b").with_meta()),
    ]
}

static LAZY: LazyRegistry = LazyRegistry::new(counted_commands);

#[test]
fn test_lazy_registry_builds_once() {
    let first = LAZY.get() as *const ShortcutRegistry;
    assert!(LAZY.is_initialized());
    let second = LAZY.get() as *const ShortcutRegistry;

    assert_eq!(first, second);
    assert_eq!(LAZY.commands()[0].id, "bold");
    assert_eq!(BUILD_COUNT.load(Ordering::SeqCst), 1);
}

#[test]
fn test_lazy_registry_defers_build() {
    fn empty() -> Vec<CommandDescriptor> {
        Vec::new()
    }
    let lazy = LazyRegistry::new(empty);
    assert!(!lazy.is_initialized());
    assert!(lazy.get().is_empty());
    assert!(lazy.is_initialized());
}
