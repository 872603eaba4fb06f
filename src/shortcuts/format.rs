//! Human-readable labels for help listings and menus.

use super::types::{GestureSequence, KeyboardPattern, Platform};

const SEPARATOR: &str = " + ";

/// Render a keyboard pattern, e.g. `"Ctrl + Shift + K"` or `"Command + ↑"`.
pub fn format_keyboard_pattern(pattern: &KeyboardPattern, platform: Platform) -> String {
    let apple = platform.uses_apple_labels();
    let mut label = String::new();

    if pattern.meta {
        label.push_str(if apple { "Command" } else { "Ctrl" });
        label.push_str(SEPARATOR);
    }
    if pattern.control {
        label.push_str("Control");
        label.push_str(SEPARATOR);
    }
    if pattern.option {
        label.push_str("Option");
        label.push_str(SEPARATOR);
    }
    // Apple keyboards label alt as Option; don't print it twice.
    if pattern.alt && !(apple && pattern.option) {
        label.push_str(if apple { "Option" } else { "Alt" });
        label.push_str(SEPARATOR);
    }
    if pattern.shift {
        label.push_str("Shift");
        label.push_str(SEPARATOR);
    }

    let key = if pattern.shift && pattern.key.chars().count() == 1 {
        pattern.key.to_uppercase()
    } else {
        pattern.key.clone()
    };
    label.push_str(arrow_text_to_glyph(&key));
    label
}

/// Render a gesture as arrows, e.g. `"rlru"` becomes `"→←→↑"`.
pub fn format_gesture_sequence(sequence: &GestureSequence) -> String {
    sequence.directions().iter().map(|d| d.arrow()).collect()
}

/// Arrow key values become arrow glyphs; any other key is returned unchanged.
fn arrow_text_to_glyph(key: &str) -> &str {
    match key {
        "ArrowLeft" => "←",
        "ArrowRight" => "→",
        "ArrowUp" => "↑",
        "ArrowDown" => "↓",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_arrow_on_linux() {
        let pattern = KeyboardPattern::new("ArrowUp").with_meta();
        assert_eq!(
            format_keyboard_pattern(&pattern, Platform::Linux),
            "Ctrl + ↑"
        );
    }

    #[test]
    fn test_meta_arrow_on_macos() {
        let pattern = KeyboardPattern::new("ArrowUp").with_meta();
        assert_eq!(
            format_keyboard_pattern(&pattern, Platform::MacOS),
            "Command + ↑"
        );
    }

    #[test]
    fn test_plain_key_is_unchanged() {
        let pattern = KeyboardPattern::new("Enter");
        assert_eq!(format_keyboard_pattern(&pattern, Platform::Windows), "Enter");
    }

    #[test]
    fn test_shift_uppercases_single_character() {
        let pattern = KeyboardPattern::new("k").with_meta().with_shift();
        assert_eq!(
            format_keyboard_pattern(&pattern, Platform::Linux),
            "Ctrl + Shift + K"
        );
    }

    #[test]
    fn test_shift_keeps_named_key_case() {
        let pattern = KeyboardPattern::new("Tab").with_shift();
        assert_eq!(format_keyboard_pattern(&pattern, Platform::Linux), "Shift + Tab");
    }

    #[test]
    fn test_modifier_order() {
        let pattern = KeyboardPattern::new("x")
            .with_meta()
            .with_control()
            .with_option()
            .with_shift();
        assert_eq!(
            format_keyboard_pattern(&pattern, Platform::MacOS),
            "Command + Control + Option + Shift + X"
        );
    }

    #[test]
    fn test_alt_label_depends_on_platform() {
        let pattern = KeyboardPattern::new("ArrowDown").with_alt();
        assert_eq!(format_keyboard_pattern(&pattern, Platform::Linux), "Alt + ↓");
        assert_eq!(format_keyboard_pattern(&pattern, Platform::MacOS), "Option + ↓");
    }

    #[test]
    fn test_alt_and_option_not_doubled_on_macos() {
        let pattern = KeyboardPattern::new("a").with_alt().with_option();
        assert_eq!(format_keyboard_pattern(&pattern, Platform::MacOS), "Option + a");
        assert_eq!(
            format_keyboard_pattern(&pattern, Platform::Linux),
            "Option + Alt + a"
        );
    }

    #[test]
    fn test_gesture_arrows() {
        let sequence: GestureSequence = "rlru".parse().unwrap();
        assert_eq!(format_gesture_sequence(&sequence), "→←→↑");
    }
}
