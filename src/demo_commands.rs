//! Built-in command table for the stdin driver.
//!
//! Actions only log what they would do; the driver has no document to edit.

use shortcut_engine::error::ResultExt;
use shortcut_engine::shortcuts::{
    ActionOutcome, CommandDescriptor, GesturePattern, InputEvent, InvocationContext,
    KeyboardPattern,
};
use tracing::info;

fn log_action(
    id: &'static str,
) -> impl Fn(InputEvent<'_>, InvocationContext) -> anyhow::Result<ActionOutcome> + Send + Sync {
    move |event, context| {
        info!(
            event_type = "command_executed",
            command_id = id,
            invocation = ?context.kind,
            input = ?event,
            "Running {}", id
        );
        Ok(ActionOutcome::handled())
    }
}

fn gestures(sequences: &[&str]) -> anyhow::Result<GesturePattern> {
    Ok(GesturePattern::parse(sequences)?)
}

fn keys(pattern: &str) -> anyhow::Result<KeyboardPattern> {
    Ok(KeyboardPattern::parse(pattern)?)
}

fn build() -> anyhow::Result<Vec<CommandDescriptor>> {
    let delete = CommandDescriptor::new("deleteThought", log_action("deleteThought"))
        .with_name("Delete Thought")
        .with_description("Delete the current thought and its children.")
        .with_keyboard(keys("cmd+shift+Backspace")?)
        .with_gesture(gestures(&["ldl"])?);
    let delete_alias = delete.alias("deleteThoughtAlias", gestures(&["ldlr", "ldldl"])?);

    let new_subthought = CommandDescriptor::new("newSubthought", log_action("newSubthought"))
        .with_name("New Subthought")
        .with_description("Create a new thought inside the current one.")
        .with_keyboard(keys("cmd+Enter")?)
        .with_gesture(gestures(&["rdr"])?);
    let new_subthought_alias = new_subthought.alias("newSubthoughtAlias", gestures(&["rdrd"])?);

    Ok(vec![
        CommandDescriptor::new("newThought", log_action("newThought"))
            .with_name("New Thought")
            .with_description("Create a new thought after the current one.")
            .with_keyboard("Enter")
            .with_gesture(gestures(&["rd"])?),
        CommandDescriptor::new("newThoughtAbove", log_action("newThoughtAbove"))
            .with_name("New Thought Above")
            .with_keyboard(keys("shift+Enter")?),
        new_subthought,
        new_subthought_alias,
        CommandDescriptor::new("indent", log_action("indent"))
            .with_name("Indent")
            .with_keyboard("Tab")
            .with_gesture(gestures(&["lrl"])?),
        CommandDescriptor::new("outdent", log_action("outdent"))
            .with_name("De-indent")
            .with_keyboard(keys("shift+Tab")?)
            .with_gesture(gestures(&["rlr"])?),
        CommandDescriptor::new("cursorUp", |_, _| Ok(ActionOutcome::allowing_default()))
            .with_name("Cursor Up")
            .with_description("Move the cursor up, letting the editor move the caret.")
            .with_keyboard("ArrowUp"),
        CommandDescriptor::new("cursorDown", |_, _| Ok(ActionOutcome::allowing_default()))
            .with_name("Cursor Down")
            .with_description("Move the cursor down, letting the editor move the caret.")
            .with_keyboard("ArrowDown"),
        CommandDescriptor::new("moveThoughtUp", log_action("moveThoughtUp"))
            .with_name("Move Thought Up")
            .with_keyboard(keys("cmd+ArrowUp")?),
        CommandDescriptor::new("moveThoughtDown", log_action("moveThoughtDown"))
            .with_name("Move Thought Down")
            .with_keyboard(keys("cmd+ArrowDown")?),
        CommandDescriptor::new("bold", log_action("bold"))
            .with_name("Bold")
            .with_keyboard(keys("cmd+b")?),
        CommandDescriptor::new("toggleCodeView", log_action("toggleCodeView"))
            .with_name("Toggle Code View")
            .with_keyboard(keys("cmd+alt+/")?),
        delete,
        delete_alias,
        CommandDescriptor::new("search", log_action("search"))
            .with_name("Search")
            .with_keyboard(keys("cmd+shift+f")?)
            .with_gesture(gestures(&["rlru"])?),
        CommandDescriptor::new("home", log_action("home"))
            .with_name("Home")
            .with_keyboard(keys("cmd+alt+h")?)
            .with_gesture(gestures(&["ldr"])?),
        CommandDescriptor::new("openShortcutPopup", log_action("openShortcutPopup"))
            .with_name("Open Shortcut Popup")
            .with_keyboard(keys("cmd+shift+/")?)
            .with_gesture(gestures(&["rdld"])?),
    ])
}

/// Commands registered by the stdin driver.
///
/// A malformed entry is logged and yields an empty registry.
pub fn commands() -> Vec<CommandDescriptor> {
    build().log_err().unwrap_or_default()
}
