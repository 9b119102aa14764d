//! Keyboard Actions and Shortcuts
//!
//! Grid actions and their global key bindings.

use gpui::{Action, KeyBinding};
use schemars::JsonSchema;
use serde::Deserialize;

/// Key context of the records grid
pub const GRID_CONTEXT: &str = "RecordsGrid";

/// Application-level actions
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, JsonSchema, Action)]
pub enum MenuAction {
    /// Quit the application
    Quit,
}

/// Records grid actions
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, JsonSchema, Action)]
pub enum GridAction {
    /// Re-fetch the current page, bypassing caches
    Reload,
    NextPage,
    PrevPage,
    /// Open the column settings dialog
    OpenSettings,
    /// Close the column settings dialog
    CloseSettings,
    /// Restore default column widths
    ResetLayout,
}

impl GridAction {
    /// Keystroke bound to this action
    pub fn keystroke(self) -> &'static str {
        match self {
            GridAction::Reload => "secondary-r",
            GridAction::NextPage => "alt-right",
            GridAction::PrevPage => "alt-left",
            GridAction::OpenSettings => "secondary-,",
            GridAction::CloseSettings => "escape",
            GridAction::ResetLayout => "secondary-shift-backspace",
        }
    }

    const ALL: [GridAction; 6] = [
        GridAction::Reload,
        GridAction::NextPage,
        GridAction::PrevPage,
        GridAction::OpenSettings,
        GridAction::CloseSettings,
        GridAction::ResetLayout,
    ];
}

/// Convert a keystroke string to human-readable format
///
/// Platform-specific formatting:
/// - macOS: ⌘ for cmd, ⌥ for alt, ⌃ for ctrl, ⇧ for shift
/// - Others: Ctrl+, Alt+, Shift+
pub fn humanize_keystroke(keystroke: &str) -> String {
    let parts = keystroke.split('-');
    let mut display_text = String::new();

    #[cfg(target_os = "macos")]
    let separator = "";
    #[cfg(not(target_os = "macos"))]
    let separator = "+";

    for (i, part) in parts.enumerate() {
        if i > 0 {
            display_text.push_str(separator);
        }

        let symbol = match part {
            "secondary" | "cmd" => {
                #[cfg(target_os = "macos")]
                { "⌘" }
                #[cfg(not(target_os = "macos"))]
                { "Ctrl" }
            }
            "ctrl" => {
                #[cfg(target_os = "macos")]
                { "⌃" }
                #[cfg(not(target_os = "macos"))]
                { "Ctrl" }
            }
            "alt" => {
                #[cfg(target_os = "macos")]
                { "⌥" }
                #[cfg(not(target_os = "macos"))]
                { "Alt" }
            }
            "shift" => {
                #[cfg(target_os = "macos")]
                { "⇧" }
                #[cfg(not(target_os = "macos"))]
                { "Shift" }
            }
            "backspace" => {
                #[cfg(target_os = "macos")]
                { "⌫" }
                #[cfg(not(target_os = "macos"))]
                { "Backspace" }
            }
            "left" => "←",
            "right" => "→",
            "escape" => "Esc",
            c => {
                display_text.push_str(&c.to_uppercase());
                continue;
            }
        };
        display_text.push_str(symbol);
    }

    display_text
}

/// Create global keyboard bindings
pub fn new_key_bindings() -> Vec<KeyBinding> {
    let mut bindings = vec![KeyBinding::new("secondary-q", MenuAction::Quit, None)];
    bindings.extend(
        GridAction::ALL
            .into_iter()
            .map(|action| KeyBinding::new(action.keystroke(), action, Some(GRID_CONTEXT))),
    );
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_keystroke() {
        #[cfg(not(target_os = "macos"))]
        {
            assert_eq!(humanize_keystroke("secondary-r"), "Ctrl+R");
            assert_eq!(humanize_keystroke("alt-right"), "Alt+→");
            assert_eq!(humanize_keystroke("escape"), "Esc");
        }
        #[cfg(target_os = "macos")]
        {
            assert_eq!(humanize_keystroke("secondary-r"), "⌘R");
            assert_eq!(humanize_keystroke("alt-right"), "⌥→");
        }
    }

    #[test]
    fn test_every_grid_action_has_distinct_keystroke() {
        let mut keys: Vec<_> = GridAction::ALL.iter().map(|a| a.keystroke()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), GridAction::ALL.len());
    }
}
