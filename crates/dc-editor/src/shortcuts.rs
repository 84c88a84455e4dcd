//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Shortcuts
//! are live only while an item is selected; `dispatch_key` enforces that.

use crate::input::Modifiers;
use crate::session::Session;

/// Arrow-key nudge distance in pixels.
pub const NUDGE_STEP: f32 = 2.0;
/// Nudge distance with Shift held.
pub const NUDGE_STEP_FAST: f32 = 10.0;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortcutAction {
    /// Remove the selected item and clear the selection.
    DeleteSelected,
    /// Move the selected item by (dx, dy), clamped at zero only.
    Nudge { dx: f32, dy: f32 },
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"Delete"`,
    /// `"ArrowLeft"`). Returns `None` if the key has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let step = if modifiers.shift {
            NUDGE_STEP_FAST
        } else {
            NUDGE_STEP
        };

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::DeleteSelected),
            "ArrowLeft" => Some(ShortcutAction::Nudge { dx: -step, dy: 0.0 }),
            "ArrowRight" => Some(ShortcutAction::Nudge { dx: step, dy: 0.0 }),
            "ArrowUp" => Some(ShortcutAction::Nudge { dx: 0.0, dy: -step }),
            "ArrowDown" => Some(ShortcutAction::Nudge { dx: 0.0, dy: step }),
            _ => None,
        }
    }
}

/// Resolve and apply a key event against the session.
/// Returns true if the event was handled (the host suppresses its
/// default behavior then). Inert without a selection.
pub fn dispatch_key(session: &mut Session, key: &str, modifiers: Modifiers) -> bool {
    if session.selected().is_none() {
        return false;
    }
    match ShortcutMap::resolve(key, modifiers) {
        Some(ShortcutAction::DeleteSelected) => {
            session.delete_selected();
            true
        }
        Some(ShortcutAction::Nudge { dx, dy }) => session.nudge_selected(dx, dy),
        None => false,
    }
}
