pub mod commands;
pub mod drag;
pub mod input;
pub mod inspector;
pub mod session;
pub mod shortcuts;

pub use commands::{CommandOutcome, EditorCommand, execute};
pub use drag::DragTool;
pub use input::{InputEvent, Modifiers, PointerTarget};
pub use inspector::{Field, InspectorFields, TextFields};
pub use session::{EditorError, Session};
pub use shortcuts::{NUDGE_STEP, NUDGE_STEP_FAST, ShortcutAction, ShortcutMap};
