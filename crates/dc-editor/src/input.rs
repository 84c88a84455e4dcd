//! Input abstraction layer.
//!
//! Normalizes host pointer and keyboard events into `InputEvent`s keyed by
//! what the pointer landed on. The host only reports targets; every
//! selection and drag decision is made here, per item identity, so no
//! listener state ever lives outside the editor.

use dc_core::ItemId;

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The item's dedicated move handle; starts a drag.
    Handle(ItemId),
    /// The item's body; selects without dragging.
    Body(ItemId),
    /// An editable region inside the item's content (text being typed
    /// into, form controls); selection stays untouched.
    Editable(ItemId),
    /// Empty canvas; clears the selection.
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// A normalized input event from the host.
#[derive(Debug, Clone)]
pub enum InputEvent {
    PointerDown {
        x: f32,
        y: f32,
        target: PointerTarget,
        modifiers: Modifiers,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp {
        x: f32,
        y: f32,
    },
    Key {
        key: String,
        modifiers: Modifiers,
    },
}
