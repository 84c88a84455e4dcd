//! WASM bridge — exposes the DropCanvas editor session to the browser host.
//!
//! The host owns the DOM: it injects the markup strings this bridge
//! returns, forwards pointer/keyboard events with the target they landed
//! on, and performs file downloads. All model state lives on this side.
//!
//! Compiled via `wasm-pack build --target web`.

use dc_core::ItemId;
use dc_core::emitter::emit_item;
use dc_core::export::EXPORT_FILE_NAME;
use dc_editor::commands::{CommandOutcome, EditorCommand, execute};
use dc_editor::drag::DragTool;
use dc_editor::input::{InputEvent, Modifiers, PointerTarget};
use dc_editor::session::{EditorError, Session};
use dc_editor::shortcuts::dispatch_key;
use wasm_bindgen::prelude::*;

/// The main WASM-facing editor controller.
///
/// Holds the session and drag tool. All interaction from the host JS
/// goes through this struct.
#[wasm_bindgen]
pub struct DropCanvas {
    session: Session,
    drag: DragTool,
}

#[wasm_bindgen]
impl DropCanvas {
    /// Create a new editor with the given canvas dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Self {
        console_panic_hook_setup();

        Self {
            session: Session::new(width, height, host_seed()),
            drag: DragTool::new(),
        }
    }

    // ─── Pointer & keyboard ──────────────────────────────────────────────

    /// Handle pointer down. `target` is what the pointer landed on
    /// ("handle", "body", "editable", "canvas"); `item_id` identifies the
    /// item for the first three. Returns true if the document changed.
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_down(
        &mut self,
        x: f32,
        y: f32,
        target: &str,
        item_id: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let Some(target) = parse_target(target, item_id) else {
            log::warn!("pointer_down: unknown target kind");
            return false;
        };
        let event = InputEvent::PointerDown {
            x,
            y,
            target,
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        };
        self.drag.handle(&event, &mut self.session)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.drag
            .handle(&InputEvent::PointerMove { x, y }, &mut self.session)
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.drag
            .handle(&InputEvent::PointerUp { x, y }, &mut self.session)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Handle a key event. Returns true if it was handled and the host
    /// should suppress the default behavior.
    pub fn key_down(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        dispatch_key(&mut self.session, key, modifiers)
    }

    // ─── Toolbar commands ────────────────────────────────────────────────

    /// Add a rectangle; returns the new item's ID.
    pub fn add_rect(&mut self) -> String {
        let _ = execute(&mut self.session, EditorCommand::AddRect);
        self.selected_id()
    }

    pub fn add_circle(&mut self) -> String {
        let _ = execute(&mut self.session, EditorCommand::AddCircle);
        self.selected_id()
    }

    pub fn add_text(&mut self) -> String {
        let _ = execute(&mut self.session, EditorCommand::AddText);
        self.selected_id()
    }

    /// Add an image item. An empty URL rejects with the alert text.
    pub fn add_image(&mut self, url: &str) -> Result<String, JsValue> {
        execute(
            &mut self.session,
            EditorCommand::AddImage { url: url.into() },
        )
        .map(|_| self.selected_id())
        .map_err(alert)
    }

    pub fn apply_canvas(&mut self, width: &str, height: &str, background: &str) {
        let _ = execute(
            &mut self.session,
            EditorCommand::ApplyCanvasConfig {
                width: width.into(),
                height: height.into(),
                background: background.into(),
            },
        );
    }

    /// Live background-color input path; no apply action required.
    pub fn set_canvas_background(&mut self, value: &str) {
        let _ = execute(
            &mut self.session,
            EditorCommand::SetCanvasBackground {
                value: value.into(),
            },
        );
    }

    pub fn clear_canvas(&mut self) {
        let _ = execute(&mut self.session, EditorCommand::ClearCanvas);
    }

    pub fn bring_to_front(&mut self) {
        let _ = execute(&mut self.session, EditorCommand::BringToFront);
    }

    pub fn send_to_back(&mut self) {
        let _ = execute(&mut self.session, EditorCommand::SendToBack);
    }

    pub fn delete_selected(&mut self) {
        let _ = execute(&mut self.session, EditorCommand::DeleteSelected);
    }

    // ─── HTML panel ──────────────────────────────────────────────────────

    /// Serialize the live canvas for the HTML panel.
    pub fn refresh_html(&mut self) -> String {
        match execute(&mut self.session, EditorCommand::RefreshFromCanvas) {
            Ok(CommandOutcome::Markup(markup)) => markup,
            _ => String::new(),
        }
    }

    /// Insert pasted HTML as one item; returns the new item's ID.
    pub fn insert_html(&mut self, raw: &str) -> Result<String, JsValue> {
        execute(
            &mut self.session,
            EditorCommand::InsertHtml { raw: raw.into() },
        )
        .map(|_| self.selected_id())
        .map_err(alert)
    }

    /// Replace the whole canvas from pasted HTML; returns the refreshed
    /// panel markup.
    pub fn replace_canvas(&mut self, raw: &str) -> Result<String, JsValue> {
        match execute(
            &mut self.session,
            EditorCommand::ReplaceCanvas { raw: raw.into() },
        ) {
            Ok(CommandOutcome::Markup(markup)) => Ok(markup),
            Ok(_) => Ok(String::new()),
            Err(err) => Err(alert(err)),
        }
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// The standalone static document for download.
    pub fn export_html(&mut self) -> String {
        match execute(&mut self.session, EditorCommand::ExportStatic) {
            Ok(CommandOutcome::Export { document, .. }) => document,
            _ => String::new(),
        }
    }

    /// The file name the host gives the download.
    pub fn export_file_name() -> String {
        EXPORT_FILE_NAME.to_string()
    }

    // ─── Selection & inspector ───────────────────────────────────────────

    /// The selected item's ID, or "" when nothing is selected.
    pub fn selected_id(&self) -> String {
        self.session
            .selected()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    pub fn select_by_id(&mut self, item_id: &str) -> bool {
        self.session.select(Some(ItemId::intern(item_id)));
        self.session.selected().is_some()
    }

    pub fn deselect(&mut self) {
        self.session.select(None);
    }

    /// Inspector snapshot as JSON; `"null"` when nothing is selected
    /// (the host shows the placeholder then).
    pub fn inspector_json(&self) -> String {
        let fields = dc_editor::inspector::snapshot(&self.session);
        serde_json::to_string(&fields).unwrap_or_else(|_| "null".to_string())
    }

    /// Write one edited inspector field back into the selected item.
    /// Returns true if the item changed.
    pub fn set_prop(&mut self, key: &str, value: &str) -> bool {
        let Some(field) = dc_editor::inspector::Field::from_key(key) else {
            log::warn!("set_prop: unknown field {key:?}");
            return false;
        };
        dc_editor::inspector::set_field(&mut self.session, field, value)
    }

    /// Write edited text content back into a text item (the host reports
    /// in-place edits of the contenteditable region).
    pub fn set_text_content(&mut self, item_id: &str, content: &str) -> bool {
        self.session
            .set_text_content(ItemId::intern(item_id), content)
    }

    // ─── Rendering support ───────────────────────────────────────────────

    /// The live canvas markup for the host to inject.
    pub fn canvas_markup(&self) -> String {
        self.session.canvas_markup()
    }

    /// One item's markup (for re-rendering a single item after an edit).
    /// Returns "" for an unknown ID.
    pub fn item_markup(&self, item_id: &str) -> String {
        self.session
            .document()
            .get(ItemId::intern(item_id))
            .map(emit_item)
            .unwrap_or_default()
    }

    /// The topmost item at canvas coordinates, or "" when the point is
    /// over empty canvas.
    pub fn item_at(&self, x: f32, y: f32) -> String {
        self.session
            .document()
            .item_at(x, y)
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    pub fn canvas_width(&self) -> f32 {
        self.session.document().width
    }

    pub fn canvas_height(&self) -> f32 {
        self.session.document().height
    }
}

fn parse_target(target: &str, item_id: &str) -> Option<PointerTarget> {
    if target == "canvas" {
        return Some(PointerTarget::Canvas);
    }
    if item_id.is_empty() {
        return None;
    }
    let id = ItemId::intern(item_id);
    match target {
        "handle" => Some(PointerTarget::Handle(id)),
        "body" => Some(PointerTarget::Body(id)),
        "editable" => Some(PointerTarget::Editable(id)),
        _ => None,
    }
}

fn alert(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// RNG seed for insert-HTML placement jitter.
fn host_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0
    }
}

fn console_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("DropCanvas WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
