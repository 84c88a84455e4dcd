//! Editor session: the single owner of document, selection, and
//! placement randomness. No ambient globals: everything an interaction
//! can touch hangs off this struct.

use dc_core::doc::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, Document};
use dc_core::geom::{Point, coerce_or};
use dc_core::model::{Background, Color, Item, ItemKind, ItemOptions};
use dc_core::parser::{HtmlNode, parse_fragment};
use dc_core::sanitize::{sanitize, sanitize_nodes};
use dc_core::{ItemId, canvas_markup, emit_nodes, export_static};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// The user-facing alert preconditions. `Display` strings are the alert
/// texts shown by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Coloca una URL de imagen.")]
    EmptyImageUrl,
    #[error("Pega HTML primero.")]
    EmptyHtml,
    #[error("Pega HTML para reemplazar el lienzo.")]
    EmptyReplaceHtml,
}

pub struct Session {
    doc: Document,
    /// At most one selected item; a weak reference by identity.
    selection: Option<ItemId>,
    /// Placement jitter for inserted HTML blocks. Seeded by the host.
    rng: SmallRng,
}

impl Session {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self {
            doc: Document::new(width, height),
            selection: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn with_defaults(seed: u64) -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, seed)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Select an item (or clear with `None`). Selecting an unknown ID
    /// clears instead, so a deleted item can never stay selected.
    pub fn select(&mut self, id: Option<ItemId>) {
        self.selection = match id {
            Some(id) if self.doc.contains(id) => Some(id),
            Some(id) => {
                log::warn!("select: unknown item {id}, clearing selection");
                None
            }
            None => None,
        };
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selection
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.doc.get(self.selection?)
    }

    pub(crate) fn selected_item_mut(&mut self) -> Option<&mut Item> {
        self.doc.get_mut(self.selection?)
    }

    // ─── Item creation ───────────────────────────────────────────────────

    /// Create and insert an item; the new item becomes the selection.
    pub fn create_item(&mut self, kind: ItemKind, opts: &ItemOptions) -> ItemId {
        let id = self.doc.add(Item::create(kind, opts));
        log::debug!("created item {id}");
        self.selection = Some(id);
        id
    }

    pub fn add_rect(&mut self) -> ItemId {
        self.create_item(ItemKind::Rect, &ItemOptions::default())
    }

    pub fn add_circle(&mut self) -> ItemId {
        self.create_item(ItemKind::Circle, &ItemOptions::default())
    }

    pub fn add_text(&mut self) -> ItemId {
        self.create_item(ItemKind::text(None), &ItemOptions::default())
    }

    /// Add an image item. An empty URL is the first of the two alert
    /// preconditions; the URL is otherwise carried unvalidated.
    pub fn add_image(&mut self, url: &str) -> Result<ItemId, EditorError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(EditorError::EmptyImageUrl);
        }
        Ok(self.create_item(ItemKind::image(url), &ItemOptions::default()))
    }

    // ─── Deletion & stacking ─────────────────────────────────────────────

    /// Delete the selected item. Always leaves the selection empty.
    pub fn delete_selected(&mut self) -> Option<ItemId> {
        let id = self.selection.take()?;
        self.doc.remove(id);
        log::debug!("deleted item {id}");
        Some(id)
    }

    pub fn clear_canvas(&mut self) {
        self.doc.clear();
        self.selection = None;
    }

    pub fn bring_to_front(&mut self) -> bool {
        match self.selection {
            Some(id) => self.doc.bring_to_front(id),
            None => false,
        }
    }

    pub fn send_to_back(&mut self) -> bool {
        match self.selection {
            Some(id) => self.doc.send_to_back(id),
            None => false,
        }
    }

    // ─── Movement ────────────────────────────────────────────────────────

    /// Move an item to `desired`, clamped into the canvas on both axes
    /// (floor 0 when the item is larger than the canvas). Drag path.
    pub fn place_item(&mut self, id: ItemId, desired: Point) -> bool {
        let (canvas_w, canvas_h) = (self.doc.width, self.doc.height);
        let Some(item) = self.doc.get_mut(id) else {
            return false;
        };
        let clamped = desired.clamped(
            canvas_w - item.size.width(),
            canvas_h - item.size.height(),
        );
        let changed = clamped != item.position;
        item.position = clamped;
        changed
    }

    /// Nudge the selected item. Clamps at the lower (zero) bound only;
    /// the upper bound is deliberately unclamped, unlike drag.
    pub fn nudge_selected(&mut self, dx: f32, dy: f32) -> bool {
        let Some(item) = self.selected_item_mut() else {
            return false;
        };
        item.position.x = (item.position.x + dx).max(0.0);
        item.position.y = (item.position.y + dy).max(0.0);
        true
    }

    // ─── Canvas configuration ────────────────────────────────────────────

    /// Explicit apply action: canvas pixel size (900×600 when unparsed)
    /// and background color.
    pub fn apply_canvas_config(&mut self, width_raw: &str, height_raw: &str, background_raw: &str) {
        self.doc.width = coerce_or(width_raw, DEFAULT_CANVAS_WIDTH);
        self.doc.height = coerce_or(height_raw, DEFAULT_CANVAS_HEIGHT);
        self.set_canvas_background(background_raw);
    }

    /// Live color-input path: updates on every input event, no apply step.
    pub fn set_canvas_background(&mut self, raw: &str) {
        let color = if raw.trim().is_empty() {
            Color::WHITE
        } else {
            Color::parse_css_or_black(raw)
        };
        self.doc.background = Background::Color(color);
    }

    // ─── HTML panel ──────────────────────────────────────────────────────

    /// Sanitize pasted HTML and wrap the whole fragment as one item at a
    /// randomized offset near the top-left corner.
    pub fn insert_html(&mut self, raw: &str) -> Result<ItemId, EditorError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(EditorError::EmptyHtml);
        }
        let safe = sanitize(raw);
        let opts = ItemOptions {
            left: Some(50.0 + self.rng.random_range(0..60) as f32),
            top: Some(50.0 + self.rng.random_range(0..60) as f32),
            width: Some(300.0),
            height: Some(200.0),
            ..Default::default()
        };
        Ok(self.create_item(ItemKind::html(Some(safe)), &opts))
    }

    /// Sanitize, clear the canvas, and re-create one HTML item per
    /// top-level element, cascading +20px per item. Returns the refreshed
    /// canvas markup for the panel.
    pub fn replace_canvas(&mut self, raw: &str) -> Result<String, EditorError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(EditorError::EmptyReplaceHtml);
        }
        let nodes = sanitize_nodes(parse_fragment(raw));
        self.clear_canvas();

        let elements: Vec<HtmlNode> = nodes
            .into_iter()
            .filter(|node| matches!(node, HtmlNode::Element { .. }))
            .collect();
        for (i, node) in elements.iter().enumerate() {
            let (width, height) = node.declared_size();
            let opts = ItemOptions {
                left: Some(40.0 + i as f32 * 20.0),
                top: Some(40.0 + i as f32 * 20.0),
                width: Some(width.unwrap_or(320.0)),
                height: Some(height.unwrap_or(200.0)),
                ..Default::default()
            };
            let markup = emit_nodes(std::slice::from_ref(node));
            self.create_item(ItemKind::html(Some(markup)), &opts);
        }

        Ok(self.canvas_markup())
    }

    /// The live canvas serialized for the HTML panel.
    pub fn canvas_markup(&self) -> String {
        canvas_markup(&self.doc).trim().to_string()
    }

    pub fn export_static(&self) -> String {
        export_static(&self.doc)
    }

    // ─── Content edits ───────────────────────────────────────────────────

    /// Write edited text content back into a text item (the host reports
    /// in-place edits of the editable region).
    pub fn set_text_content(&mut self, id: ItemId, content: &str) -> bool {
        match self.doc.get_mut(id) {
            Some(Item {
                kind: ItemKind::Text { content: c, .. },
                ..
            }) => {
                *c = content.to_string();
                true
            }
            _ => false,
        }
    }
}
