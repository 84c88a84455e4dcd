//! The canvas document: the single owner of all placed items.
//!
//! Items live in a plain insertion-ordered `Vec`; paint order is derived
//! from each item's `stack` value, never from container order. The
//! stacking counter lives here too, incremented once per creation and
//! once per bring-to-front.

use crate::id::ItemId;
use crate::model::{Background, Color, Item};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CANVAS_WIDTH: f32 = 900.0;
pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

/// Stacking counter start value; the first item draws at 11.
const INITIAL_STACK: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub width: f32,
    pub height: f32,
    pub background: Background,
    items: Vec<Item>,
    stack_counter: u32,
}

impl Document {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: Background::Color(Color::WHITE),
            items: Vec::new(),
            stack_counter: INITIAL_STACK,
        }
    }

    fn next_stack(&mut self) -> u32 {
        self.stack_counter += 1;
        self.stack_counter
    }

    /// Insert an item, assigning it a fresh, strictly increasing stack
    /// value. Returns the item's ID.
    pub fn add(&mut self, mut item: Item) -> ItemId {
        item.stack = self.next_stack();
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Remove an item. Returns it if it was present.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// All items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All items in paint order (ascending stack).
    pub fn items_by_stack(&self) -> Vec<&Item> {
        let mut ordered: Vec<&Item> = self.items.iter().collect();
        ordered.sort_by_key(|item| item.stack);
        ordered
    }

    /// Find the item at the given canvas coordinates.
    /// Returns the topmost (highest stack) hit.
    pub fn item_at(&self, x: f32, y: f32) -> Option<ItemId> {
        self.items
            .iter()
            .filter(|item| item.contains_point(x, y))
            .max_by_key(|item| item.stack)
            .map(|item| item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item. The stacking counter keeps running.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Raise an item above everything else by bumping the counter.
    /// Returns true if the item exists.
    pub fn bring_to_front(&mut self, id: ItemId) -> bool {
        let next = self.next_stack();
        match self.get_mut(id) {
            Some(item) => {
                item.stack = next;
                true
            }
            None => {
                // Undo the bump so counters stay dense for the common path.
                self.stack_counter -= 1;
                false
            }
        }
    }

    /// Send an item behind everything else.
    ///
    /// Renumbers every item: the target takes stack 1 and the rest take
    /// 2.. in their previous paint order, so no two items can tie.
    pub fn send_to_back(&mut self, id: ItemId) -> bool {
        if !self.contains(id) {
            return false;
        }

        let mut order: Vec<ItemId> = self.items_by_stack().iter().map(|item| item.id).collect();
        order.retain(|other| *other != id);

        if let Some(item) = self.get_mut(id) {
            item.stack = 1;
        }
        for (i, other) in order.iter().enumerate() {
            if let Some(item) = self.get_mut(*other) {
                item.stack = i as u32 + 2;
            }
        }
        self.stack_counter = self.stack_counter.max(self.items.len() as u32 + 1);
        true
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemKind, ItemOptions};

    fn doc_with(kinds: &[ItemKind]) -> (Document, Vec<ItemId>) {
        let mut doc = Document::default();
        let ids = kinds
            .iter()
            .map(|kind| doc.add(Item::create(kind.clone(), &ItemOptions::default())))
            .collect();
        (doc, ids)
    }

    #[test]
    fn add_assigns_increasing_stack() {
        let (doc, ids) = doc_with(&[ItemKind::Rect, ItemKind::Circle]);
        let a = doc.get(ids[0]).unwrap().stack;
        let b = doc.get(ids[1]).unwrap().stack;
        assert_eq!(a, INITIAL_STACK + 1);
        assert!(b > a);
    }

    #[test]
    fn remove_returns_item() {
        let (mut doc, ids) = doc_with(&[ItemKind::Rect]);
        assert!(doc.remove(ids[0]).is_some());
        assert!(doc.is_empty());
        assert!(doc.remove(ids[0]).is_none());
    }

    #[test]
    fn item_at_picks_topmost_hit() {
        // Both items cover the default (80,80) 240x160 box.
        let (mut doc, ids) = doc_with(&[ItemKind::Rect, ItemKind::Circle]);
        assert_eq!(doc.item_at(100.0, 100.0), Some(ids[1]));
        assert_eq!(doc.item_at(5.0, 5.0), None);

        doc.bring_to_front(ids[0]);
        assert_eq!(doc.item_at(100.0, 100.0), Some(ids[0]));
    }

    #[test]
    fn send_to_back_renumbers_without_ties() {
        let (mut doc, ids) = doc_with(&[ItemKind::Rect, ItemKind::Circle, ItemKind::Rect]);
        assert!(doc.send_to_back(ids[2]));

        let stacks: Vec<u32> = ids.iter().map(|id| doc.get(*id).unwrap().stack).collect();
        assert_eq!(stacks, vec![2, 3, 1]);

        // A later add still lands on top of everything.
        let top = doc.add(Item::create(ItemKind::Rect, &ItemOptions::default()));
        let top_stack = doc.get(top).unwrap().stack;
        assert!(stacks.iter().all(|s| *s < top_stack));
    }

    #[test]
    fn paint_order_is_stack_not_insertion() {
        let (mut doc, ids) = doc_with(&[ItemKind::Rect, ItemKind::Circle]);
        doc.send_to_back(ids[1]);

        let painted: Vec<ItemId> = doc.items_by_stack().iter().map(|i| i.id).collect();
        assert_eq!(painted, vec![ids[1], ids[0]]);
        // Insertion order is untouched.
        let inserted: Vec<ItemId> = doc.items().iter().map(|i| i.id).collect();
        assert_eq!(inserted, ids);
    }
}
