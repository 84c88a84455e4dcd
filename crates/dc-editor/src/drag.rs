//! Drag tool: pointer-driven repositioning within canvas bounds.
//!
//! States: {idle, dragging}. A drag starts only on the item's dedicated
//! move handle, so text content stays independently editable; the item
//! body selects without dragging. The gesture struct is the scoped
//! resource of the interaction: entered on pointer-down, dropped
//! unconditionally on pointer-up, with no path that leaves it behind.

use crate::input::{InputEvent, PointerTarget};
use crate::session::Session;
use dc_core::ItemId;
use dc_core::geom::Point;

/// A drag in progress: where the pointer and the item started.
#[derive(Debug, Clone, Copy)]
struct DragGesture {
    item: ItemId,
    start_pointer: Point,
    start_position: Point,
}

#[derive(Debug, Default)]
pub struct DragTool {
    gesture: Option<DragGesture>,
}

impl DragTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Feed one input event. Returns true if the document changed.
    pub fn handle(&mut self, event: &InputEvent, session: &mut Session) -> bool {
        match event {
            InputEvent::PointerDown { x, y, target, .. } => {
                match *target {
                    PointerTarget::Handle(id) => {
                        session.select(Some(id));
                        // Only an existing item can anchor a gesture.
                        if let Some(item) = session.document().get(id) {
                            self.gesture = Some(DragGesture {
                                item: id,
                                start_pointer: Point::new(*x, *y),
                                start_position: item.position,
                            });
                        }
                    }
                    PointerTarget::Body(id) => session.select(Some(id)),
                    PointerTarget::Editable(_) => {}
                    PointerTarget::Canvas => session.select(None),
                }
                false
            }
            InputEvent::PointerMove { x, y } => {
                let Some(gesture) = self.gesture else {
                    return false;
                };
                let desired = Point::new(
                    gesture.start_position.x + (x - gesture.start_pointer.x),
                    gesture.start_position.y + (y - gesture.start_pointer.y),
                );
                session.place_item(gesture.item, desired)
            }
            InputEvent::PointerUp { .. } => {
                // Unconditional release; nothing survives the gesture.
                self.gesture = None;
                false
            }
            InputEvent::Key { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use pretty_assertions::assert_eq;

    fn down(x: f32, y: f32, target: PointerTarget) -> InputEvent {
        InputEvent::PointerDown {
            x,
            y,
            target,
            modifiers: Modifiers::NONE,
        }
    }

    fn mv(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove { x, y }
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp { x, y }
    }

    #[test]
    fn handle_drag_moves_item() {
        let mut s = Session::new(900.0, 600.0, 7);
        let id = s.add_rect(); // at (80, 80)
        let mut tool = DragTool::new();

        tool.handle(&down(100.0, 100.0, PointerTarget::Handle(id)), &mut s);
        assert!(tool.is_dragging());

        tool.handle(&mv(130.0, 90.0), &mut s);
        assert_eq!(
            s.document().get(id).unwrap().position,
            Point::new(110.0, 70.0)
        );

        tool.handle(&up(130.0, 90.0), &mut s);
        assert!(!tool.is_dragging());

        // Moves after release do nothing.
        tool.handle(&mv(500.0, 500.0), &mut s);
        assert_eq!(
            s.document().get(id).unwrap().position,
            Point::new(110.0, 70.0)
        );
    }

    #[test]
    fn drag_clamps_to_canvas_bounds() {
        let mut s = Session::new(900.0, 600.0, 7);
        let id = s.add_rect(); // 240x160
        let mut tool = DragTool::new();

        tool.handle(&down(100.0, 100.0, PointerTarget::Handle(id)), &mut s);
        tool.handle(&mv(-2000.0, 4000.0), &mut s);
        assert_eq!(
            s.document().get(id).unwrap().position,
            Point::new(0.0, 440.0)
        );
    }

    #[test]
    fn body_click_selects_without_dragging() {
        let mut s = Session::new(900.0, 600.0, 7);
        let a = s.add_rect();
        let b = s.add_circle();
        assert_eq!(s.selected(), Some(b));

        let mut tool = DragTool::new();
        tool.handle(&down(90.0, 90.0, PointerTarget::Body(a)), &mut s);
        assert_eq!(s.selected(), Some(a));
        assert!(!tool.is_dragging());

        let before = s.document().get(a).unwrap().position;
        tool.handle(&mv(300.0, 300.0), &mut s);
        assert_eq!(s.document().get(a).unwrap().position, before);
    }

    #[test]
    fn editable_click_keeps_selection() {
        let mut s = Session::new(900.0, 600.0, 7);
        let a = s.add_text();
        let b = s.add_rect();
        s.select(Some(a));

        let mut tool = DragTool::new();
        tool.handle(&down(90.0, 90.0, PointerTarget::Editable(b)), &mut s);
        assert_eq!(s.selected(), Some(a));
    }

    #[test]
    fn empty_canvas_click_clears_selection() {
        let mut s = Session::new(900.0, 600.0, 7);
        s.add_rect();
        let mut tool = DragTool::new();
        tool.handle(&down(5.0, 5.0, PointerTarget::Canvas), &mut s);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn no_gesture_leaks_across_items() {
        let mut s = Session::new(900.0, 600.0, 7);
        let a = s.add_rect();
        let b = s.add_circle();
        let mut tool = DragTool::new();

        tool.handle(&down(100.0, 100.0, PointerTarget::Handle(a)), &mut s);
        tool.handle(&up(100.0, 100.0), &mut s);
        tool.handle(&down(100.0, 100.0, PointerTarget::Handle(b)), &mut s);
        tool.handle(&mv(120.0, 100.0), &mut s);

        // Only b moved.
        assert_eq!(s.document().get(a).unwrap().position, Point::new(80.0, 80.0));
        assert_eq!(
            s.document().get(b).unwrap().position,
            Point::new(100.0, 80.0)
        );
    }
}
