//! Integration tests: full editing flows across dc-editor ↔ dc-core.
//!
//! Exercises the session the way the host drives it: toolbar commands,
//! drag gestures, inspector edits, shortcuts, and the HTML panel.

use dc_core::geom::Point;
use dc_core::model::ItemKind;
use dc_core::parser::parse_fragment;
use dc_editor::commands::{CommandOutcome, EditorCommand, execute};
use dc_editor::drag::DragTool;
use dc_editor::input::{InputEvent, Modifiers, PointerTarget};
use dc_editor::inspector::{Field, set_field, snapshot};
use dc_editor::session::Session;
use dc_editor::shortcuts::dispatch_key;

fn session() -> Session {
    Session::new(900.0, 600.0, 42)
}

// ─── Selection invariants ────────────────────────────────────────────────

#[test]
fn at_most_one_item_is_ever_selected() {
    let mut s = session();
    let a = s.add_rect();
    let b = s.add_text();
    assert_eq!(s.selected(), Some(b));

    s.select(Some(a));
    assert_eq!(s.selected(), Some(a));

    s.delete_selected();
    assert_eq!(s.selected(), None);
    assert!(s.document().get(b).is_some());
}

#[test]
fn size_floor_holds_after_any_size_edit() {
    let mut s = session();
    s.add_rect();
    for raw in ["0", "-50", "3", "abc", ""] {
        set_field(&mut s, Field::Width, raw);
        set_field(&mut s, Field::Height, raw);
        let fields = snapshot(&s).unwrap();
        assert!(fields.width >= 10.0, "width {} for input {raw:?}", fields.width);
        assert!(fields.height >= 10.0);
    }
}

// ─── Drag + inspector live sync ──────────────────────────────────────────

#[test]
fn drag_updates_inspector_position_live() {
    let mut s = session();
    let id = s.add_rect();
    let mut drag = DragTool::new();

    drag.handle(
        &InputEvent::PointerDown {
            x: 200.0,
            y: 200.0,
            target: PointerTarget::Handle(id),
            modifiers: Modifiers::NONE,
        },
        &mut s,
    );
    drag.handle(&InputEvent::PointerMove { x: 260.0, y: 180.0 }, &mut s);

    let fields = snapshot(&s).unwrap();
    assert_eq!((fields.x, fields.y), (140.0, 60.0));

    drag.handle(&InputEvent::PointerUp { x: 260.0, y: 180.0 }, &mut s);
    assert!(!drag.is_dragging());
}

#[test]
fn drag_never_escapes_the_canvas() {
    let mut s = session();
    let id = s.add_rect(); // 240x160
    let mut drag = DragTool::new();

    drag.handle(
        &InputEvent::PointerDown {
            x: 0.0,
            y: 0.0,
            target: PointerTarget::Handle(id),
            modifiers: Modifiers::NONE,
        },
        &mut s,
    );

    for (x, y) in [(-500.0, -500.0), (5000.0, 10.0), (100.0, 5000.0)] {
        drag.handle(&InputEvent::PointerMove { x, y }, &mut s);
        let item = s.document().get(id).unwrap();
        assert!(item.position.x >= 0.0);
        assert!(item.position.y >= 0.0);
        assert!(item.position.x + item.size.width() <= 900.0);
        assert!(item.position.y + item.size.height() <= 600.0);
    }
}

// ─── Shortcuts ───────────────────────────────────────────────────────────

#[test]
fn nudge_steps_are_two_and_ten_pixels() {
    let mut s = session();
    let id = s.add_rect();
    s.place_item(id, Point::new(100.0, 100.0));

    dispatch_key(&mut s, "ArrowRight", Modifiers::NONE);
    assert_eq!(
        s.document().get(id).unwrap().position,
        Point::new(102.0, 100.0)
    );

    dispatch_key(&mut s, "ArrowDown", Modifiers::SHIFT);
    assert_eq!(
        s.document().get(id).unwrap().position,
        Point::new(102.0, 110.0)
    );
}

#[test]
fn delete_key_removes_item_and_selection() {
    let mut s = session();
    s.add_circle();
    assert!(dispatch_key(&mut s, "Backspace", Modifiers::NONE));
    assert!(s.document().is_empty());
    assert_eq!(s.selected(), None);
    // Second press is inert — nothing selected.
    assert!(!dispatch_key(&mut s, "Backspace", Modifiers::NONE));
}

// ─── HTML panel flows ────────────────────────────────────────────────────

#[test]
fn insert_then_refresh_shows_the_block() {
    let mut s = session();
    execute(
        &mut s,
        EditorCommand::InsertHtml {
            raw: "<p onclick='x()'>parrafo</p>".into(),
        },
    )
    .unwrap();

    let outcome = execute(&mut s, EditorCommand::RefreshFromCanvas).unwrap();
    let CommandOutcome::Markup(markup) = outcome else {
        panic!("expected markup outcome");
    };
    assert!(markup.contains("<p>parrafo</p>"));
    assert!(!markup.contains("onclick"));
}

#[test]
fn replace_canvas_roundtrips_through_the_panel() {
    let mut s = session();
    s.add_rect();
    s.add_circle();

    let markup = s
        .replace_canvas("<div>uno</div><div>dos</div><div>tres</div>")
        .unwrap();

    // Three cascading blocks replaced the two old items.
    assert_eq!(s.document().len(), 3);
    let positions: Vec<Point> = s.document().items().iter().map(|i| i.position).collect();
    assert_eq!(
        positions,
        vec![
            Point::new(40.0, 40.0),
            Point::new(60.0, 60.0),
            Point::new(80.0, 80.0)
        ]
    );

    // The returned panel markup parses back to the same three blocks.
    let nodes = parse_fragment(&markup);
    let wrappers: Vec<_> = nodes
        .iter()
        .filter(|n| n.attr("data-kind") == Some("html"))
        .collect();
    assert_eq!(wrappers.len(), 3);
}

// ─── Stacking ────────────────────────────────────────────────────────────

#[test]
fn bring_to_front_wins_hit_testing() {
    let mut s = session();
    let a = s.add_rect();
    let b = s.add_circle(); // both cover (100, 100)
    assert_eq!(s.document().item_at(100.0, 100.0), Some(b));

    s.select(Some(a));
    assert!(s.bring_to_front());
    assert_eq!(s.document().item_at(100.0, 100.0), Some(a));

    assert!(s.send_to_back());
    assert_eq!(s.document().item_at(100.0, 100.0), Some(b));
}

// ─── Text item example scenario ──────────────────────────────────────────

#[test]
fn text_item_inspects_with_default_font() {
    let mut s = session();
    s.create_item(ItemKind::text(Some("Hello".into())), &Default::default());

    let fields = snapshot(&s).unwrap();
    let text = fields.text.expect("text block visible");
    assert_eq!(text.font_size, 28.0);
    assert_eq!(text.font_color, "#111111");
    assert_eq!(text.font_weight, 400);
}
