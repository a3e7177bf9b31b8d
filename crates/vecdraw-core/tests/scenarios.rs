//! End-to-end editing scenarios driven through the public `Canvas` API.

use kurbo::{Point, Vec2};
use serde_json::{Value, json};
use std::sync::Arc;
use vecdraw_core::selection::{Corner, HandleKind};
use vecdraw_core::{Canvas, EditorSettings, Frame, InteractionState, PendingOps, Shape, ShapeKind, ToolKind};

/// Canvas with no origin offset, so pointer coordinates are canvas coordinates.
fn canvas() -> Canvas {
    Canvas::with_settings(EditorSettings {
        canvas_origin: Vec2::ZERO,
        ..Default::default()
    })
}

fn at(x: f64, y: f64) -> Option<Point> {
    Some(Point::new(x, y))
}

fn draw(c: &mut Canvas, tool: ToolKind, from: (f64, f64), to: (f64, f64)) {
    c.set_tool(tool);
    c.pointer_down(at(from.0, from.1));
    c.pointer_move(at(to.0, to.1));
    c.pointer_up(at(to.0, to.1));
}

fn shape_json(c: &Canvas, index: usize) -> Value {
    let shapes: Value = serde_json::from_str(&c.to_json().unwrap()).unwrap();
    shapes[index].clone()
}

fn sequence(c: &Canvas) -> Vec<Arc<Shape>> {
    c.shapes().to_vec()
}

#[test]
fn draw_rectangle_gesture() {
    let mut c = canvas();
    draw(&mut c, ToolKind::Rectangle, (10.0, 10.0), (110.0, 110.0));

    assert_eq!(c.shapes().len(), 1);
    let shape = shape_json(&c, 0);
    assert_eq!(shape["kind"], "rectangle");
    assert_eq!(shape["x"], 10);
    assert_eq!(shape["y"], 10);
    assert_eq!(shape["width"], 100);
    assert_eq!(shape["height"], 100);
}

#[test]
fn add_ellipse_from_center_and_radii() {
    let mut c = canvas();
    c.apply_json(r#"[{"op":"addEllipse","cx":100,"cy":100,"rx":50,"ry":50}]"#)
        .unwrap();

    let shape = shape_json(&c, 0);
    assert_eq!(shape["kind"], "ellipse");
    assert_eq!(shape["x"], 50);
    assert_eq!(shape["y"], 50);
    assert_eq!(shape["width"], 100);
    assert_eq!(shape["height"], 100);
}

#[test]
fn pencil_gesture() {
    let mut c = canvas();
    c.set_tool(ToolKind::Pencil);
    c.pointer_down(at(0.0, 0.0));
    c.pointer_move(at(10.0, 0.0));
    c.pointer_move(at(10.0, 10.0));
    c.pointer_up(at(10.0, 10.0));

    assert_eq!(c.shapes().len(), 1);
    let shape = shape_json(&c, 0);
    assert_eq!(shape["kind"], "pencil");
    assert_eq!(shape["x"], 0);
    assert_eq!(shape["y"], 0);
    assert_eq!(shape["width"], 10);
    assert_eq!(shape["height"], 10);
    assert_eq!(shape["pathData"], "M 0 0 L 10 0 L 10 10");
}

#[test]
fn delete_then_undo_restores_shape_but_not_selection() {
    let mut c = canvas();
    draw(&mut c, ToolKind::Rectangle, (0.0, 0.0), (50.0, 50.0));
    let id = c.shapes()[0].id();

    c.set_tool(ToolKind::Select);
    assert!(c.select_shape(id));
    assert!(c.delete_selected());
    assert!(c.selected().is_none());
    assert!(c.get(id).is_none());

    assert!(c.undo());
    assert!(c.get(id).is_some());
    assert!(c.selected().is_none());
}

#[test]
fn undo_redo_is_an_inverse() {
    let mut c = canvas();
    draw(&mut c, ToolKind::Rectangle, (0.0, 0.0), (40.0, 40.0));
    draw(&mut c, ToolKind::Ellipse, (50.0, 50.0), (90.0, 80.0));
    draw(&mut c, ToolKind::Line, (0.0, 100.0), (100.0, 100.0));
    c.apply_json(r#"[{"op":"addText","content":"hello","x":5,"y":200}]"#)
        .unwrap();
    c.set_tool(ToolKind::Select);
    c.pointer_down(at(20.0, 20.0));
    c.pointer_move(at(25.0, 30.0));
    c.pointer_up(None);
    c.update_property("fill", &json!("#ff0000")).unwrap();
    c.apply_json(r#"[{"op":"clear"},{"op":"addRect"}]"#).unwrap();

    let depth = c.history().undo_depth();
    assert_eq!(depth, 7);

    for undone in 0..depth {
        let before = sequence(&c);
        assert!(c.undo());
        assert!(c.redo());
        assert_eq!(sequence(&c), before, "inverse law failed after {undone} undos");
        assert!(c.undo());
    }
    assert!(!c.can_undo());
    assert!(c.shapes().is_empty());

    for _ in 0..depth {
        assert!(c.redo());
    }
    assert_eq!(c.shapes().len(), 1);
    assert!(!c.can_redo());
}

#[test]
fn drag_threshold() {
    for tool in [ToolKind::Rectangle, ToolKind::Ellipse, ToolKind::Triangle] {
        let mut c = canvas();
        draw(&mut c, tool, (10.0, 10.0), (12.0, 8.0));
        assert!(c.shapes().is_empty(), "{tool} committed a shape below the threshold");
    }

    let mut c = canvas();
    draw(&mut c, ToolKind::Rectangle, (10.0, 10.0), (13.0, 10.0));
    assert_eq!(c.shapes().len(), 1);

    let mut c = canvas();
    draw(&mut c, ToolKind::Line, (10.0, 10.0), (10.0, 10.0));
    assert_eq!(c.shapes().len(), 1);
}

#[test]
fn topmost_shape_wins_hit_test() {
    let mut c = canvas();
    draw(&mut c, ToolKind::Rectangle, (0.0, 0.0), (100.0, 100.0));
    draw(&mut c, ToolKind::Rectangle, (50.0, 50.0), (150.0, 150.0));
    let top = c.shapes()[1].id();

    c.set_tool(ToolKind::Select);
    c.pointer_down(at(75.0, 75.0));
    c.pointer_up(None);
    assert_eq!(c.selected_id(), Some(top));
}

#[test]
fn nw_handle_flips_to_ne() {
    let mut c = canvas();
    draw(&mut c, ToolKind::Rectangle, (100.0, 100.0), (150.0, 150.0));
    c.set_tool(ToolKind::Select);
    c.select_shape(c.shapes()[0].id());

    c.pointer_down(at(100.0, 100.0));
    c.pointer_move(at(180.0, 110.0));
    assert!(matches!(
        c.state(),
        InteractionState::Resizing {
            handle: HandleKind::Corner(Corner::Ne),
            ..
        }
    ));
    c.pointer_up(None);

    let frame = c.shapes()[0].frame().unwrap();
    assert!(frame.width >= 0 && frame.height >= 0);
    assert_eq!(frame, Frame::new(150, 110, 30, 40));
}

#[test]
fn clear_is_idempotent() {
    let mut c = canvas();
    c.apply_json(r#"[{"op":"addRect"},{"op":"addLine"}]"#).unwrap();
    c.apply_json(r#"[{"op":"clear"}]"#).unwrap();
    assert!(c.shapes().is_empty());
    c.apply_json(r#"[{"op":"clear"}]"#).unwrap();
    assert!(c.shapes().is_empty());
}

#[test]
fn unknown_op_falls_back_to_rectangle() {
    let mut c = canvas();
    let report = c.apply_json(r#"[{"op":"addStar","x":7,"y":9}]"#).unwrap();
    assert_eq!(report.fallbacks.len(), 1);
    assert_eq!(report.fallbacks[0].op, "addStar");
    let shape = &c.shapes()[0];
    assert_eq!(shape.kind(), ShapeKind::Rectangle);
    assert_eq!(shape.frame(), Some(Frame::new(7, 9, 100, 100)));
}

#[test]
fn pushed_ops_reach_the_session_once() {
    let queue = PendingOps::new();
    let mut first = canvas();
    let mut second = canvas();

    queue
        .push("room", vec![json!({"op": "addRect"}), json!({"op": "addText", "content": "hi"})])
        .unwrap();
    let report = first.drain_room(&queue, "room").unwrap().unwrap();
    assert_eq!(report.added.len(), 2);
    assert!(second.drain_room(&queue, "room").unwrap().is_none());

    assert_eq!(first.shapes().len(), 2);
    assert!(second.shapes().is_empty());
    assert!(first.undo());
    assert!(first.shapes().is_empty());
}
