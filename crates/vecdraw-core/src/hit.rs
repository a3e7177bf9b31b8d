//! Point-in-shape and point-over-handle queries.

use crate::selection::{HandleKind, get_handles};
use crate::shapes::{CanvasPoint, Shape, ShapeId};
use std::sync::Arc;

/// Padding around a line's endpoint box that still counts as a hit.
pub const LINE_HIT_PADDING: i32 = 5;

/// Find the topmost shape under `point`.
///
/// The sequence is in z-order, so it is scanned back to front and the first
/// match wins.
pub fn hit_shape(point: CanvasPoint, shapes: &[Arc<Shape>], line_padding: i32) -> Option<ShapeId> {
    shapes
        .iter()
        .rev()
        .find(|shape| shape.hit_test(point, line_padding))
        .map(|shape| shape.id())
}

/// Find which handle of `shape` (if any) lies under `point`. Corners are
/// tried in `nw`, `ne`, `se`, `sw` order.
pub fn hit_handle(point: CanvasPoint, shape: &Shape, tolerance: i32) -> Option<HandleKind> {
    get_handles(shape)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Corner, Endpoint, HANDLE_HIT_TOLERANCE};
    use crate::shapes::{Ellipse, Frame, Line, Rectangle, ShapeStyle};

    fn style() -> ShapeStyle {
        ShapeStyle::new("#e9d5ff", "#7c3aed", 2)
    }

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Arc<Shape> {
        Arc::new(Shape::Rectangle(Rectangle::new(Frame::new(x, y, w, h), style())))
    }

    #[test]
    fn test_topmost_wins() {
        let a = rect(0, 0, 100, 100);
        let b = rect(50, 50, 100, 100);
        let shapes = vec![a.clone(), b.clone()];
        assert_eq!(hit_shape(CanvasPoint::new(75, 75), &shapes, LINE_HIT_PADDING), Some(b.id()));
        assert_eq!(hit_shape(CanvasPoint::new(25, 25), &shapes, LINE_HIT_PADDING), Some(a.id()));
        assert_eq!(hit_shape(CanvasPoint::new(500, 500), &shapes, LINE_HIT_PADDING), None);
    }

    #[test]
    fn test_ellipse_corner_falls_through() {
        let under = rect(0, 0, 100, 100);
        let ellipse = Arc::new(Shape::Ellipse(Ellipse::new(Frame::new(0, 0, 100, 100), style())));
        let shapes = vec![under.clone(), ellipse.clone()];
        assert_eq!(hit_shape(CanvasPoint::new(3, 3), &shapes, LINE_HIT_PADDING), Some(under.id()));
        assert_eq!(hit_shape(CanvasPoint::new(50, 50), &shapes, LINE_HIT_PADDING), Some(ellipse.id()));
    }

    #[test]
    fn test_line_padding() {
        let line = Arc::new(Shape::Line(Line::new(
            CanvasPoint::new(0, 0),
            CanvasPoint::new(100, 0),
            ShapeStyle::new("transparent", "#7c3aed", 2),
        )));
        let shapes = vec![line.clone()];
        assert_eq!(hit_shape(CanvasPoint::new(50, 5), &shapes, LINE_HIT_PADDING), Some(line.id()));
        assert_eq!(hit_shape(CanvasPoint::new(50, 6), &shapes, LINE_HIT_PADDING), None);
    }

    #[test]
    fn test_hit_handle_corners() {
        let shape = rect(0, 0, 100, 100);
        assert_eq!(
            hit_handle(CanvasPoint::new(2, -3), &shape, HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Corner(Corner::Nw))
        );
        assert_eq!(
            hit_handle(CanvasPoint::new(104, 96), &shape, HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Corner(Corner::Se))
        );
        assert_eq!(hit_handle(CanvasPoint::new(50, 50), &shape, HANDLE_HIT_TOLERANCE), None);
    }

    #[test]
    fn test_hit_handle_priority_on_tiny_shape() {
        // Every corner is within tolerance; nw is tried first.
        let shape = rect(0, 0, 4, 4);
        assert_eq!(
            hit_handle(CanvasPoint::new(2, 2), &shape, HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Corner(Corner::Nw))
        );
    }

    #[test]
    fn test_hit_handle_line_endpoints() {
        let line = Shape::Line(Line::new(
            CanvasPoint::new(10, 10),
            CanvasPoint::new(90, 40),
            ShapeStyle::new("transparent", "#7c3aed", 2),
        ));
        assert_eq!(
            hit_handle(CanvasPoint::new(88, 44), &line, HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Endpoint(Endpoint::End))
        );
        assert_eq!(
            hit_handle(CanvasPoint::new(10, 16), &line, HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Endpoint(Endpoint::Start))
        );
    }
}
