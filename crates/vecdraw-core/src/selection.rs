//! Selection handles and resize application.

use crate::shapes::{CanvasPoint, Shape, shift_coord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle hit tolerance per axis, in canvas units.
pub const HANDLE_HIT_TOLERANCE: i32 = 6;

/// Corner positions of a bbox shape, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Corner {
    /// All corners in hit-test priority order.
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw];

    pub fn as_str(self) -> &'static str {
        match self {
            Corner::Nw => "nw",
            Corner::Ne => "ne",
            Corner::Se => "se",
            Corner::Sw => "sw",
        }
    }

    pub fn is_north(self) -> bool {
        matches!(self, Corner::Nw | Corner::Ne)
    }

    pub fn is_west(self) -> bool {
        matches!(self, Corner::Nw | Corner::Sw)
    }

    /// Swap the east/west designator.
    pub fn flip_horizontal(self) -> Self {
        match self {
            Corner::Nw => Corner::Ne,
            Corner::Ne => Corner::Nw,
            Corner::Se => Corner::Sw,
            Corner::Sw => Corner::Se,
        }
    }

    /// Swap the north/south designator.
    pub fn flip_vertical(self) -> Self {
        match self {
            Corner::Nw => Corner::Sw,
            Corner::Sw => Corner::Nw,
            Corner::Ne => Corner::Se,
            Corner::Se => Corner::Ne,
        }
    }
}

/// Line endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Start,
    End,
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandleKind {
    /// Endpoint handle for lines.
    Endpoint(Endpoint),
    /// Corner handle for bbox shapes.
    Corner(Corner),
}

impl HandleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HandleKind::Endpoint(Endpoint::Start) => "start",
            HandleKind::Endpoint(Endpoint::End) => "end",
            HandleKind::Corner(c) => c.as_str(),
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: CanvasPoint,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: CanvasPoint, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point is within `tolerance` of this handle on both axes.
    pub fn hit_test(&self, point: CanvasPoint, tolerance: i32) -> bool {
        let tolerance = tolerance.unsigned_abs();
        point.x.abs_diff(self.position.x) <= tolerance && point.y.abs_diff(self.position.y) <= tolerance
    }
}

/// Get the selection handles for a shape, in hit-test priority order.
pub fn get_handles(shape: &Shape) -> Vec<Handle> {
    match shape {
        Shape::Line(line) => vec![
            Handle::new(line.start(), HandleKind::Endpoint(Endpoint::Start)),
            Handle::new(line.end(), HandleKind::Endpoint(Endpoint::End)),
        ],
        other => {
            let Some(f) = other.frame() else {
                return Vec::new();
            };
            Corner::ALL
                .iter()
                .map(|&corner| {
                    let x = if corner.is_west() { f.x } else { f.x.saturating_add(f.width) };
                    let y = if corner.is_north() { f.y } else { f.y.saturating_add(f.height) };
                    Handle::new(CanvasPoint::new(x, y), HandleKind::Corner(corner))
                })
                .collect()
        }
    }
}

/// Apply one resize step of `(dx, dy)` through `handle`.
///
/// Returns the handle that should drive the next step: when an edge is
/// dragged past the opposite one the dimension is flipped back to positive
/// and the corner's designator on that axis is swapped, so the same pointer
/// keeps moving the same physical edge.
pub fn apply_resize(shape: &mut Shape, handle: HandleKind, dx: i32, dy: i32) -> HandleKind {
    match (shape, handle) {
        (Shape::Line(line), HandleKind::Endpoint(Endpoint::Start)) => {
            line.move_start(dx, dy);
            handle
        }
        (Shape::Line(line), HandleKind::Endpoint(Endpoint::End)) => {
            line.move_end(dx, dy);
            handle
        }
        (shape, HandleKind::Corner(corner)) => {
            let Some(mut f) = shape.frame() else {
                return handle;
            };
            if corner.is_north() {
                f.y = shift_coord(f.y, dy);
                f.height = shift_coord(f.height, dy.saturating_neg());
            } else {
                f.height = shift_coord(f.height, dy);
            }
            if corner.is_west() {
                f.x = shift_coord(f.x, dx);
                f.width = shift_coord(f.width, dx.saturating_neg());
            } else {
                f.width = shift_coord(f.width, dx);
            }

            let mut next = corner;
            if f.width < 0 {
                next = next.flip_horizontal();
            }
            if f.height < 0 {
                next = next.flip_vertical();
            }

            match shape {
                // Pencil strokes mirror through a negative frame themselves.
                Shape::Pencil(p) => p.fit_to_frame(f),
                other => other.set_frame(f.normalized()),
            }
            HandleKind::Corner(next)
        }
        // Endpoint handles only exist on lines.
        (_, HandleKind::Endpoint(_)) => handle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{COORD_LIMIT, Frame, Line, Pencil, Rectangle, ShapeStyle};

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Shape {
        Shape::Rectangle(Rectangle::new(
            Frame::new(x, y, w, h),
            ShapeStyle::new("#e9d5ff", "#7c3aed", 2),
        ))
    }

    #[test]
    fn test_rectangle_handles() {
        let handles = get_handles(&rect(10, 20, 100, 50));
        assert_eq!(handles.len(), 4);
        assert_eq!(handles[0].position, CanvasPoint::new(10, 20));
        assert_eq!(handles[1].position, CanvasPoint::new(110, 20));
        assert_eq!(handles[2].position, CanvasPoint::new(110, 70));
        assert_eq!(handles[3].position, CanvasPoint::new(10, 70));
        assert_eq!(handles[2].kind, HandleKind::Corner(Corner::Se));
    }

    #[test]
    fn test_line_handles() {
        let line = Shape::Line(Line::new(
            CanvasPoint::new(0, 0),
            CanvasPoint::new(100, 100),
            ShapeStyle::new("transparent", "#7c3aed", 2),
        ));
        let handles = get_handles(&line);
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].kind, HandleKind::Endpoint(Endpoint::Start));
        assert_eq!(handles[1].position, CanvasPoint::new(100, 100));
    }

    #[test]
    fn test_handle_hit_test() {
        let handle = Handle::new(CanvasPoint::new(50, 50), HandleKind::Corner(Corner::Nw));
        assert!(handle.hit_test(CanvasPoint::new(56, 44), 6));
        assert!(!handle.hit_test(CanvasPoint::new(57, 50), 6));
    }

    #[test]
    fn test_resize_each_corner() {
        let mut shape = rect(0, 0, 100, 100);
        apply_resize(&mut shape, HandleKind::Corner(Corner::Se), 10, 20);
        assert_eq!(shape.frame(), Some(Frame::new(0, 0, 110, 120)));

        let mut shape = rect(0, 0, 100, 100);
        apply_resize(&mut shape, HandleKind::Corner(Corner::Nw), 10, 20);
        assert_eq!(shape.frame(), Some(Frame::new(10, 20, 90, 80)));

        let mut shape = rect(0, 0, 100, 100);
        apply_resize(&mut shape, HandleKind::Corner(Corner::Ne), 10, 20);
        assert_eq!(shape.frame(), Some(Frame::new(0, 20, 110, 80)));

        let mut shape = rect(0, 0, 100, 100);
        apply_resize(&mut shape, HandleKind::Corner(Corner::Sw), 10, 20);
        assert_eq!(shape.frame(), Some(Frame::new(10, 0, 90, 120)));
    }

    #[test]
    fn test_resize_flip_swaps_handle() {
        let mut shape = rect(0, 0, 10, 10);
        let next = apply_resize(&mut shape, HandleKind::Corner(Corner::Nw), 15, 0);
        assert_eq!(shape.frame(), Some(Frame::new(10, 0, 5, 10)));
        assert_eq!(next, HandleKind::Corner(Corner::Ne));

        // The swapped handle keeps driving the same edge.
        let next = apply_resize(&mut shape, HandleKind::Corner(Corner::Ne), 5, 0);
        assert_eq!(shape.frame(), Some(Frame::new(10, 0, 10, 10)));
        assert_eq!(next, HandleKind::Corner(Corner::Ne));
    }

    #[test]
    fn test_resize_flip_both_axes() {
        let mut shape = rect(0, 0, 10, 10);
        let next = apply_resize(&mut shape, HandleKind::Corner(Corner::Se), -30, -40);
        assert_eq!(shape.frame(), Some(Frame::new(-20, -30, 20, 30)));
        assert_eq!(next, HandleKind::Corner(Corner::Nw));
    }

    #[test]
    fn test_resize_extreme_deltas_stay_in_range() {
        let mut shape = rect(0, 0, 10, 10);
        apply_resize(&mut shape, HandleKind::Corner(Corner::Nw), i32::MIN, i32::MAX);
        let f = shape.frame().unwrap();
        assert!(f.width >= 0 && f.height >= 0);
        assert!(f.x >= -COORD_LIMIT && f.y >= -COORD_LIMIT);
        assert_eq!(f.x, -COORD_LIMIT);
        assert_eq!(f.width, COORD_LIMIT);

        let mut line = Shape::Line(Line::new(
            CanvasPoint::new(0, 0),
            CanvasPoint::new(10, 10),
            ShapeStyle::new("transparent", "#7c3aed", 2),
        ));
        apply_resize(&mut line, HandleKind::Endpoint(Endpoint::Start), i32::MAX, i32::MIN);
        assert_eq!(line.as_line().unwrap().start(), CanvasPoint::new(COORD_LIMIT, -COORD_LIMIT));
    }

    #[test]
    fn test_resize_line_endpoint() {
        let mut line = Shape::Line(Line::new(
            CanvasPoint::new(0, 0),
            CanvasPoint::new(10, 10),
            ShapeStyle::new("transparent", "#7c3aed", 2),
        ));
        let next = apply_resize(&mut line, HandleKind::Endpoint(Endpoint::End), 5, -5);
        assert_eq!(next, HandleKind::Endpoint(Endpoint::End));
        let l = line.as_line().unwrap();
        assert_eq!(l.start(), CanvasPoint::new(0, 0));
        assert_eq!(l.end(), CanvasPoint::new(15, 5));
    }

    #[test]
    fn test_pencil_resize() {
        let pts = vec![CanvasPoint::new(0, 0), CanvasPoint::new(10, 10)];
        let mut shape = Shape::Pencil(
            Pencil::from_points(pts, ShapeStyle::new("#e9d5ff", "#7c3aed", 2)).unwrap(),
        );
        apply_resize(&mut shape, HandleKind::Corner(Corner::Se), 10, 10);
        assert_eq!(shape.frame(), Some(Frame::new(0, 0, 20, 20)));
        assert_eq!(shape.as_pencil().unwrap().path_data(), "M 0 0 L 20 20");
    }
}
