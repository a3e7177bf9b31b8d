//! Shape definitions for the editor.
//!
//! Every shape is one variant of [`Shape`]. Variants that are described by a
//! top-left anchor plus a width and height share the [`Frame`] geometry;
//! lines carry two endpoints and pencil strokes carry their point list along
//! with a derived bounding frame.

mod ellipse;
mod image;
mod line;
mod pencil;
mod rectangle;
mod text;
mod triangle;

pub use ellipse::Ellipse;
pub use image::Image;
pub use line::Line;
pub use pencil::Pencil;
pub use rectangle::Rectangle;
pub use text::Text;
pub use triangle::Triangle;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Pale violet fill given to box shapes drawn with the pointer.
pub const DRAWN_FILL: &str = "#e9d5ff";
/// Violet stroke given to every shape drawn with the pointer.
pub const DRAWN_STROKE: &str = "#7c3aed";
/// Fill used by lines and triangles drawn with the pointer.
pub const TRANSPARENT: &str = "transparent";

/// Largest coordinate magnitude the canvas stores. Ops and property edits
/// beyond it are rejected; pointer input and edits are clamped to it, which
/// keeps any sum or difference of stored values inside `i32`.
pub const COORD_LIMIT: i32 = 1 << 24;

/// Clamp a coordinate or extent into `-COORD_LIMIT..=COORD_LIMIT`.
pub fn clamp_coord(v: i32) -> i32 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT)
}

/// `v + delta`, saturating and then clamped.
pub fn shift_coord(v: i32, delta: i32) -> i32 {
    clamp_coord(v.saturating_add(delta))
}

/// An integer point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: i32,
    pub y: i32,
}

impl CanvasPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The same point shifted by a delta.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(shift_coord(self.x, dx), shift_coord(self.y, dy))
    }

    /// Convert to a kurbo point.
    pub fn to_kurbo(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Style properties shared by all shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Fill paint (CSS colour, `"transparent"` or `"none"`).
    pub fill: String,
    /// Stroke paint.
    pub stroke: String,
    /// Stroke width in canvas units.
    pub stroke_width: u32,
}

impl ShapeStyle {
    pub fn new(fill: impl Into<String>, stroke: impl Into<String>, stroke_width: u32) -> Self {
        Self {
            fill: fill.into(),
            stroke: stroke.into(),
            stroke_width,
        }
    }
}

/// Axis-aligned box geometry: top-left anchor plus size.
///
/// Width and height are never negative once a gesture or command has
/// committed; they only go negative transiently inside a resize step,
/// which corrects them before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a frame spanning two opposite corners, in any order.
    pub fn from_corners(a: CanvasPoint, b: CanvasPoint) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            b.x.saturating_sub(a.x).saturating_abs(),
            b.y.saturating_sub(a.y).saturating_abs(),
        )
    }

    /// The tightest frame containing every point, or `None` for an empty slice.
    pub fn bounding(points: &[CanvasPoint]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        ))
    }

    /// Inclusive containment: points on the border count as inside.
    pub fn contains(&self, p: CanvasPoint) -> bool {
        self.x <= p.x
            && p.x <= self.x.saturating_add(self.width)
            && self.y <= p.y
            && p.y <= self.y.saturating_add(self.height)
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x = shift_coord(self.x, dx);
        self.y = shift_coord(self.y, dy);
    }

    /// The same box with any negative extent flipped to positive.
    pub fn normalized(self) -> Self {
        let mut f = self;
        if f.width < 0 {
            f.width = f.width.saturating_neg();
            f.x = f.x.saturating_sub(f.width);
        }
        if f.height < 0 {
            f.height = f.height.saturating_neg();
            f.y = f.y.saturating_sub(f.height);
        }
        f
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.width),
            f64::from(self.y) + f64::from(self.height),
        )
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a canvas point hits this shape. `padding` widens thin
    /// shapes (lines) so they can be picked.
    fn hit_test(&self, point: CanvasPoint, padding: i32) -> bool;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Move the shape by a delta.
    fn translate(&mut self, dx: i32, dy: i32);
}

/// Discriminator naming each shape variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Triangle,
    Text,
    Pencil,
    Image,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Text => "text",
            ShapeKind::Pencil => "pencil",
            ShapeKind::Image => "image",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Line(Line),
    Triangle(Triangle),
    Text(Text),
    Pencil(Pencil),
    Image(Image),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
            Shape::Line(s) => s.id(),
            Shape::Triangle(s) => s.id(),
            Shape::Text(s) => s.id(),
            Shape::Pencil(s) => s.id(),
            Shape::Image(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Pencil(_) => ShapeKind::Pencil,
            Shape::Image(_) => ShapeKind::Image,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Triangle(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Pencil(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: CanvasPoint, padding: i32) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point, padding),
            Shape::Ellipse(s) => s.hit_test(point, padding),
            Shape::Line(s) => s.hit_test(point, padding),
            Shape::Triangle(s) => s.hit_test(point, padding),
            Shape::Text(s) => s.hit_test(point, padding),
            Shape::Pencil(s) => s.hit_test(point, padding),
            Shape::Image(s) => s.hit_test(point, padding),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
            Shape::Line(s) => s.style(),
            Shape::Triangle(s) => s.style(),
            Shape::Text(s) => s.style(),
            Shape::Pencil(s) => s.style(),
            Shape::Image(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Ellipse(s) => s.style_mut(),
            Shape::Line(s) => s.style_mut(),
            Shape::Triangle(s) => s.style_mut(),
            Shape::Text(s) => s.style_mut(),
            Shape::Pencil(s) => s.style_mut(),
            Shape::Image(s) => s.style_mut(),
        }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        match self {
            Shape::Rectangle(s) => s.translate(dx, dy),
            Shape::Ellipse(s) => s.translate(dx, dy),
            Shape::Line(s) => s.translate(dx, dy),
            Shape::Triangle(s) => s.translate(dx, dy),
            Shape::Text(s) => s.translate(dx, dy),
            Shape::Pencil(s) => s.translate(dx, dy),
            Shape::Image(s) => s.translate(dx, dy),
        }
    }

    /// The box geometry of bbox-family shapes; `None` for lines.
    pub fn frame(&self) -> Option<Frame> {
        match self {
            Shape::Rectangle(s) => Some(s.frame),
            Shape::Ellipse(s) => Some(s.frame),
            Shape::Triangle(s) => Some(s.frame),
            Shape::Text(s) => Some(s.frame),
            Shape::Pencil(s) => Some(s.frame()),
            Shape::Image(s) => Some(s.frame),
            Shape::Line(_) => None,
        }
    }

    /// Replace the box geometry. Pencil strokes rescale their points into
    /// the new frame. No-op for lines.
    pub fn set_frame(&mut self, frame: Frame) {
        match self {
            Shape::Rectangle(s) => s.frame = frame,
            Shape::Ellipse(s) => s.frame = frame,
            Shape::Triangle(s) => s.frame = frame,
            Shape::Text(s) => s.frame = frame,
            Shape::Pencil(s) => s.fit_to_frame(frame),
            Shape::Image(s) => s.frame = frame,
            Shape::Line(_) => {}
        }
    }

    /// Anchor point: top-left for box shapes, start point for lines.
    pub fn anchor(&self) -> CanvasPoint {
        match self {
            Shape::Line(l) => l.start(),
            other => other
                .frame()
                .map(|f| CanvasPoint::new(f.x, f.y))
                .unwrap_or_default(),
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Shape::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_pencil(&self) -> Option<&Pencil> {
        match self {
            Shape::Pencil(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Shape::Image(i) => Some(i),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_from_corners_normalizes() {
        let frame = Frame::from_corners(CanvasPoint::new(110, 110), CanvasPoint::new(10, 10));
        assert_eq!(frame, Frame::new(10, 10, 100, 100));
    }

    #[test]
    fn test_frame_contains_is_inclusive() {
        let frame = Frame::new(0, 0, 10, 10);
        assert!(frame.contains(CanvasPoint::new(0, 0)));
        assert!(frame.contains(CanvasPoint::new(10, 10)));
        assert!(!frame.contains(CanvasPoint::new(11, 5)));
        assert!(!frame.contains(CanvasPoint::new(5, -1)));
    }

    #[test]
    fn test_frame_normalized() {
        assert_eq!(Frame::new(15, 0, -5, -8).normalized(), Frame::new(10, -8, 5, 8));
        assert_eq!(Frame::new(1, 2, 3, 4).normalized(), Frame::new(1, 2, 3, 4));
    }

    #[test]
    fn test_frame_arithmetic_saturates() {
        let mut frame = Frame::new(COORD_LIMIT - 5, -COORD_LIMIT, 10, 10);
        frame.translate(i32::MAX, i32::MIN);
        assert_eq!((frame.x, frame.y), (COORD_LIMIT, -COORD_LIMIT));

        let flipped = Frame::new(i32::MIN, 0, i32::MIN, 5).normalized();
        assert_eq!(flipped.width, i32::MAX);
        assert_eq!(flipped.x, i32::MIN);

        let p = CanvasPoint::new(1, -1).offset(i32::MAX, i32::MIN);
        assert_eq!(p, CanvasPoint::new(COORD_LIMIT, -COORD_LIMIT));
    }

    #[test]
    fn test_frame_bounding() {
        let pts = [
            CanvasPoint::new(5, 9),
            CanvasPoint::new(-3, 2),
            CanvasPoint::new(7, 4),
        ];
        assert_eq!(Frame::bounding(&pts), Some(Frame::new(-3, 2, 10, 7)));
        assert_eq!(Frame::bounding(&[]), None);
    }

    #[test]
    fn test_shape_serializes_with_kind_tag() {
        let rect = Rectangle::new(Frame::new(1, 2, 3, 4), ShapeStyle::new("#000000", "none", 1));
        let json = serde_json::to_value(Shape::Rectangle(rect)).unwrap();
        assert_eq!(json["kind"], "rectangle");
        assert_eq!(json["x"], 1);
        assert_eq!(json["height"], 4);
        assert_eq!(json["strokeWidth"], 1);
    }

    #[test]
    fn test_shape_json_roundtrip_line() {
        let line = Line::new(
            CanvasPoint::new(0, 0),
            CanvasPoint::new(40, 30),
            ShapeStyle::new(TRANSPARENT, DRAWN_STROKE, 2),
        );
        let shape = Shape::Line(line);
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"endX\":40"));
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn test_anchor() {
        let line = Line::new(
            CanvasPoint::new(3, 4),
            CanvasPoint::new(9, 9),
            ShapeStyle::new(TRANSPARENT, DRAWN_STROKE, 2),
        );
        assert_eq!(Shape::Line(line).anchor(), CanvasPoint::new(3, 4));
        let rect = Rectangle::new(Frame::new(7, 8, 1, 1), ShapeStyle::new("#fff", "none", 1));
        assert_eq!(Shape::Rectangle(rect).anchor(), CanvasPoint::new(7, 8));
    }
}
