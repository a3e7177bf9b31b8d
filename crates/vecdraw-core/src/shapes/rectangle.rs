//! Rectangle shape.

use super::{CanvasPoint, Frame, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left anchor and size.
    #[serde(flatten)]
    pub frame: Frame,
    /// Style properties.
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(frame: Frame, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame,
            style,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: CanvasPoint, p2: CanvasPoint, style: ShapeStyle) -> Self {
        Self::new(Frame::from_corners(p1, p2), style)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.frame.as_rect()
    }

    fn hit_test(&self, point: CanvasPoint, _padding: i32) -> bool {
        self.frame.contains(point)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.frame.translate(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ShapeStyle {
        ShapeStyle::new("#000000", "none", 1)
    }

    #[test]
    fn test_rectangle_from_corners() {
        let rect = Rectangle::from_corners(CanvasPoint::new(100, 100), CanvasPoint::new(50, 50), style());
        assert_eq!(rect.frame, Frame::new(50, 50, 50, 50));
    }

    #[test]
    fn test_hit_test() {
        let rect = Rectangle::new(Frame::new(0, 0, 100, 100), style());
        assert!(rect.hit_test(CanvasPoint::new(50, 50), 0));
        assert!(rect.hit_test(CanvasPoint::new(100, 100), 0));
        assert!(!rect.hit_test(CanvasPoint::new(150, 50), 0));
        // Padding only applies to lines.
        assert!(!rect.hit_test(CanvasPoint::new(103, 50), 5));
    }

    #[test]
    fn test_bounds() {
        let rect = Rectangle::new(Frame::new(10, 20, 100, 50), style());
        let bounds = rect.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate() {
        let mut rect = Rectangle::new(Frame::new(10, 20, 5, 5), style());
        rect.translate(-4, 6);
        assert_eq!(rect.frame, Frame::new(6, 26, 5, 5));
    }
}
