//! Ellipse shape.

use super::{CanvasPoint, Frame, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned ellipse inscribed in its frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Bounding box of the ellipse.
    #[serde(flatten)]
    pub frame: Frame,
    /// Style properties.
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(frame: Frame, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame,
            style,
        }
    }

    /// Center in canvas coordinates.
    pub fn center(&self) -> Point {
        self.frame.as_rect().center()
    }

    /// Horizontal and vertical radii.
    pub fn radii(&self) -> (f64, f64) {
        (
            f64::from(self.frame.width) / 2.0,
            f64::from(self.frame.height) / 2.0,
        )
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.frame.as_rect()
    }

    fn hit_test(&self, point: CanvasPoint, _padding: i32) -> bool {
        let (rx, ry) = self.radii();
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let center = self.center();
        let dx = (f64::from(point.x) - center.x) / rx;
        let dy = (f64::from(point.y) - center.y) / ry;
        dx * dx + dy * dy <= 1.0
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
