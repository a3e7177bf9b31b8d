//! Line shape.

use super::{CanvasPoint, ShapeId, ShapeStyle, ShapeTrait, shift_coord};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight segment between a start point and an end point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point x.
    pub x: i32,
    /// Start point y.
    pub y: i32,
    pub end_x: i32,
    pub end_y: i32,
    /// Style properties.
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: CanvasPoint, end: CanvasPoint, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: start.x,
            y: start.y,
            end_x: end.x,
            end_y: end.y,
            style,
        }
    }

    pub fn start(&self) -> CanvasPoint {
        CanvasPoint::new(self.x, self.y)
    }

    pub fn end(&self) -> CanvasPoint {
        CanvasPoint::new(self.end_x, self.end_y)
    }

    /// Move only the start point.
    pub fn move_start(&mut self, dx: i32, dy: i32) {
        self.x = shift_coord(self.x, dx);
        self.y = shift_coord(self.y, dy);
    }

    /// Move only the end point.
    pub fn move_end(&mut self, dx: i32, dy: i32) {
        self.end_x = shift_coord(self.end_x, dx);
        self.end_y = shift_coord(self.end_y, dy);
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        // Rect::new normalizes reversed endpoints.
        Rect::from_points(self.start().to_kurbo(), self.end().to_kurbo())
    }

    /// Padded bounding box of the endpoints, a cheap stand-in for
    /// distance-to-segment.
    fn hit_test(&self, point: CanvasPoint, padding: i32) -> bool {
        let left = self.x.min(self.end_x).saturating_sub(padding);
        let right = self.x.max(self.end_x).saturating_add(padding);
        let top = self.y.min(self.end_y).saturating_sub(padding);
        let bottom = self.y.max(self.end_y).saturating_add(padding);
        left <= point.x && point.x <= right && top <= point.y && point.y <= bottom
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.move_start(dx, dy);
        self.move_end(dx, dy);
    }
}
