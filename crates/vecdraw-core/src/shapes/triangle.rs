//! Triangle shape.

use super::{CanvasPoint, Frame, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An isosceles triangle: apex at the top-centre of its frame, base along
/// the bottom edge. Picked by its bounding box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Triangle {
    pub fn new(frame: Frame, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame,
            style,
        }
    }

    /// The three vertices: apex, bottom-right, bottom-left.
    pub fn vertices(&self) -> [CanvasPoint; 3] {
        let Frame { x, y, width, height } = self.frame;
        let (right, bottom) = (x.saturating_add(width), y.saturating_add(height));
        [
            CanvasPoint::new(x.saturating_add(width / 2), y),
            CanvasPoint::new(right, bottom),
            CanvasPoint::new(x, bottom),
        ]
    }
}

impl ShapeTrait for Triangle {
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
