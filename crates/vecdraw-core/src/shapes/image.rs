//! Image shape referencing an externally stored asset.

use super::{CanvasPoint, Frame, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A placed image. `src` is an opaque key into external asset storage; the
/// editor never touches the bytes behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ShapeId,
    #[serde(flatten)]
    pub frame: Frame,
    /// Asset key.
    pub src: String,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Image {
    /// Create a new image shape.
    pub fn new(frame: Frame, src: impl Into<String>, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame,
            src: src.into(),
            style,
        }
    }
}

impl ShapeTrait for Image {
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
