//! Text shape.

use super::{CanvasPoint, Frame, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single run of text. The frame height doubles as the font size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    #[serde(flatten)]
    pub frame: Frame,
    /// The text content.
    pub content: String,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Text {
    /// Narrowest frame a text shape is given, so short strings stay pickable.
    pub const MIN_WIDTH: i32 = 20;

    /// Create a new text shape anchored at `origin`.
    pub fn new(origin: CanvasPoint, content: impl Into<String>, font_size: i32, style: ShapeStyle) -> Self {
        let content = content.into();
        let width = Self::approximate_width(&content, font_size).max(Self::MIN_WIDTH);
        Self {
            id: Uuid::new_v4(),
            frame: Frame::new(origin.x, origin.y, width, font_size),
            content,
            style,
        }
    }

    /// Font size in canvas units.
    pub fn font_size(&self) -> i32 {
        self.frame.height
    }

    /// Replace the content and re-estimate the width.
    pub fn set_content(&mut self, content: String) {
        self.frame.width = Self::approximate_width(&content, self.font_size()).max(Self::MIN_WIDTH);
        self.content = content;
    }

    /// Rough width from the widest line, assuming glyphs average a little
    /// over half the font size.
    pub fn approximate_width(content: &str, font_size: i32) -> i32 {
        let widest = content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let widest = i32::try_from(widest).unwrap_or(i32::MAX);
        widest
            .saturating_mul(font_size.max(0))
            .saturating_mul(11)
            / 20
    }
}

impl ShapeTrait for Text {
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
