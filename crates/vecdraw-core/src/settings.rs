//! Tunable editor settings.

use crate::history::MAX_UNDO_HISTORY;
use crate::hit::LINE_HIT_PADDING;
use crate::selection::HANDLE_HIT_TOLERANCE;
use crate::shapes::{DRAWN_FILL, DRAWN_STROKE, ShapeStyle, TRANSPARENT};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Settings for one editing session. Every field has a default, so a
/// partial JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Offset of the canvas inside the host surface.
    pub canvas_origin: Vec2,
    /// Per-axis distance at which a resize handle is grabbed.
    pub handle_tolerance: i32,
    /// Padding around a line's endpoint box that still counts as a hit.
    pub line_hit_padding: i32,
    /// A drawn box must exceed this on at least one axis to be kept.
    pub min_drag_distance: i32,
    /// Maximum undo depth. Zero keeps everything.
    pub max_history: usize,
    /// Placeholder content for text placed with the text tool.
    pub default_text_content: String,
    pub default_font_size: i32,
    /// Fill of drawn boxes.
    pub drawn_fill: String,
    /// Stroke of every drawn shape.
    pub drawn_stroke: String,
    pub drawn_stroke_width: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas_origin: Vec2::new(96.0, 64.0),
            handle_tolerance: HANDLE_HIT_TOLERANCE,
            line_hit_padding: LINE_HIT_PADDING,
            min_drag_distance: 2,
            max_history: MAX_UNDO_HISTORY,
            default_text_content: "Double click to edit".to_string(),
            default_font_size: 24,
            drawn_fill: DRAWN_FILL.to_string(),
            drawn_stroke: DRAWN_STROKE.to_string(),
            drawn_stroke_width: 2,
        }
    }
}

impl EditorSettings {
    /// Style for a box shape drawn with the pointer.
    pub fn drawn_style(&self) -> ShapeStyle {
        ShapeStyle::new(self.drawn_fill.clone(), self.drawn_stroke.clone(), self.drawn_stroke_width)
    }

    /// Style for lines and triangles drawn with the pointer.
    pub fn drawn_outline_style(&self) -> ShapeStyle {
        ShapeStyle::new(TRANSPARENT, self.drawn_stroke.clone(), self.drawn_stroke_width)
    }
}
