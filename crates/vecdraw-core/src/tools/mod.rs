//! Tool system for the editor.

use crate::selection::HandleKind;
use crate::settings::EditorSettings;
use crate::shapes::{
    CanvasPoint, Ellipse, Frame, Line, Pencil, Rectangle, Shape, Text, Triangle,
};
use crate::store::Snapshot;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Line,
    Triangle,
    Text,
    Pencil,
    Hand,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Line,
        ToolKind::Triangle,
        ToolKind::Text,
        ToolKind::Pencil,
        ToolKind::Hand,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Line => "line",
            ToolKind::Triangle => "triangle",
            ToolKind::Text => "text",
            ToolKind::Pencil => "pencil",
            ToolKind::Hand => "hand",
        }
    }

    /// Tools that draw a shape by dragging out two corners.
    pub fn is_drag_drawn(self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Line | ToolKind::Triangle
        )
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// State of a pointer interaction. Gesture states carry the shape sequence
/// as it was when the gesture began, so history can be pushed on release.
#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// Panning with the hand tool; `last` is the previous raw pointer.
    Panning { last: Point },
    /// Drawing a new shape.
    Drawing {
        start: CanvasPoint,
        current: CanvasPoint,
        before: Snapshot,
    },
    /// Moving the selected shape; `last` is the previous canvas pointer.
    Dragging { last: CanvasPoint, before: Snapshot },
    /// Resizing the selected shape through a handle.
    Resizing {
        handle: HandleKind,
        last: CanvasPoint,
        before: Snapshot,
    },
}

/// What a renderer needs to draw the in-progress shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub tool: ToolKind,
    pub anchor: CanvasPoint,
    pub current: CanvasPoint,
    /// Points visited so far (pencil only).
    pub points: Vec<CanvasPoint>,
}

/// Manages the current tool and its state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the interaction.
    pub state: InteractionState,
    /// Accumulated points for pencil drawing.
    pencil_points: Vec<CanvasPoint>,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, abandoning any interaction in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.reset();
    }

    /// Return to `Idle` and drop the pencil buffer.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.pencil_points.clear();
    }

    /// Start a drawing gesture at `point`.
    pub fn begin_drawing(&mut self, point: CanvasPoint, before: Snapshot) {
        self.pencil_points.clear();
        if self.current_tool == ToolKind::Pencil {
            self.pencil_points.push(point);
        }
        self.state = InteractionState::Drawing {
            start: point,
            current: point,
            before,
        };
    }

    /// Record the latest pointer position while drawing.
    pub fn update_drawing(&mut self, point: CanvasPoint) {
        if let InteractionState::Drawing { current, .. } = &mut self.state {
            *current = point;
            if self.current_tool == ToolKind::Pencil {
                self.pencil_points.push(point);
            }
        }
    }

    /// Record the release position of a drawing gesture. Only move events
    /// add pencil points; the release position sets the box corner.
    pub fn finish_drawing_at(&mut self, point: CanvasPoint) {
        if let InteractionState::Drawing { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, InteractionState::Idle)
    }

    /// Get the accumulated pencil points.
    pub fn pencil_points(&self) -> &[CanvasPoint] {
        &self.pencil_points
    }

    /// Anchor and current point of the drawing gesture, if one is active.
    pub fn preview(&self) -> Option<Preview> {
        match &self.state {
            InteractionState::Drawing { start, current, .. } => Some(Preview {
                tool: self.current_tool,
                anchor: *start,
                current: *current,
                points: self.pencil_points.clone(),
            }),
            _ => None,
        }
    }

    /// The shape that releasing the pointer now would produce, ignoring the
    /// minimum drag distance.
    pub fn preview_shape(&self, settings: &EditorSettings) -> Option<Shape> {
        let preview = self.preview()?;
        if self.current_tool == ToolKind::Pencil {
            return self.create_pencil(settings);
        }
        self.create_shape(preview.anchor, preview.current, settings)
    }

    /// Create a drag-drawn shape spanning `start` to `end` with the current
    /// tool.
    pub fn create_shape(&self, start: CanvasPoint, end: CanvasPoint, settings: &EditorSettings) -> Option<Shape> {
        let frame = Frame::from_corners(start, end);
        match self.current_tool {
            ToolKind::Rectangle => Some(Shape::Rectangle(Rectangle::new(frame, settings.drawn_style()))),
            ToolKind::Ellipse => Some(Shape::Ellipse(Ellipse::new(frame, settings.drawn_style()))),
            ToolKind::Triangle => Some(Shape::Triangle(Triangle::new(frame, settings.drawn_outline_style()))),
            ToolKind::Line => Some(Shape::Line(Line::new(start, end, settings.drawn_outline_style()))),
            ToolKind::Select | ToolKind::Text | ToolKind::Pencil | ToolKind::Hand => None,
        }
    }

    /// Like [`ToolManager::create_shape`], but discards boxes that do not
    /// exceed the minimum drag distance on either axis. Lines are always
    /// kept.
    pub fn commit_shape(&self, start: CanvasPoint, end: CanvasPoint, settings: &EditorSettings) -> Option<Shape> {
        let width = end.x.saturating_sub(start.x).saturating_abs();
        let height = end.y.saturating_sub(start.y).saturating_abs();
        let min = settings.min_drag_distance;
        if width > min || height > min || self.current_tool == ToolKind::Line {
            self.create_shape(start, end, settings)
        } else {
            None
        }
    }

    /// Build a pencil stroke from the accumulated points.
    pub fn create_pencil(&self, settings: &EditorSettings) -> Option<Shape> {
        Pencil::from_points(self.pencil_points.clone(), settings.drawn_style()).map(Shape::Pencil)
    }

    /// Build the placeholder text shape placed by the text tool.
    pub fn create_text(&self, at: CanvasPoint, settings: &EditorSettings) -> Shape {
        Shape::Text(Text::new(
            at,
            settings.default_text_content.clone(),
            settings.default_font_size,
            settings.drawn_style(),
        ))
    }
}
