//! The ordered shape sequence and the current selection.

use crate::shapes::{COORD_LIMIT, Frame, Shape, ShapeId};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// A full copy of the shape sequence.
///
/// Shapes are reference counted, so taking a snapshot only copies pointers.
/// Every in-place edit goes through [`Arc::make_mut`], which clones a shape
/// the first time it is touched while a snapshot still shares it.
pub type Snapshot = Vec<Arc<Shape>>;

/// Errors from parsing a property edit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    #[error("Unknown property: {0}")]
    UnknownProperty(String),
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

/// Editable shape fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeProperty {
    Fill,
    Stroke,
    StrokeWidth,
    X,
    Y,
    Width,
    Height,
    EndX,
    EndY,
    Content,
    Src,
}

impl ShapeProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeProperty::Fill => "fill",
            ShapeProperty::Stroke => "stroke",
            ShapeProperty::StrokeWidth => "strokeWidth",
            ShapeProperty::X => "x",
            ShapeProperty::Y => "y",
            ShapeProperty::Width => "width",
            ShapeProperty::Height => "height",
            ShapeProperty::EndX => "endX",
            ShapeProperty::EndY => "endY",
            ShapeProperty::Content => "content",
            ShapeProperty::Src => "src",
        }
    }
}

impl FromStr for ShapeProperty {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "fill" => ShapeProperty::Fill,
            "stroke" => ShapeProperty::Stroke,
            "strokeWidth" | "stroke_width" => ShapeProperty::StrokeWidth,
            "x" => ShapeProperty::X,
            "y" => ShapeProperty::Y,
            "width" => ShapeProperty::Width,
            "height" => ShapeProperty::Height,
            "endX" | "end_x" => ShapeProperty::EndX,
            "endY" | "end_y" => ShapeProperty::EndY,
            "content" => ShapeProperty::Content,
            "src" => ShapeProperty::Src,
            other => return Err(PropertyError::UnknownProperty(other.to_string())),
        })
    }
}

/// A sparse update: every `Some` field replaces the matching field on the
/// target shape. Fields the target's variant does not have are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapePatch {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<u32>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub end_x: Option<i32>,
    pub end_y: Option<i32>,
    pub content: Option<String>,
    pub src: Option<String>,
}

impl ShapePatch {
    /// Build a single-field patch from a property key and a loosely typed
    /// value. Integer fields accept JSON numbers or numeric strings.
    pub fn from_property(key: &str, value: &Value) -> Result<Self, PropertyError> {
        let property: ShapeProperty = key.parse()?;
        let mut patch = Self::default();
        match property {
            ShapeProperty::Fill => patch.fill = Some(string_value(property, value)?),
            ShapeProperty::Stroke => patch.stroke = Some(string_value(property, value)?),
            ShapeProperty::Content => patch.content = Some(string_value(property, value)?),
            ShapeProperty::Src => patch.src = Some(string_value(property, value)?),
            ShapeProperty::StrokeWidth => {
                let v = non_negative(property, int_value(property, value)?)?;
                patch.stroke_width = Some(v.unsigned_abs());
            }
            ShapeProperty::Width => {
                patch.width = Some(non_negative(property, int_value(property, value)?)?);
            }
            ShapeProperty::Height => {
                patch.height = Some(non_negative(property, int_value(property, value)?)?);
            }
            ShapeProperty::X => patch.x = Some(int_value(property, value)?),
            ShapeProperty::Y => patch.y = Some(int_value(property, value)?),
            ShapeProperty::EndX => patch.end_x = Some(int_value(property, value)?),
            ShapeProperty::EndY => patch.end_y = Some(int_value(property, value)?),
        }
        Ok(patch)
    }

    /// Apply the patch to a shape in place.
    pub fn apply(&self, shape: &mut Shape) {
        let style = shape.style_mut();
        if let Some(fill) = &self.fill {
            style.fill.clone_from(fill);
        }
        if let Some(stroke) = &self.stroke {
            style.stroke.clone_from(stroke);
        }
        if let Some(width) = self.stroke_width {
            style.stroke_width = width;
        }

        match shape {
            Shape::Line(line) => {
                line.x = self.x.unwrap_or(line.x);
                line.y = self.y.unwrap_or(line.y);
                line.end_x = self.end_x.unwrap_or(line.end_x);
                line.end_y = self.end_y.unwrap_or(line.end_y);
            }
            Shape::Pencil(pencil) => {
                // Moving or resizing a stroke carries its points along.
                let frame = pencil.frame();
                let mut target = frame;
                self.apply_frame(&mut target);
                if target != frame {
                    pencil.fit_to_frame(target);
                }
            }
            Shape::Text(text) => {
                self.apply_frame(&mut text.frame);
                if let Some(content) = &self.content {
                    text.set_content(content.clone());
                }
            }
            Shape::Image(image) => {
                self.apply_frame(&mut image.frame);
                if let Some(src) = &self.src {
                    image.src.clone_from(src);
                }
            }
            Shape::Rectangle(s) => self.apply_frame(&mut s.frame),
            Shape::Ellipse(s) => self.apply_frame(&mut s.frame),
            Shape::Triangle(s) => self.apply_frame(&mut s.frame),
        }
    }

    fn apply_frame(&self, frame: &mut Frame) {
        frame.x = self.x.unwrap_or(frame.x);
        frame.y = self.y.unwrap_or(frame.y);
        frame.width = self.width.unwrap_or(frame.width);
        frame.height = self.height.unwrap_or(frame.height);
    }
}

fn string_value(property: ShapeProperty, value: &Value) -> Result<String, PropertyError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PropertyError::InvalidValue {
            key: property.as_str().to_string(),
            expected: "string",
        })
}

fn int_value(property: ShapeProperty, value: &Value) -> Result<i32, PropertyError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| (-COORD_LIMIT..=COORD_LIMIT).contains(v))
        .ok_or_else(|| PropertyError::InvalidValue {
            key: property.as_str().to_string(),
            expected: "integer within the canvas range",
        })
}

fn non_negative(property: ShapeProperty, value: i32) -> Result<i32, PropertyError> {
    if value < 0 {
        return Err(PropertyError::InvalidValue {
            key: property.as_str().to_string(),
            expected: "non-negative integer",
        });
    }
    Ok(value)
}

/// The canonical ordered shape list plus the current selection.
///
/// Order is z-order: later shapes draw on top and are hit first.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Arc<Shape>>,
    selected: Option<ShapeId>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top and select it.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(Arc::new(shape));
        self.selected = Some(id);
        id
    }

    /// Append a shape on top without touching the selection.
    pub fn append(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(Arc::new(shape));
        id
    }

    /// Remove a shape. Clears the selection if it pointed at the shape.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        let shape = self.shapes.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(Arc::unwrap_or_clone(shape))
    }

    /// Apply a patch to the matching shape. Returns `false` when no shape
    /// has that id.
    pub fn update(&mut self, id: ShapeId, patch: &ShapePatch) -> bool {
        match self.get_mut(id) {
            Some(shape) => {
                patch.apply(shape);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id).map(AsRef::as_ref)
    }

    /// Mutable access to a shape, unsharing it from any snapshot first.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        let index = self.index_of(id)?;
        Some(Arc::make_mut(&mut self.shapes[index]))
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// The selected shape, if the selection still resolves.
    pub fn selected(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    /// Select a shape by id. Returns `false` (and leaves the selection
    /// alone) when the id does not resolve.
    pub fn select(&mut self, id: ShapeId) -> bool {
        if self.index_of(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drop every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.selected = None;
    }

    pub fn shapes(&self) -> &[Arc<Shape>] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shapes.clone()
    }

    /// Replace the whole sequence. The selection is cleared.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.shapes = snapshot;
        self.selected = None;
    }

    /// Structural comparison against a snapshot.
    pub fn matches(&self, snapshot: &[Arc<Shape>]) -> bool {
        self.shapes.len() == snapshot.len()
            && self
                .shapes
                .iter()
                .zip(snapshot)
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}
