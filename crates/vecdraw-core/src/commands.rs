//! Batches of drawing operations supplied by external callers.
//!
//! A batch is a JSON array of objects, each naming its operation in an `op`
//! field:
//!
//! ```json
//! [{"op": "addRect", "x": 10, "y": 10, "width": 100, "height": 100, "fill": "red"},
//!  {"op": "addEllipse", "cx": 100, "cy": 100, "rx": 50, "ry": 50},
//!  {"op": "clear"}]
//! ```
//!
//! Every op in a batch is parsed before any is applied, so a malformed
//! batch never leaves the canvas half-updated. Unrecognised op names are
//! not errors: they fall back to a default rectangle and are listed in the
//! [`BatchReport`].

use crate::shapes::{
    COORD_LIMIT, CanvasPoint, Ellipse, Frame, Line, Rectangle, Shape, ShapeId, ShapeStyle, TRANSPARENT,
    Text,
};
use crate::queue::QueueError;
use crate::store::ShapeStore;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use thiserror::Error;

/// Default size of boxes created by ops.
pub const DEFAULT_OP_SIZE: i32 = 100;
/// Default font size of `addText`.
pub const DEFAULT_OP_FONT_SIZE: i32 = 20;
const DEFAULT_OP_FILL: &str = "#000000";
const DEFAULT_OP_STROKE: &str = "none";
const DEFAULT_OP_LINE_STROKE: &str = "#000000";
const DEFAULT_OP_STROKE_WIDTH: u32 = 1;

/// Errors from parsing a batch.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Expected a JSON array of operations")]
    NotABatch,
    #[error("Operation {index} has no \"op\" name")]
    MissingOp { index: usize },
    #[error("Operation {index} ({op}) is malformed: {source}")]
    InvalidOp {
        index: usize,
        op: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Accept any JSON number for an integer field, truncating fractions.
/// Magnitudes beyond [`COORD_LIMIT`] are rejected.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    match value.filter(|v| v.is_finite()).map(f64::trunc) {
        Some(v) if v.abs() > f64::from(COORD_LIMIT) => Err(de::Error::custom(format!(
            "{v} is outside -{COORD_LIMIT}..={COORD_LIMIT}"
        ))),
        other => Ok(other.map(|v| v as i32)),
    }
}

fn lenient_width<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_int(deserializer)?.map(|v| v.unsigned_abs()))
}

/// Paint fields shared by every op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OpStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    #[serde(alias = "stroke_width", rename = "strokeWidth", deserialize_with = "lenient_width")]
    pub stroke_width: Option<u32>,
}

impl OpStyle {
    fn resolve(&self, fill: &str, stroke: &str) -> ShapeStyle {
        ShapeStyle::new(
            self.fill.clone().unwrap_or_else(|| fill.to_string()),
            self.stroke.clone().unwrap_or_else(|| stroke.to_string()),
            self.stroke_width.unwrap_or(DEFAULT_OP_STROKE_WIDTH),
        )
    }
}

/// `addRect` and the unknown-op fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RectOp {
    #[serde(deserialize_with = "lenient_int")]
    pub x: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub y: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub width: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub height: Option<i32>,
    #[serde(flatten)]
    pub style: OpStyle,
}

/// `addEllipse`: center or top-left, radii or size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EllipseOp {
    #[serde(deserialize_with = "lenient_int")]
    pub cx: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub cy: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub x: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub y: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub rx: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub ry: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub width: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub height: Option<i32>,
    #[serde(flatten)]
    pub style: OpStyle,
}

impl EllipseOp {
    /// Resolve the bounding frame. Radii win over sizes and a center wins
    /// over a top-left corner, independently per axis.
    pub fn frame(&self) -> Frame {
        let width = self
            .rx
            .map(|r| r.saturating_mul(2))
            .or(self.width)
            .unwrap_or(DEFAULT_OP_SIZE)
            .saturating_abs();
        let height = self
            .ry
            .map(|r| r.saturating_mul(2))
            .or(self.height)
            .unwrap_or(DEFAULT_OP_SIZE)
            .saturating_abs();
        let x = match self.cx {
            Some(cx) => cx.saturating_sub(width / 2),
            None => self.x.unwrap_or(0),
        };
        let y = match self.cy {
            Some(cy) => cy.saturating_sub(height / 2),
            None => self.y.unwrap_or(0),
        };
        Frame::new(x, y, width, height)
    }
}

/// `addText`. `content` is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextOp {
    pub content: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub x: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub y: Option<i32>,
    #[serde(default, alias = "fontSize", deserialize_with = "lenient_int")]
    pub font_size: Option<i32>,
    #[serde(flatten)]
    pub style: OpStyle,
}

/// `addLine`. The end point defaults to 100 units right and down of the start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LineOp {
    #[serde(deserialize_with = "lenient_int")]
    pub x: Option<i32>,
    #[serde(deserialize_with = "lenient_int")]
    pub y: Option<i32>,
    #[serde(rename = "endX", alias = "end_x", deserialize_with = "lenient_int")]
    pub end_x: Option<i32>,
    #[serde(rename = "endY", alias = "end_y", deserialize_with = "lenient_int")]
    pub end_y: Option<i32>,
    #[serde(flatten)]
    pub style: OpStyle,
}

/// One parsed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    AddRect(RectOp),
    AddEllipse(EllipseOp),
    AddText(TextOp),
    AddLine(LineOp),
    Clear,
    /// An unrecognised op name; applied as a default rectangle.
    Unknown { name: String, fallback: RectOp },
}

impl Op {
    /// Parse the op at position `index` of a batch.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, CommandError> {
        let name = value
            .get("op")
            .and_then(Value::as_str)
            .ok_or(CommandError::MissingOp { index })?;
        let invalid = |source| CommandError::InvalidOp {
            index,
            op: name.to_string(),
            source,
        };
        let op = match name {
            "addRect" => Op::AddRect(RectOp::deserialize(value).map_err(invalid)?),
            "addEllipse" => Op::AddEllipse(EllipseOp::deserialize(value).map_err(invalid)?),
            "addText" => Op::AddText(TextOp::deserialize(value).map_err(invalid)?),
            "addLine" => Op::AddLine(LineOp::deserialize(value).map_err(invalid)?),
            "clear" => Op::Clear,
            other => Op::Unknown {
                name: other.to_string(),
                // The fallback only needs a position; anything unreadable
                // lands at the origin.
                fallback: RectOp::deserialize(value).unwrap_or_default(),
            },
        };
        Ok(op)
    }

    /// The op name as it appears on the wire.
    pub fn name(&self) -> &str {
        match self {
            Op::AddRect(_) => "addRect",
            Op::AddEllipse(_) => "addEllipse",
            Op::AddText(_) => "addText",
            Op::AddLine(_) => "addLine",
            Op::Clear => "clear",
            Op::Unknown { name, .. } => name,
        }
    }

    /// Build the shape this op adds. `clear` adds nothing.
    pub fn to_shape(&self) -> Option<Shape> {
        match self {
            Op::AddRect(op) | Op::Unknown { fallback: op, .. } => Some(rect_shape(op)),
            Op::AddEllipse(op) => Some(Shape::Ellipse(Ellipse::new(
                op.frame(),
                op.style.resolve(DEFAULT_OP_FILL, DEFAULT_OP_STROKE),
            ))),
            Op::AddText(op) => Some(Shape::Text(Text::new(
                CanvasPoint::new(op.x.unwrap_or(0), op.y.unwrap_or(0)),
                op.content.clone(),
                op.font_size.unwrap_or(DEFAULT_OP_FONT_SIZE).max(0),
                op.style.resolve(DEFAULT_OP_FILL, DEFAULT_OP_STROKE),
            ))),
            Op::AddLine(op) => {
                let start = CanvasPoint::new(op.x.unwrap_or(0), op.y.unwrap_or(0));
                let end = CanvasPoint::new(
                    op.end_x.unwrap_or(start.x.saturating_add(DEFAULT_OP_SIZE)),
                    op.end_y.unwrap_or(start.y.saturating_add(DEFAULT_OP_SIZE)),
                );
                Some(Shape::Line(Line::new(
                    start,
                    end,
                    op.style.resolve(TRANSPARENT, DEFAULT_OP_LINE_STROKE),
                )))
            }
            Op::Clear => None,
        }
    }
}

fn rect_shape(op: &RectOp) -> Shape {
    let frame = Frame::new(
        op.x.unwrap_or(0),
        op.y.unwrap_or(0),
        op.width.unwrap_or(DEFAULT_OP_SIZE),
        op.height.unwrap_or(DEFAULT_OP_SIZE),
    )
    .normalized();
    Shape::Rectangle(Rectangle::new(
        frame,
        op.style.resolve(DEFAULT_OP_FILL, DEFAULT_OP_STROKE),
    ))
}

/// Parse every element of a batch.
pub fn parse_ops(values: &[Value]) -> Result<Vec<Op>, CommandError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| Op::from_value(index, value))
        .collect()
}

/// Parse a batch from JSON text.
pub fn parse_batch(json: &str) -> Result<Vec<Op>, CommandError> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(values) => parse_ops(&values),
        _ => Err(CommandError::NotABatch),
    }
}

/// An op that was not recognised and became a default rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fallback {
    pub index: usize,
    pub op: String,
}

/// Outcome of applying a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Number of ops applied.
    pub applied: usize,
    /// Ids of shapes added, in order.
    pub added: Vec<ShapeId>,
    /// Number of `clear` ops executed.
    pub clears: usize,
    /// Ops that fell back to a default rectangle.
    pub fallbacks: Vec<Fallback>,
}

/// Apply parsed ops to `store` in order. History is the caller's concern.
///
/// `clear` empties the sequence on the spot; later ops in the same batch
/// still add their shapes after it. Added shapes do not take the selection.
pub fn apply_ops(store: &mut ShapeStore, ops: &[Op]) -> BatchReport {
    let mut report = BatchReport::default();
    for (index, op) in ops.iter().enumerate() {
        match op {
            Op::Clear => {
                log::info!("Batch op {}: clearing {} shapes", index, store.len());
                store.clear();
                report.clears += 1;
            }
            op => {
                if let Op::Unknown { name, .. } = op {
                    log::warn!("Unknown op {:?} at {}, adding default rectangle", name, index);
                    report.fallbacks.push(Fallback {
                        index,
                        op: name.clone(),
                    });
                }
                if let Some(shape) = op.to_shape() {
                    report.added.push(store.append(shape));
                }
            }
        }
        report.applied += 1;
    }
    log::debug!(
        "Applied batch: {} ops, {} shapes added",
        report.applied,
        report.added.len()
    );
    report
}
