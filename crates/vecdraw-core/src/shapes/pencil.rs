//! Freehand pencil stroke.

use super::{CanvasPoint, Frame, ShapeId, ShapeStyle, ShapeTrait, shift_coord};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use uuid::Uuid;

/// A freehand stroke: an ordered point list with its derived bounding frame
/// and SVG path string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pencil {
    pub(crate) id: ShapeId,
    #[serde(flatten)]
    frame: Frame,
    points: Vec<CanvasPoint>,
    path_data: String,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Pencil {
    /// Minimum number of points for a committed stroke.
    pub const MIN_POINTS: usize = 2;

    /// Build a stroke from the visited points. Returns `None` when there are
    /// too few points to form a stroke.
    pub fn from_points(points: Vec<CanvasPoint>, style: ShapeStyle) -> Option<Self> {
        if points.len() < Self::MIN_POINTS {
            return None;
        }
        let frame = Frame::bounding(&points)?;
        let path_data = path_data(&points);
        Some(Self {
            id: Uuid::new_v4(),
            frame,
            points,
            path_data,
            style,
        })
    }

    pub fn points(&self) -> &[CanvasPoint] {
        &self.points
    }

    /// The `"M x0 y0 L x1 y1 …"` path string.
    pub fn path_data(&self) -> &str {
        &self.path_data
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Rescale every point from the current frame into `target`. A target
    /// with a negative extent mirrors the stroke along that axis.
    ///
    /// A stroke that is flat on an axis stays flat at the target's edge, so
    /// the resulting frame is the bounding box of the moved points rather
    /// than `target` itself.
    pub fn fit_to_frame(&mut self, target: Frame) {
        let source = self.frame;
        let map = |v: i32, from: i32, from_len: i32, to: i32, to_len: i32| -> i32 {
            if from_len == 0 {
                return to;
            }
            let t = (f64::from(v) - f64::from(from)) / f64::from(from_len);
            shift_coord(to, (t * f64::from(to_len)).round() as i32)
        };
        for p in &mut self.points {
            p.x = map(p.x, source.x, source.width, target.x, target.width);
            p.y = map(p.y, source.y, source.height, target.y, target.height);
        }
        self.frame = Frame::bounding(&self.points).unwrap_or_else(|| target.normalized());
        self.path_data = path_data(&self.points);
    }
}

/// Serialize points as an SVG move-to/line-to path.
pub(crate) fn path_data(points: &[CanvasPoint]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(out, "{cmd} {} {}", p.x, p.y);
    }
    out
}

impl ShapeTrait for Pencil {
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
        for p in &mut self.points {
            *p = p.offset(dx, dy);
        }
        self.path_data = path_data(&self.points);
    }
}
