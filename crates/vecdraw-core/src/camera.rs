//! Camera module for the pan transform.

use crate::shapes::{CanvasPoint, clamp_coord};
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// Raw pointer positions are relative to the host surface. The canvas itself
/// starts at a fixed `origin` inside that surface (past the toolbar and
/// panels), and the user can pan the content by `offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan).
    pub offset: Vec2,
    /// Where the canvas starts on the host surface.
    pub origin: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl Camera {
    /// Create a camera for a canvas placed at `origin` on the host surface.
    pub fn new(origin: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            origin,
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts canvas coordinates to surface coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin + self.offset)
    }

    /// Get the inverse transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(-(self.origin + self.offset))
    }

    /// Convert a raw surface point to canvas coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a canvas point back to surface coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Convert a raw surface point to integer canvas coordinates,
    /// truncating toward zero and clamping to the supported range.
    pub fn screen_to_canvas(&self, screen_point: Point) -> CanvasPoint {
        let p = self.screen_to_world(screen_point);
        CanvasPoint::new(clamp_coord(p.x.trunc() as i32), clamp_coord(p.y.trunc() as i32))
    }

    /// Pan the camera by a delta in surface coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}
