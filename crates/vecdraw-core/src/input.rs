//! Pointer input events.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A pointer position as delivered by the host. Either coordinate may be
/// missing or null, which means "no positional update this tick".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl PointerInput {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// The position, if both coordinates are present and finite.
    pub fn point(&self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

impl From<Point> for PointerInput {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Down {
        #[serde(flatten)]
        position: PointerInput,
    },
    Move {
        #[serde(flatten)]
        position: PointerInput,
    },
    Up {
        #[serde(flatten)]
        position: PointerInput,
    },
}

impl PointerEvent {
    pub fn down(p: Point) -> Self {
        PointerEvent::Down { position: p.into() }
    }

    pub fn moved(p: Point) -> Self {
        PointerEvent::Move { position: p.into() }
    }

    pub fn up(p: Point) -> Self {
        PointerEvent::Up { position: p.into() }
    }

    /// The event position, if one was supplied.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => position.point(),
        }
    }
}
