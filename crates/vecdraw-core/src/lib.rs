//! VecDraw Core Library
//!
//! Platform-agnostic editing engine for the VecDraw vector editor: the shape
//! model, hit testing, undo history, the pointer tool state machine and the
//! interpreter for externally supplied operation batches.

pub mod camera;
pub mod canvas;
pub mod commands;
pub mod export;
pub mod history;
pub mod hit;
pub mod input;
pub mod queue;
pub mod selection;
pub mod settings;
pub mod shapes;
pub mod store;
pub mod tools;

pub use camera::Camera;
pub use canvas::Canvas;
pub use commands::{BatchReport, CommandError, Op, parse_batch};
pub use history::History;
pub use input::{PointerEvent, PointerInput};
pub use queue::{PendingOps, QueueError, generate_room_id};
pub use selection::{Corner, Endpoint, HandleKind};
pub use settings::EditorSettings;
pub use shapes::{CanvasPoint, Frame, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use store::{PropertyError, ShapePatch, ShapeProperty, ShapeStore};
pub use tools::{InteractionState, Preview, ToolKind, ToolManager};
