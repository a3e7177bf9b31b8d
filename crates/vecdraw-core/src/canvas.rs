//! Editing session: shapes, history, camera and the active tool.

use crate::camera::Camera;
use crate::commands::{self, BatchReport, CommandError, Op};
use crate::export;
use crate::history::History;
use crate::hit::{hit_handle, hit_shape};
use crate::input::PointerEvent;
use crate::queue::PendingOps;
use crate::selection::apply_resize;
use crate::settings::EditorSettings;
use crate::shapes::{CanvasPoint, Frame, Image, Shape, ShapeId, ShapeStyle, TRANSPARENT, clamp_coord};
use crate::store::{PropertyError, ShapePatch, ShapeStore};
use crate::tools::{InteractionState, Preview, ToolKind, ToolManager};
use kurbo::Point;
use serde_json::Value;
use std::sync::Arc;

/// One editing session.
///
/// Pointer events must be delivered one at a time; each is handled to
/// completion before the next. The canvas imposes no rate limit and is
/// correct under unthrottled input.
#[derive(Debug, Clone)]
pub struct Canvas {
    store: ShapeStore,
    history: History,
    /// View transform for pointer input.
    pub camera: Camera,
    /// Active tool and interaction state.
    pub tool_manager: ToolManager,
    settings: EditorSettings,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas with default settings.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    /// Create an empty canvas with the given settings.
    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            store: ShapeStore::new(),
            history: History::new(settings.max_history),
            camera: Camera::new(settings.canvas_origin),
            tool_manager: ToolManager::new(),
            settings,
        }
    }

    /// Editor settings this canvas was created with.
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// The shape sequence and selection.
    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    /// Shapes in z-order, bottom first.
    pub fn shapes(&self) -> &[Arc<Shape>] {
        self.store.shapes()
    }

    /// Look up a shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.store.get(id)
    }

    /// The selected shape, if any.
    pub fn selected(&self) -> Option<&Shape> {
        self.store.selected()
    }

    /// Id of the selected shape, if any.
    pub fn selected_id(&self) -> Option<ShapeId> {
        self.store.selected_id()
    }

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// The current pointer interaction.
    pub fn state(&self) -> &InteractionState {
        &self.tool_manager.state
    }

    /// Switch tools. Any selection is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_manager.set_tool(tool);
        self.store.clear_selection();
    }

    /// Select a shape from outside the canvas (e.g. a layer list). Only
    /// honoured while the select tool is active.
    pub fn select_shape(&mut self, id: ShapeId) -> bool {
        self.tool() == ToolKind::Select && self.store.select(id)
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { .. } => self.pointer_down(event.position()),
            PointerEvent::Move { .. } => self.pointer_move(event.position()),
            PointerEvent::Up { .. } => self.pointer_up(event.position()),
        }
    }

    /// Pointer pressed at a raw surface position.
    pub fn pointer_down(&mut self, point: Option<Point>) {
        let Some(raw) = point else {
            return;
        };
        let tool = self.tool();
        if tool == ToolKind::Hand {
            self.tool_manager.state = InteractionState::Panning { last: raw };
            return;
        }

        let p = self.camera.screen_to_canvas(raw);

        if let Some(selected) = self.store.selected() {
            if let Some(handle) = hit_handle(p, selected, self.settings.handle_tolerance) {
                log::debug!("Resize {} via {}", selected.kind(), handle);
                self.tool_manager.state = InteractionState::Resizing {
                    handle,
                    last: p,
                    before: self.store.snapshot(),
                };
                return;
            }
        }

        match tool {
            ToolKind::Select => {
                match hit_shape(p, self.store.shapes(), self.settings.line_hit_padding) {
                    Some(id) => {
                        self.store.select(id);
                        self.tool_manager.state = InteractionState::Dragging {
                            last: p,
                            before: self.store.snapshot(),
                        };
                    }
                    None => self.store.clear_selection(),
                }
            }
            ToolKind::Text => {
                self.history.snapshot_before_change(&self.store);
                let shape = self.tool_manager.create_text(p, &self.settings);
                let id = self.store.add(shape);
                log::debug!("Placed text {} at {:?}", id, p);
                self.tool_manager.set_tool(ToolKind::Select);
            }
            tool if tool == ToolKind::Pencil || tool.is_drag_drawn() => {
                self.store.clear_selection();
                self.tool_manager.begin_drawing(p, self.store.snapshot());
            }
            _ => {}
        }
    }

    /// Pointer moved. `None` means no positional update this tick.
    pub fn pointer_move(&mut self, point: Option<Point>) {
        let Some(raw) = point else {
            return;
        };
        let p = self.camera.screen_to_canvas(raw);

        if let InteractionState::Drawing { .. } = self.tool_manager.state {
            self.tool_manager.update_drawing(p);
            return;
        }

        match &mut self.tool_manager.state {
            InteractionState::Panning { last } => {
                self.camera.pan(raw - *last);
                *last = raw;
            }
            InteractionState::Dragging { last, .. } => {
                let (dx, dy) = (p.x.saturating_sub(last.x), p.y.saturating_sub(last.y));
                *last = p;
                if let Some(shape) = self.store.selected_id().and_then(|id| self.store.get_mut(id)) {
                    shape.translate(dx, dy);
                }
            }
            InteractionState::Resizing { handle, last, .. } => {
                let (dx, dy) = (p.x.saturating_sub(last.x), p.y.saturating_sub(last.y));
                *last = p;
                if let Some(shape) = self.store.selected_id().and_then(|id| self.store.get_mut(id)) {
                    *handle = apply_resize(shape, *handle, dx, dy);
                }
            }
            InteractionState::Drawing { .. } | InteractionState::Idle => {}
        }
    }

    /// Pointer released. `None` means the release carried no position.
    pub fn pointer_up(&mut self, point: Option<Point>) {
        if let Some(raw) = point {
            let p = self.camera.screen_to_canvas(raw);
            self.tool_manager.finish_drawing_at(p);
        }

        let tool = self.tool();
        match std::mem::take(&mut self.tool_manager.state) {
            InteractionState::Drawing {
                start,
                current,
                before,
            } => {
                let shape = if tool == ToolKind::Pencil {
                    self.tool_manager.create_pencil(&self.settings)
                } else {
                    self.tool_manager.commit_shape(start, current, &self.settings)
                };
                match shape {
                    Some(shape) => {
                        self.history.push(before);
                        let id = self.store.add(shape);
                        log::debug!("Committed {} {}", tool, id);
                    }
                    None => log::debug!("Discarded {} gesture", tool),
                }
            }
            InteractionState::Dragging { before, .. } | InteractionState::Resizing { before, .. } => {
                if !self.store.matches(&before) {
                    self.history.push(before);
                }
            }
            InteractionState::Panning { .. } | InteractionState::Idle => {}
        }
        self.tool_manager.reset();
    }

    /// The in-progress drawing gesture, for rendering a preview.
    pub fn preview(&self) -> Option<Preview> {
        self.tool_manager.preview()
    }

    /// The shape the in-progress gesture would produce.
    pub fn preview_shape(&self) -> Option<Shape> {
        self.tool_manager.preview_shape(&self.settings)
    }

    /// Set one field of the selected shape from a loosely typed value.
    ///
    /// Returns `Ok(false)` when nothing is selected. A bad key or value is
    /// rejected before history is touched.
    pub fn update_property(&mut self, key: &str, value: &Value) -> Result<bool, PropertyError> {
        let Some(id) = self.store.selected().map(Shape::id) else {
            return Ok(false);
        };
        let patch = ShapePatch::from_property(key, value).inspect_err(|e| {
            log::warn!("Rejected property edit: {}", e);
        })?;
        Ok(self.update_selected(id, &patch))
    }

    fn update_selected(&mut self, id: ShapeId, patch: &ShapePatch) -> bool {
        self.history.snapshot_before_change(&self.store);
        self.store.update(id, patch)
    }

    /// Delete the selected shape.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.store.selected().map(Shape::id) else {
            return false;
        };
        self.history.snapshot_before_change(&self.store);
        self.store.remove(id);
        log::debug!("Deleted {}", id);
        true
    }

    /// Place an image referencing an externally stored asset.
    pub fn insert_image(&mut self, src: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> ShapeId {
        self.history.snapshot_before_change(&self.store);
        let frame = Frame::new(clamp_coord(x), clamp_coord(y), clamp_coord(width), clamp_coord(height)).normalized();
        let image = Image::new(frame, src, ShapeStyle::new(TRANSPARENT, "none", 0));
        self.store.add(Shape::Image(image))
    }

    /// Restore the state before the last recorded change. Any gesture in
    /// progress is abandoned.
    pub fn undo(&mut self) -> bool {
        self.tool_manager.reset();
        self.history.undo(&mut self.store)
    }

    /// Re-apply the last undone change.
    pub fn redo(&mut self) -> bool {
        self.tool_manager.reset();
        self.history.redo(&mut self.store)
    }

    /// Whether there is a change to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is an undone change to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The undo/redo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply a parsed batch as a single undo step.
    pub fn apply_ops(&mut self, ops: &[Op]) -> BatchReport {
        self.history.snapshot_before_change(&self.store);
        commands::apply_ops(&mut self.store, ops)
    }

    /// Parse and apply a batch of raw op objects as a single undo step.
    ///
    /// History is recorded before parsing, so a malformed batch still
    /// leaves one (no-op) undo step behind. No op of a malformed batch is
    /// applied.
    pub fn apply_values(&mut self, values: &[Value]) -> Result<BatchReport, CommandError> {
        self.history.snapshot_before_change(&self.store);
        let ops = commands::parse_ops(values)?;
        Ok(commands::apply_ops(&mut self.store, &ops))
    }

    /// Parse and apply a JSON batch; see [`Canvas::apply_values`].
    pub fn apply_json(&mut self, json: &str) -> Result<BatchReport, CommandError> {
        self.history.snapshot_before_change(&self.store);
        let ops = commands::parse_batch(json)?;
        Ok(commands::apply_ops(&mut self.store, &ops))
    }

    /// One poll tick: drain `room`'s mailbox and apply whatever was pending.
    /// Returns `Ok(None)` when the mailbox was empty.
    pub fn drain_room(&mut self, queue: &PendingOps, room: &str) -> Result<Option<BatchReport>, CommandError> {
        let values = queue.drain(room)?;
        if values.is_empty() {
            return Ok(None);
        }
        log::info!("Applying {} pending ops for room {}", values.len(), room);
        self.apply_values(&values).map(Some)
    }

    /// Serialize the shape list as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let shapes: Vec<&Shape> = self.store.shapes().iter().map(AsRef::as_ref).collect();
        serde_json::to_string(&shapes)
    }

    /// Export the shape list as an SVG document.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        export::to_svg(self.store.shapes(), width, height)
    }

    /// Canvas-space position of a raw pointer, for callers that need it.
    pub fn to_canvas(&self, raw: Point) -> CanvasPoint {
        self.camera.screen_to_canvas(raw)
    }
}
