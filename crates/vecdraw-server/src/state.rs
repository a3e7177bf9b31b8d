//! Shared server state: one live editing session per room plus the pending
//! op mailboxes that feed them.

use crate::error::ApiError;
use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use std::sync::Mutex;
use tracing::{info, warn};
use vecdraw_core::{Canvas, PendingOps};

pub struct AppState {
    /// Editing session per room, created on first use.
    sessions: DashMap<String, Mutex<Canvas>>,
    /// Ops pushed by external callers, waiting for the next poll.
    queue: PendingOps,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            queue: PendingOps::new(),
        }
    }

    pub fn queue(&self) -> &PendingOps {
        &self.queue
    }

    fn session(&self, room: &str) -> Ref<'_, String, Mutex<Canvas>> {
        if let Some(session) = self.sessions.get(room) {
            return session;
        }
        info!("Opening session for room {}", room);
        self.sessions
            .entry(room.to_string())
            .or_insert_with(|| Mutex::new(Canvas::new()))
            .downgrade()
    }

    /// Run `f` against the room's session, creating it if needed.
    pub fn with_session<R>(&self, room: &str, f: impl FnOnce(&mut Canvas) -> R) -> Result<R, ApiError> {
        let session = self.session(room);
        let mut canvas = session
            .lock()
            .map_err(|_| ApiError::SessionPoisoned(room.to_string()))?;
        Ok(f(&mut canvas))
    }

    /// One poll tick: apply every room's pending ops to its session.
    /// Returns the number of rooms that changed.
    pub fn drain_all(&self) -> Result<usize, ApiError> {
        let mut updated = 0;
        for room in self.queue.rooms()? {
            if self.queue.pending(&room)? == 0 {
                continue;
            }
            match self.with_session(&room, |canvas| canvas.drain_room(&self.queue, &room))? {
                Ok(Some(report)) => {
                    info!(
                        "Room {}: applied {} ops, {} shapes added",
                        room,
                        report.applied,
                        report.added.len()
                    );
                    for fallback in &report.fallbacks {
                        warn!("Room {}: op {} ({}) fell back to a rectangle", room, fallback.index, fallback.op);
                    }
                    updated += 1;
                }
                Ok(None) => {}
                Err(e) => warn!("Room {}: dropped malformed batch: {}", room, e),
            }
        }
        Ok(updated)
    }
}
