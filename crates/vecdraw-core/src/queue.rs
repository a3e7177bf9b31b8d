//! Per-room mailboxes for externally pushed operation batches.
//!
//! Producers push raw op objects for a room; the room's editing session
//! drains them on its own polling cadence. A mailbox is created by the first
//! push to its room and lives until [`PendingOps::remove_room`].

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

/// Queue errors.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

type Mailbox = Arc<Mutex<Vec<Value>>>;

/// Registry of pending op mailboxes, one per room id.
///
/// Each mailbox has its own mutex. A drain swaps the mailbox contents out
/// under that mutex, so every pushed op is handed to exactly one drainer
/// even when several sessions poll the same room.
#[derive(Debug, Default)]
pub struct PendingOps {
    rooms: RwLock<HashMap<String, Mailbox>>,
}

fn lock_error(e: impl std::fmt::Display) -> QueueError {
    QueueError::Lock(e.to_string())
}

impl PendingOps {
    pub fn new() -> Self {
        Self::default()
    }

    fn mailbox(&self, room: &str) -> QueueResult<Option<Mailbox>> {
        let rooms = self.rooms.read().map_err(lock_error)?;
        Ok(rooms.get(room).cloned())
    }

    /// Queue `ops` for `room`. Returns how many ops were queued; an empty
    /// batch queues nothing and creates no mailbox.
    pub fn push(&self, room: &str, ops: Vec<Value>) -> QueueResult<usize> {
        if ops.is_empty() {
            return Ok(0);
        }
        let mailbox = match self.mailbox(room)? {
            Some(mailbox) => mailbox,
            None => {
                let mut rooms = self.rooms.write().map_err(lock_error)?;
                rooms.entry(room.to_string()).or_default().clone()
            }
        };
        let count = ops.len();
        let mut pending = mailbox.lock().map_err(lock_error)?;
        pending.extend(ops);
        log::debug!("Queued {} ops for room {} ({} pending)", count, room, pending.len());
        Ok(count)
    }

    /// Take everything pending for `room`, leaving the mailbox empty.
    pub fn drain(&self, room: &str) -> QueueResult<Vec<Value>> {
        let Some(mailbox) = self.mailbox(room)? else {
            return Ok(Vec::new());
        };
        let mut pending = mailbox.lock().map_err(lock_error)?;
        Ok(std::mem::take(&mut *pending))
    }

    /// Number of ops waiting for `room`.
    pub fn pending(&self, room: &str) -> QueueResult<usize> {
        match self.mailbox(room)? {
            Some(mailbox) => Ok(mailbox.lock().map_err(lock_error)?.len()),
            None => Ok(0),
        }
    }

    /// Rooms that currently have a mailbox.
    pub fn rooms(&self) -> QueueResult<Vec<String>> {
        let rooms = self.rooms.read().map_err(lock_error)?;
        Ok(rooms.keys().cloned().collect())
    }

    /// Drop a room's mailbox along with anything still pending in it.
    pub fn remove_room(&self, room: &str) -> QueueResult<bool> {
        let mut rooms = self.rooms.write().map_err(lock_error)?;
        Ok(rooms.remove(room).is_some())
    }
}

/// Generate a short shareable room id: six lowercase alphanumerics.
pub fn generate_room_id() -> String {
    const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut bits = Uuid::new_v4().as_u128();
    (0..6)
        .map(|_| {
            let c = ALPHABET[(bits % 36) as usize] as char;
            bits /= 36;
            c
        })
        .collect()
}
