/**
 * Room Registry
 *
 * This module owns the live collaborative documents, one per room key. Each
 * document is a diamond-types OpLog; the registry creates it on first access,
 * hands out shared handles to every client of the room, and is the only
 * component allowed to retire it.
 *
 * # Concurrency
 *
 * The key map sits behind an async `RwLock`. Creation happens under the
 * write lock with an entry-or-insert, so two clients opening the same new
 * room at once always share one document. Each document has its own lock so
 * edits to different rooms never contend.
 *
 * A document that has been retired is marked closed. Clients still holding
 * a handle see the flag and must reopen the room instead of writing into a
 * document nobody will ever read again.
 */

use diamond_types::list::{Branch as ListBranch, OpLog as ListOpLog};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::{CRDTOperation, DocumentState, RoomKey, SharedError};

/// Handle to a room's document, shared by every client of the room
pub type SharedDocument = Arc<RwLock<RoomDocument>>;

/// One room's collaborative text
#[derive(Debug)]
pub struct RoomDocument {
    /// The diamond-types OpLog for this room
    oplog: ListOpLog,
    closed: bool,
    #[cfg(test)]
    poisoned: bool,
}

impl RoomDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            oplog: ListOpLog::new(),
            closed: false,
            #[cfg(test)]
            poisoned: false,
        }
    }

    /// Current text at the tip of the OpLog
    pub fn text(&self) -> String {
        let branch = ListBranch::new_at_tip(&self.oplog);
        branch.content().to_string()
    }

    pub fn operation_count(&self) -> usize {
        self.oplog.len()
    }

    /// Whether the registry has retired this document
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Snapshot for the room identified by `room`
    pub fn state(&self, room: &str) -> DocumentState {
        DocumentState {
            room: room.to_string(),
            content: self.text(),
            operation_count: self.operation_count(),
        }
    }

    /// Apply a batch of edits as `agent`
    ///
    /// The whole batch is checked against the document length before any
    /// of it is applied, so a bad position never leaves half a batch in the
    /// OpLog.
    pub fn apply(&mut self, agent: &str, operations: &[CRDTOperation]) -> Result<usize, SharedError> {
        if self.closed {
            return Err(SharedError::validation("room", "document has been archived"));
        }

        let mut len = self.text().chars().count();
        for op in operations {
            match op {
                CRDTOperation::Insert { position, text } => {
                    if *position > len {
                        return Err(SharedError::validation(
                            "position",
                            format!("insert at {} past end of document ({})", position, len),
                        ));
                    }
                    len += text.chars().count();
                }
                CRDTOperation::Delete { start, end } => {
                    if start > end || *end > len {
                        return Err(SharedError::validation(
                            "range",
                            format!("delete {}..{} outside document ({})", start, end, len),
                        ));
                    }
                    len -= end - start;
                }
            }
        }

        let agent_id = self.oplog.get_or_create_agent_id(agent);
        let mut branch = ListBranch::new_at_tip(&self.oplog);
        for op in operations {
            match op {
                CRDTOperation::Insert { position, text } if !text.is_empty() => {
                    branch.insert(&mut self.oplog, agent_id, *position, text.as_str());
                }
                CRDTOperation::Delete { start, end } if start < end => {
                    branch.delete_without_content(&mut self.oplog, agent_id, *start..*end);
                }
                // Empty edits leave no trace in the OpLog
                _ => {}
            }
        }
        Ok(operations.len())
    }

    /// Close the document and return its final text
    pub(crate) fn close(&mut self) -> String {
        #[cfg(test)]
        if self.poisoned {
            panic!("poisoned document");
        }
        self.closed = true;
        self.text()
    }

    /// Make the next `close` panic
    #[cfg(test)]
    pub(crate) fn poison(&mut self) {
        self.poisoned = true;
    }
}

impl Default for RoomDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide map from room key to live document
///
/// Construct one per process and share it behind an `Arc` with the HTTP
/// state, the archival job and the orphan reclaimer.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, SharedDocument>>,
}

impl RoomRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Return the document for `key`, creating an empty one if there is none
    pub async fn get_or_create(&self, key: &str) -> SharedDocument {
        {
            let rooms = self.rooms.read().await;
            if let Some(doc) = rooms.get(key) {
                return doc.clone();
            }
        }

        // Re-check under the write lock: another caller may have won the race
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(key.to_string())
            .or_insert_with(|| {
                tracing::debug!("[Collab] Creating room {}", key);
                Arc::new(RwLock::new(RoomDocument::new()))
            })
            .clone()
    }

    /// Open the room for a workspace and day
    pub async fn open(&self, room: &RoomKey) -> SharedDocument {
        self.get_or_create(&room.encode()).await
    }

    /// Look up a room without creating it
    pub async fn get(&self, key: &str) -> Option<SharedDocument> {
        self.rooms.read().await.get(key).cloned()
    }

    pub async fn exists(&self, key: &str) -> bool {
        self.rooms.read().await.contains_key(key)
    }

    /// Release the document for `key`
    ///
    /// Returns whether a room was removed. Destroying a key that was never
    /// created is a no-op.
    pub async fn destroy(&self, key: &str) -> bool {
        let removed = self.rooms.write().await.remove(key);
        match removed {
            Some(doc) => {
                doc.write().await.closed = true;
                tracing::debug!("[Collab] Destroyed room {}", key);
                true
            }
            None => false,
        }
    }

    /// Release `doc` if it is still the live document for `key`
    ///
    /// A retirer that extracted one document must not evict a newer one
    /// created under the same key while it was persisting.
    pub async fn destroy_if(&self, key: &str, doc: &SharedDocument) -> bool {
        {
            let mut rooms = self.rooms.write().await;
            match rooms.get(key) {
                Some(current) if Arc::ptr_eq(current, doc) => {
                    rooms.remove(key);
                }
                _ => return false,
            }
        }
        doc.write().await.closed = true;
        tracing::debug!("[Collab] Destroyed room {}", key);
        true
    }

    /// Snapshot of every live key
    pub async fn keys(&self) -> Vec<String> {
        self.rooms.read().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rooms.read().await.is_empty()
    }
}

// Helper function to generate unique agent ID per editing session
// Reusing an agent name across sessions would corrupt the OpLog's sequence numbers
pub fn generate_agent_id() -> String {
    format!("agent-{}", Uuid::new_v4())
}
