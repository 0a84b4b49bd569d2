/**
 * Shared CRDT Types
 *
 * Wire types for editing a room's collaborative document. The merge itself
 * is done by diamond-types on the server; these are just the operations a
 * client sends and the snapshot it gets back.
 */

use serde::{Deserialize, Serialize};

/// CRDT operation types for collaborative editing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CRDTOperation {
    /// Insert text at a specific position
    Insert {
        /// Position in the document (character index)
        position: usize,
        /// Text to insert
        text: String,
    },
    /// Delete a range of text
    Delete {
        /// Start position (inclusive)
        start: usize,
        /// End position (exclusive)
        end: usize,
    },
}

/// Snapshot of one room's document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentState {
    /// Registry key of the room
    pub room: String,
    /// The document content
    pub content: String,
    /// Number of operations in the OpLog
    pub operation_count: usize,
}

/// Request to apply CRDT operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplyOperationsRequest {
    /// CRDT operations to apply, in order
    pub operations: Vec<CRDTOperation>,
    /// Agent name of the editing session; the server generates one if absent
    #[serde(default)]
    pub agent: Option<String>,
}

/// Response after applying operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplyOperationsResponse {
    /// Number of operations applied
    pub applied: usize,
    /// Current document state
    pub state: DocumentState,
}

impl CRDTOperation {
    /// Create a new insert operation
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self::Insert {
            position,
            text: text.into(),
        }
    }

    /// Create a new delete operation
    pub fn delete(start: usize, end: usize) -> Self {
        Self::Delete { start, end }
    }
}
