/**
 * Archive Records
 *
 * The durable form of a room: the text a workspace wrote on one calendar
 * day. There is at most one record per `(workspace_id, date)`; writing the
 * same pair again replaces the content.
 */

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::room_key::RoomKey;

/// One archived day of a workspace's log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveRecord {
    pub workspace_id: String,
    pub date: NaiveDate,
    pub content: String,
}

impl ArchiveRecord {
    pub fn new(workspace_id: impl Into<String>, date: NaiveDate, content: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            date,
            content: content.into(),
        }
    }

    /// Record for the room identified by `key`
    pub fn for_room(key: &RoomKey, content: impl Into<String>) -> Self {
        Self::new(key.workspace_id(), key.date(), content)
    }
}

/// Inclusive date range for reading a workspace's archived logs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Content is only worth persisting if it has something besides whitespace
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}
