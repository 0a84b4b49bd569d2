/**
 * Archival Error Types
 *
 * One variant per way a room can fail to make it into durable storage.
 * Only `WorkspaceListUnavailable` aborts a whole run; the others are
 * recorded against a single room and the batch moves on.
 */

use chrono::NaiveDate;
use thiserror::Error;

use crate::backend::store::StoreError;

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Registry key that doesn't decode to a workspace and a date
    #[error("malformed room key {key:?}")]
    MalformedKey { key: String },

    /// The log store rejected the upsert
    #[error("failed to persist log of workspace {workspace_id} for {date}: {source}")]
    Persistence {
        workspace_id: String,
        date: NaiveDate,
        source: StoreError,
    },

    /// The workspace list couldn't be fetched, so there is nothing to iterate
    #[error("workspace list unavailable: {0}")]
    WorkspaceListUnavailable(#[source] StoreError),

    /// Reading the document's text panicked
    #[error("failed to extract text from room {key}: {message}")]
    Extraction { key: String, message: String },
}

impl ArchiveError {
    /// Whether this error aborted a whole run rather than a single room
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::WorkspaceListUnavailable(_))
    }
}
