/**
 * Room Retirement
 *
 * The extract → persist → evict path shared by the archival job and the
 * orphan reclaimer.
 *
 * The document is closed while its text is read, so a client still holding
 * the handle can't slip an edit in between extraction and eviction. The room
 * is evicted whatever the persistence outcome: a failed write loses that
 * day's content rather than keeping the document around for a retry.
 *
 * Eviction is tied to the document that was extracted. If another retirer
 * evicted it first and a client has since opened a fresh room under the
 * same key, the fresh room stays.
 */

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::backend::archive::error::ArchiveError;
use crate::backend::collab::state::{RoomRegistry, SharedDocument};
use crate::backend::store::LogStore;
use crate::shared::archive::is_blank;
use crate::shared::{ArchiveRecord, RoomKey};

/// What happened to one room
#[derive(Debug)]
pub enum RoomOutcome {
    /// No room was ever opened for this key
    Missing,
    /// The room only held whitespace; evicted without a write
    Blank,
    /// Content persisted, room evicted
    Archived,
    /// Extraction or persistence failed; room evicted anyway
    Failed(ArchiveError),
}

/// Close the document and read its final text
pub async fn extract_text(key: &str, doc: &SharedDocument) -> Result<String, ArchiveError> {
    let mut doc = doc.write().await;
    catch_unwind(AssertUnwindSafe(|| doc.close())).map_err(|panic| ArchiveError::Extraction {
        key: key.to_string(),
        message: panic_message(panic.as_ref()),
    })
}

/// Archive and evict the room for `room`, if it exists
pub async fn retire_room(registry: &RoomRegistry, store: &dyn LogStore, room: &RoomKey) -> RoomOutcome {
    let key = room.encode();
    let Some(doc) = registry.get(&key).await else {
        return RoomOutcome::Missing;
    };

    let outcome = match extract_text(&key, &doc).await {
        Err(err) => RoomOutcome::Failed(err),
        Ok(text) if is_blank(&text) => RoomOutcome::Blank,
        Ok(text) => match store.upsert(&ArchiveRecord::for_room(room, text)).await {
            Ok(()) => RoomOutcome::Archived,
            Err(source) => RoomOutcome::Failed(ArchiveError::Persistence {
                workspace_id: room.workspace_id().to_string(),
                date: room.date(),
                source,
            }),
        },
    };

    registry.destroy_if(&key, &doc).await;
    outcome
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
