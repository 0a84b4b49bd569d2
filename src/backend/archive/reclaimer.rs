/**
 * Orphan Reclaimer
 *
 * The archival job only visits workspaces that still exist, so a room whose
 * workspace was deleted mid-day would stay in memory forever. The reclaimer
 * walks the registry instead:
 *
 * - malformed key: evicted, nothing to archive against
 * - workspace gone: archived if non-blank, then evicted
 * - workspace present: left alone; the archival job retires it
 */

use std::collections::HashSet;
use std::sync::Arc;

use crate::backend::archive::error::ArchiveError;
use crate::backend::archive::retire::{retire_room, RoomOutcome};
use crate::backend::collab::state::RoomRegistry;
use crate::backend::store::{LogStore, WorkspaceDirectory};
use crate::shared::RoomKey;

pub struct OrphanReclaimer {
    registry: Arc<RoomRegistry>,
    workspaces: Arc<dyn WorkspaceDirectory>,
    store: Arc<dyn LogStore>,
}

impl OrphanReclaimer {
    pub fn new(
        registry: Arc<RoomRegistry>,
        workspaces: Arc<dyn WorkspaceDirectory>,
        store: Arc<dyn LogStore>,
    ) -> Self {
        Self {
            registry,
            workspaces,
            store,
        }
    }

    /// Evict orphaned and malformed rooms, returning how many were destroyed
    ///
    /// If the workspace list can't be fetched nothing is touched: without
    /// it every room would look orphaned.
    pub async fn sweep(&self) -> Result<usize, ArchiveError> {
        let existing: HashSet<String> = self
            .workspaces
            .list_workspace_ids()
            .await
            .map_err(ArchiveError::WorkspaceListUnavailable)?
            .into_iter()
            .collect();

        let mut destroyed = 0;
        for key in self.registry.keys().await {
            let room = match RoomKey::parse(&key) {
                Ok(room) => room,
                Err(_) => {
                    let err = ArchiveError::MalformedKey { key: key.clone() };
                    tracing::warn!("[Reclaim] Evicting room: {}", err);
                    if self.registry.destroy(&key).await {
                        destroyed += 1;
                    }
                    continue;
                }
            };

            if existing.contains(room.workspace_id()) {
                continue;
            }

            match retire_room(&self.registry, self.store.as_ref(), &room).await {
                // Already retired by someone else since the key snapshot
                RoomOutcome::Missing => {}
                RoomOutcome::Archived => {
                    tracing::info!("[Reclaim] Archived and evicted orphaned room {}", room);
                    destroyed += 1;
                }
                RoomOutcome::Blank => {
                    tracing::info!("[Reclaim] Evicted blank orphaned room {}", room);
                    destroyed += 1;
                }
                RoomOutcome::Failed(err) => {
                    tracing::warn!("[Reclaim] Evicted orphaned room {} after failure: {}", room, err);
                    destroyed += 1;
                }
            }
        }

        if destroyed > 0 {
            tracing::info!("[Reclaim] Swept {} rooms", destroyed);
        }
        Ok(destroyed)
    }
}
