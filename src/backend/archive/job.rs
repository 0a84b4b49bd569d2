/**
 * Archival Job
 *
 * Flushes every workspace's room for one target day into the log store and
 * evicts it from the registry.
 *
 * # Algorithm
 *
 * 1. Fetch the current workspace ids. If that fails the whole run fails.
 * 2. For each workspace, look up the room `{workspace}-{target}`; skip it
 *    if it was never opened.
 * 3. Close the document and read its text.
 * 4. Whitespace-only text is not written.
 * 5. Anything else is upserted. A failed write is logged and recorded, and
 *    the loop moves on to the next workspace.
 * 6. The room is evicted whatever happened in 5.
 * 7. Any failure bumps the consecutive-failure counter; a clean run resets it.
 *
 * Workspaces are processed one at a time so a single slow or failing write
 * only ever affects its own room.
 */

use chrono::NaiveDate;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::backend::archive::error::ArchiveError;
use crate::backend::archive::retire::{retire_room, RoomOutcome};
use crate::backend::collab::state::RoomRegistry;
use crate::backend::store::{LogStore, WorkspaceDirectory};
use crate::shared::RoomKey;

/// Outcome of one archival run
#[derive(Debug)]
pub struct ArchiveReport {
    pub target: NaiveDate,
    /// Rooms whose content was persisted
    pub archived: usize,
    /// Rooms evicted without a write because they were blank
    pub blank: usize,
    /// Workspaces that never opened a room for the target day
    pub missing: usize,
    /// Per-room failures; those rooms were still evicted
    pub failures: Vec<ArchiveError>,
}

impl ArchiveReport {
    fn new(target: NaiveDate) -> Self {
        Self {
            target,
            archived: 0,
            blank: 0,
            missing: 0,
            failures: Vec::new(),
        }
    }

    /// Whether every room was handled without error
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn last_error(&self) -> Option<&ArchiveError> {
        self.failures.last()
    }

    /// Rooms removed from the registry by this run
    pub fn evicted(&self) -> usize {
        self.archived + self.blank + self.failures.len()
    }
}

/// Daily archival of every workspace's room for a target day
pub struct ArchivalJob {
    registry: Arc<RoomRegistry>,
    workspaces: Arc<dyn WorkspaceDirectory>,
    store: Arc<dyn LogStore>,
    consecutive_failures: AtomicU32,
}

impl ArchivalJob {
    pub fn new(
        registry: Arc<RoomRegistry>,
        workspaces: Arc<dyn WorkspaceDirectory>,
        store: Arc<dyn LogStore>,
    ) -> Self {
        Self {
            registry,
            workspaces,
            store,
            consecutive_failures: AtomicU32::new(0),
        }
    }

    /// Number of failed runs since the last clean one
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::SeqCst)
    }

    /// Archive and evict every workspace's room for `target`
    ///
    /// Only an unavailable workspace list returns `Err`. Per-room failures
    /// are collected in the report.
    pub async fn run(&self, target: NaiveDate) -> Result<ArchiveReport, ArchiveError> {
        tracing::info!("[Archive] Starting archival for {}", target);

        let workspace_ids = match self.workspaces.list_workspace_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                let err = ArchiveError::WorkspaceListUnavailable(e);
                let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::error!(
                    "[Archive] Archival for {} aborted (consecutive failures: {}): {}",
                    target,
                    failures,
                    err
                );
                return Err(err);
            }
        };

        let mut report = ArchiveReport::new(target);
        for workspace_id in workspace_ids {
            let room = RoomKey::new(workspace_id, target);
            match retire_room(&self.registry, self.store.as_ref(), &room).await {
                RoomOutcome::Missing => report.missing += 1,
                RoomOutcome::Blank => {
                    tracing::debug!("[Archive] Room {} is blank, evicted without writing", room);
                    report.blank += 1;
                }
                RoomOutcome::Archived => {
                    tracing::debug!("[Archive] Archived room {}", room);
                    report.archived += 1;
                }
                RoomOutcome::Failed(err) => {
                    tracing::warn!("[Archive] Room {} evicted after failure: {}", room, err);
                    report.failures.push(err);
                }
            }
        }

        tracing::info!(
            "[Archive] Archived {} rooms for {} ({} blank, {} without a room, {} failed)",
            report.archived,
            target,
            report.blank,
            report.missing,
            report.failures.len()
        );

        if let Some(last) = report.last_error() {
            let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::error!(
                "[Archive] Archival for {} had {} failures (consecutive failures: {}), last error: {}",
                target,
                report.failures.len(),
                failures,
                last
            );
        } else {
            self.consecutive_failures.store(0, Ordering::SeqCst);
        }

        Ok(report)
    }
}
