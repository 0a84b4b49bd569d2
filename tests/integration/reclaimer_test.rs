//! Orphan reclaimer integration tests

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use daylog::backend::archive::ArchiveError;
use daylog::shared::ArchiveRecord;

use crate::common::{day, Harness};
use crate::{assert_evicted, assert_live, assert_ok};

#[tokio::test]
async fn test_orphan_is_archived_and_evicted() {
    let h = Harness::new(&["ws-live", "ws-deleted"]);
    let date = day(2025, 1, 14);
    let orphan = h.write("ws-deleted", date, "written before deletion").await;
    let live = h.write("ws-live", date, "still going").await;
    h.directory.remove("ws-deleted");

    let destroyed = assert_ok!(h.reclaimer.sweep().await);

    assert_eq!(destroyed, 1);
    assert_evicted!(h.registry, &orphan);
    assert_live!(h.registry, &live);
    assert_eq!(
        h.store.records(),
        vec![ArchiveRecord::new("ws-deleted", date, "written before deletion")]
    );
}

#[tokio::test]
async fn test_live_workspace_rooms_are_untouched_on_any_date() {
    let h = Harness::new(&["ws-1"]);
    let old = h.write("ws-1", day(2024, 12, 1), "old").await;
    let new = h.write("ws-1", day(2025, 1, 14), "new").await;

    let destroyed = assert_ok!(h.reclaimer.sweep().await);

    assert_eq!(destroyed, 0);
    assert_live!(h.registry, &old);
    assert_live!(h.registry, &new);
    assert_eq!(h.store.attempts(), 0);
}

#[tokio::test]
async fn test_malformed_key_is_evicted_without_persisting() {
    let h = Harness::new(&["ws-1"]);
    h.write_raw("ws-1-garbage", "text nobody can file").await;
    h.write_raw("2025-01-14", "no workspace").await;

    let destroyed = assert_ok!(h.reclaimer.sweep().await);

    assert_eq!(destroyed, 2);
    assert_evicted!(h.registry, "ws-1-garbage");
    assert_evicted!(h.registry, "2025-01-14");
    assert_eq!(h.store.attempts(), 0);
}

#[tokio::test]
async fn test_blank_orphan_is_dropped() {
    let h = Harness::new(&[]);
    let key = h.write("gone", day(2025, 1, 14), "  \n").await;

    let destroyed = assert_ok!(h.reclaimer.sweep().await);

    assert_eq!(destroyed, 1);
    assert_evicted!(h.registry, &key);
    assert_eq!(h.store.attempts(), 0);
}

#[tokio::test]
async fn test_orphan_write_failure_still_evicts() {
    let h = Harness::new(&[]);
    let key = h.write("gone", day(2025, 1, 14), "unlucky").await;
    h.store.fail_for("gone");

    let destroyed = assert_ok!(h.reclaimer.sweep().await);

    assert_eq!(destroyed, 1);
    assert_eq!(h.store.attempts(), 1);
    assert_evicted!(h.registry, &key);
}

#[tokio::test]
async fn test_unavailable_directory_leaves_registry_alone() {
    let h = Harness::new(&["ws-1"]);
    let key = h.write("ws-1", day(2025, 1, 14), "safe").await;
    h.write_raw("malformed", "").await;
    h.directory.set_down(true);

    let result = h.reclaimer.sweep().await;

    assert_matches!(result, Err(ArchiveError::WorkspaceListUnavailable(_)));
    assert_eq!(h.registry.len().await, 2);
    assert_live!(h.registry, &key);
}

#[tokio::test]
async fn test_sweep_on_empty_registry() {
    let h = Harness::new(&["ws-1"]);
    assert_eq!(assert_ok!(h.reclaimer.sweep().await), 0);
}
