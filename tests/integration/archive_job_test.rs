//! Archival job integration tests

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use daylog::backend::archive::ArchiveError;
use daylog::shared::{ArchiveRecord, RoomKey};

use crate::common::{day, Harness};
use crate::{assert_contains, assert_evicted, assert_live, assert_ok};

#[tokio::test]
async fn test_end_to_end_single_workspace() {
    let h = Harness::new(&["ws-1"]);
    let target = day(2025, 1, 14);
    let key = h.write("ws-1", target, "Log content for workspace 1").await;
    assert_eq!(key, "ws-1-2025-01-14");

    let report = assert_ok!(h.job.run(target).await);

    assert_eq!(report.archived, 1);
    assert_eq!(
        h.store.records(),
        vec![ArchiveRecord::new("ws-1", target, "Log content for workspace 1")]
    );
    assert_evicted!(h.registry, "ws-1-2025-01-14");
}

#[tokio::test]
async fn test_end_to_end_only_non_empty_room_is_written() {
    let h = Harness::new(&["ws-1", "ws-2", "ws-3"]);
    let target = day(2025, 1, 14);
    h.write("ws-1", target, "").await;
    h.write("ws-2", target, "standup notes").await;
    h.write("ws-3", target, "").await;

    let report = assert_ok!(h.job.run(target).await);

    assert_eq!(report.archived, 1);
    assert_eq!(report.blank, 2);
    assert_eq!(h.store.attempts(), 1);
    assert_eq!(h.store.get("ws-2", target).as_deref(), Some("standup notes"));
    assert_eq!(h.store.get("ws-1", target), None);
    assert_eq!(h.store.get("ws-3", target), None);
    assert!(h.registry.is_empty().await);
}

#[tokio::test]
async fn test_empty_workspace_list_touches_nothing() {
    let h = Harness::new(&[]);
    let target = day(2025, 1, 14);
    let key = h.write("unlisted", target, "still editing").await;

    let report = assert_ok!(h.job.run(target).await);

    assert_eq!(report.archived, 0);
    assert!(report.is_clean());
    assert_eq!(h.job.consecutive_failures(), 0);
    assert_live!(h.registry, &key);
    assert_eq!(h.store.attempts(), 0);
}

#[tokio::test]
async fn test_workspace_without_room_is_skipped() {
    let h = Harness::new(&["ws-1", "ws-idle"]);
    let target = day(2025, 1, 14);
    h.write("ws-1", target, "hello").await;

    let report = assert_ok!(h.job.run(target).await);

    assert_eq!(report.archived, 1);
    assert_eq!(report.missing, 1);
    assert!(report.is_clean());
    assert!(!h.registry.exists("ws-idle-2025-01-14").await);
}

#[tokio::test]
async fn test_whitespace_room_is_evicted_without_write() {
    let h = Harness::new(&["ws-1"]);
    let target = day(2025, 1, 14);
    let key = h.write("ws-1", target, "   \n\t ").await;

    let report = assert_ok!(h.job.run(target).await);

    assert_eq!(report.archived, 0);
    assert_eq!(report.blank, 1);
    assert_eq!(h.store.attempts(), 0);
    assert_evicted!(h.registry, &key);
}

#[tokio::test]
async fn test_persistence_failure_does_not_abort_batch() {
    let h = Harness::new(&["ws-a", "ws-b"]);
    let target = day(2025, 1, 14);
    let key_a = h.write("ws-a", target, "lost to the outage").await;
    let key_b = h.write("ws-b", target, "made it").await;
    h.store.fail_for("ws-a");

    let report = assert_ok!(h.job.run(target).await);

    assert_eq!(report.archived, 1);
    assert_eq!(report.failures.len(), 1);
    assert_matches!(
        &report.failures[0],
        ArchiveError::Persistence { workspace_id, date, .. } if workspace_id == "ws-a" && *date == target
    );
    assert_evicted!(h.registry, &key_a);
    assert_evicted!(h.registry, &key_b);
    assert_eq!(h.store.get("ws-b", target).as_deref(), Some("made it"));
}

/// A failed write still evicts the room, so that day's content is gone for
/// good: the next run has nothing left to retry.
#[tokio::test]
async fn test_failed_write_loses_content() {
    let h = Harness::new(&["ws-a"]);
    let target = day(2025, 1, 14);
    h.write("ws-a", target, "only copy").await;
    h.store.fail_for("ws-a");

    let first = assert_ok!(h.job.run(target).await);
    assert_eq!(first.failures.len(), 1);

    h.store.recover("ws-a");
    let second = assert_ok!(h.job.run(target).await);

    assert_eq!(second.archived, 0);
    assert_eq!(second.missing, 1);
    assert_eq!(h.store.get("ws-a", target), None);
}

#[tokio::test]
async fn test_rerun_upserts_single_record() {
    let h = Harness::new(&["ws-1"]);
    let target = day(2025, 1, 14);

    h.write("ws-1", target, "same text").await;
    assert_ok!(h.job.run(target).await);
    h.write("ws-1", target, "same text").await;
    assert_ok!(h.job.run(target).await);

    assert_eq!(h.store.attempts(), 2);
    assert_eq!(
        h.store.records(),
        vec![ArchiveRecord::new("ws-1", target, "same text")]
    );
}

#[tokio::test]
async fn test_only_target_day_is_retired() {
    let h = Harness::new(&["ws-1"]);
    let yesterday = day(2025, 1, 14);
    let today = day(2025, 1, 15);
    let old = h.write("ws-1", yesterday, "yesterday").await;
    let current = h.write("ws-1", today, "today").await;

    assert_ok!(h.job.run(yesterday).await);

    assert_evicted!(h.registry, &old);
    assert_live!(h.registry, &current);
}

#[tokio::test]
async fn test_workspace_list_unavailable_fails_whole_run() {
    let h = Harness::new(&["ws-1"]);
    let target = day(2025, 1, 14);
    let key = h.write("ws-1", target, "waiting").await;
    h.directory.set_down(true);

    let err = h.job.run(target).await.unwrap_err();

    assert_matches!(err, ArchiveError::WorkspaceListUnavailable(_));
    assert_contains!(err.to_string(), "workspace service unreachable");
    assert_eq!(h.job.consecutive_failures(), 1);
    assert_live!(h.registry, &key);
}

#[tokio::test]
async fn test_failure_counter_tracks_consecutive_runs() {
    let h = Harness::new(&["ws-1"]);
    h.store.fail_for("ws-1");

    h.write("ws-1", day(2025, 1, 13), "a").await;
    assert_ok!(h.job.run(day(2025, 1, 13)).await);
    assert_eq!(h.job.consecutive_failures(), 1);

    h.directory.set_down(true);
    assert!(h.job.run(day(2025, 1, 14)).await.is_err());
    assert_eq!(h.job.consecutive_failures(), 2);

    h.directory.set_down(false);
    h.store.recover("ws-1");
    h.write("ws-1", day(2025, 1, 15), "c").await;
    let report = assert_ok!(h.job.run(day(2025, 1, 15)).await);
    assert!(report.is_clean());
    assert_eq!(h.job.consecutive_failures(), 0);
}

#[tokio::test]
async fn test_report_counts_evictions() {
    let h = Harness::new(&["a", "b", "c", "d"]);
    let target = day(2025, 6, 1);
    h.write("a", target, "x").await;
    h.write("b", target, " ").await;
    h.write("c", target, "y").await;
    h.store.fail_for("c");

    let report = assert_ok!(h.job.run(target).await);

    assert_eq!(report.target, target);
    assert_eq!(
        (report.archived, report.blank, report.missing, report.failures.len()),
        (1, 1, 1, 1)
    );
    assert_eq!(report.evicted(), 3);
    assert!(report.last_error().is_some());
    assert!(!h.registry.exists(&RoomKey::new("c", target).encode()).await);
}
