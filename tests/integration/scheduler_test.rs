//! Archival scheduler integration tests

use chrono::{NaiveTime, TimeZone, Utc};
use std::sync::Arc;

use daylog::backend::archive::{
    ArchivalJob, ArchivalScheduler, SchedulerState, TriggerOutcome,
};

use crate::common::{day, Harness};
use crate::{assert_evicted, assert_live};

fn scheduler_for(h: &Harness) -> ArchivalScheduler {
    let job = ArchivalJob::new(h.registry.clone(), h.directory.clone(), h.store.clone());
    ArchivalScheduler::new(Arc::new(job), NaiveTime::from_hms_opt(15, 0, 0).unwrap())
}

#[tokio::test]
async fn test_midnight_kst_trigger_archives_previous_day() {
    let h = Harness::new(&["ws-1"]);
    let scheduler = scheduler_for(&h);
    let yesterday = h.write("ws-1", day(2025, 1, 14), "tuesday notes").await;
    let today = h.write("ws-1", day(2025, 1, 15), "wednesday notes").await;

    // 2025-01-14T15:00Z is 2025-01-15T00:00+09:00
    let fire_at = Utc.with_ymd_and_hms(2025, 1, 14, 15, 0, 0).unwrap();
    let outcome = scheduler.fire(fire_at).await;

    match outcome {
        TriggerOutcome::Ran(Ok(report)) => {
            assert_eq!(report.target, day(2025, 1, 14));
            assert_eq!(report.archived, 1);
        }
        other => panic!("expected a successful run, got {:?}", other),
    }
    assert_evicted!(h.registry, &yesterday);
    assert_live!(h.registry, &today);
    assert_eq!(h.store.get("ws-1", day(2025, 1, 14)).as_deref(), Some("tuesday notes"));
    assert_eq!(scheduler.state(), SchedulerState::Idle);
}

#[tokio::test]
async fn test_failed_run_does_not_block_next_trigger() {
    let h = Harness::new(&["ws-1"]);
    let scheduler = scheduler_for(&h);
    h.directory.set_down(true);

    let first = scheduler.fire(Utc.with_ymd_and_hms(2025, 1, 14, 15, 0, 0).unwrap()).await;
    assert!(matches!(first, TriggerOutcome::Ran(Err(_))));
    assert_eq!(scheduler.job().consecutive_failures(), 1);

    h.directory.set_down(false);
    h.write("ws-1", day(2025, 1, 15), "next day").await;
    let second = scheduler.fire(Utc.with_ymd_and_hms(2025, 1, 15, 15, 0, 0).unwrap()).await;
    assert!(matches!(second, TriggerOutcome::Ran(Ok(ref r)) if r.archived == 1));
    assert_eq!(scheduler.job().consecutive_failures(), 0);
}

#[tokio::test]
async fn test_concurrent_triggers_for_same_target_run_once() {
    let h = Harness::new(&["ws-1"]);
    let scheduler = Arc::new(scheduler_for(&h));
    h.write("ws-1", day(2025, 1, 14), "once").await;
    let fire_at = Utc.with_ymd_and_hms(2025, 1, 14, 15, 0, 0).unwrap();

    let a = tokio::spawn({
        let scheduler = scheduler.clone();
        async move { scheduler.fire(fire_at).await }
    });
    let b = tokio::spawn({
        let scheduler = scheduler.clone();
        async move { scheduler.fire(fire_at).await }
    });
    let outcomes = [a.await.unwrap(), b.await.unwrap()];

    let ran = outcomes
        .iter()
        .filter(|o| matches!(o, TriggerOutcome::Ran(_)))
        .count();
    let skipped = outcomes
        .iter()
        .filter(|o| matches!(o, TriggerOutcome::AlreadyRan(_)))
        .count();
    assert_eq!((ran, skipped), (1, 1));
    assert_eq!(h.store.attempts(), 1);
}
