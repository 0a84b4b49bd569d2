//! # Archival Scheduler
//!
//! Fires the archival job once a day at a fixed UTC wall-clock time (15:00
//! by default, which is midnight in UTC+9) for "yesterday" in UTC+9.
//!
//! ## Behaviour
//!
//! - **Time-based**: the next trigger is scheduled as soon as the previous
//!   one fires, never after the run finishes.
//! - **Serialized**: runs take a mutex, so a run that's still going when the
//!   next trigger fires makes that trigger wait rather than overlap.
//! - **At most once per target**: a scheduled trigger whose target has
//!   already been run is skipped.
//! - **Jitter-proof target**: the target is derived from the scheduled fire
//!   instant, not from when the timer actually woke up.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::backend::archive::error::ArchiveError;
use crate::backend::archive::job::{ArchivalJob, ArchiveReport};
use crate::shared::room_key::reference_yesterday;

/// Whether an archival run is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Result of asking the scheduler to run
#[derive(Debug)]
pub enum TriggerOutcome {
    /// The job ran for the target
    Ran(Result<ArchiveReport, ArchiveError>),
    /// A scheduled run for this target already happened
    AlreadyRan(NaiveDate),
}

/// Holds `running` up until dropped, including by a panicking run
struct RunningFlag<'a>(&'a AtomicBool);

impl<'a> RunningFlag<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Archival target for a trigger firing at `fire_at`
pub fn target_for(fire_at: DateTime<Utc>) -> NaiveDate {
    reference_yesterday(&fire_at)
}

/// Daily trigger for the archival job
pub struct ArchivalScheduler {
    job: Arc<ArchivalJob>,
    fire_at_utc: NaiveTime,
    /// Held for the duration of a run; stores the last scheduled target
    last_target: Mutex<Option<NaiveDate>>,
    running: AtomicBool,
}

impl ArchivalScheduler {
    pub fn new(job: Arc<ArchivalJob>, fire_at_utc: NaiveTime) -> Self {
        Self {
            job,
            fire_at_utc,
            last_target: Mutex::new(None),
            running: AtomicBool::new(false),
        }
    }

    pub fn job(&self) -> &Arc<ArchivalJob> {
        &self.job
    }

    pub fn state(&self) -> SchedulerState {
        if self.running.load(Ordering::SeqCst) {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    /// First fire instant strictly after `now`
    pub fn next_fire_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive().and_time(self.fire_at_utc).and_utc();
        if today > now {
            today
        } else {
            today.checked_add_days(Days::new(1)).unwrap_or(today)
        }
    }

    /// Scheduled trigger: run the job for the target of `fire_at`
    pub async fn fire(&self, fire_at: DateTime<Utc>) -> TriggerOutcome {
        let target = target_for(fire_at);
        let mut last_target = self.last_target.lock().await;
        if *last_target == Some(target) {
            tracing::warn!("[Scheduler] Archival for {} already ran, skipping trigger", target);
            return TriggerOutcome::AlreadyRan(target);
        }
        *last_target = Some(target);

        let result = self.run_locked(target).await;
        drop(last_target);
        TriggerOutcome::Ran(result)
    }

    /// Manual trigger for an explicit target
    ///
    /// Waits for any run in progress. Re-running a target is allowed; the
    /// store's upsert keeps it to one record per workspace and day.
    pub async fn trigger(&self, target: NaiveDate) -> Result<ArchiveReport, ArchiveError> {
        let _guard = self.last_target.lock().await;
        self.run_locked(target).await
    }

    async fn run_locked(&self, target: NaiveDate) -> Result<ArchiveReport, ArchiveError> {
        let _running = RunningFlag::raise(&self.running);
        self.job.run(target).await
    }

    /// Spawn the daily timer loop
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let now = Utc::now();
                let fire_at = self.next_fire_after(now);
                let wait = (fire_at - now).to_std().unwrap_or(Duration::ZERO);
                tracing::info!(
                    "[Scheduler] Next archival at {} for {}",
                    fire_at,
                    target_for(fire_at)
                );
                tokio::time::sleep(wait).await;

                // Each trigger gets its own task so a slow run can't delay the next one
                let scheduler = self.clone();
                tokio::spawn(async move {
                    scheduler.fire(fire_at).await;
                });
            }
        })
    }
}
