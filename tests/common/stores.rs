//! Storage test doubles
//!
//! Wrappers around the in-memory stores that can be told to fail, so the
//! "continue past a failure" paths can be exercised.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::{Notify, Semaphore};

use daylog::backend::store::{
    LogStore, MemoryLogStore, MemoryWorkspaceDirectory, StoreError, WorkspaceDirectory,
};
use daylog::shared::ArchiveRecord;

/// Log store whose upserts fail for chosen workspaces
#[derive(Debug, Default)]
pub struct FlakyLogStore {
    inner: MemoryLogStore,
    failing: Mutex<HashSet<String>>,
    attempts: AtomicUsize,
}

impl FlakyLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upsert for `workspace_id` fail
    pub fn fail_for(&self, workspace_id: &str) {
        self.failing.lock().unwrap().insert(workspace_id.to_string());
    }

    /// Let upserts for `workspace_id` succeed again
    pub fn recover(&self, workspace_id: &str) {
        self.failing.lock().unwrap().remove(workspace_id);
    }

    /// Number of upserts attempted, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn get(&self, workspace_id: &str, date: NaiveDate) -> Option<String> {
        self.inner.get(workspace_id, date)
    }

    pub fn records(&self) -> Vec<ArchiveRecord> {
        self.inner.records()
    }
}

#[async_trait]
impl LogStore for FlakyLogStore {
    async fn upsert(&self, record: &ArchiveRecord) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(&record.workspace_id) {
            return Err(StoreError::unavailable("injected write failure"));
        }
        self.inner.upsert(record).await
    }

    async fn range(
        &self,
        workspace_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ArchiveRecord>, StoreError> {
        self.inner.range(workspace_id, from, to).await
    }
}

/// Log store whose first upsert blocks until the gate is opened
#[derive(Debug)]
pub struct GatedLogStore {
    inner: MemoryLogStore,
    armed: AtomicBool,
    entered: Notify,
    gate: Semaphore,
}

impl GatedLogStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryLogStore::new(),
            armed: AtomicBool::new(true),
            entered: Notify::new(),
            gate: Semaphore::new(0),
        }
    }

    /// Wait until the first upsert is parked at the gate
    pub async fn wait_for_blocked_upsert(&self) {
        self.entered.notified().await;
    }

    pub fn open_gate(&self) {
        self.gate.add_permits(1);
    }

    pub fn get(&self, workspace_id: &str, date: NaiveDate) -> Option<String> {
        self.inner.get(workspace_id, date)
    }
}

impl Default for GatedLogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogStore for GatedLogStore {
    async fn upsert(&self, record: &ArchiveRecord) -> Result<(), StoreError> {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|_| StoreError::unavailable("gate closed"))?;
        }
        self.inner.upsert(record).await
    }

    async fn range(
        &self,
        workspace_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ArchiveRecord>, StoreError> {
        self.inner.range(workspace_id, from, to).await
    }
}

/// Workspace directory that can be switched off
#[derive(Debug, Default)]
pub struct SwitchableDirectory {
    inner: MemoryWorkspaceDirectory,
    down: AtomicBool,
}

impl SwitchableDirectory {
    pub fn with_workspaces(ids: &[&str]) -> Self {
        Self {
            inner: MemoryWorkspaceDirectory::with_workspaces(ids.iter().copied()),
            down: AtomicBool::new(false),
        }
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn remove(&self, workspace_id: &str) -> bool {
        self.inner.remove(workspace_id)
    }
}

#[async_trait]
impl WorkspaceDirectory for SwitchableDirectory {
    async fn list_workspace_ids(&self) -> Result<Vec<String>, StoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("workspace service unreachable"));
        }
        self.inner.list_workspace_ids().await
    }
}
