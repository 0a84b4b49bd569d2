/**
 * In-Memory Storage
 *
 * Process-local stand-ins for the Postgres collaborators. Used when
 * `DATABASE_URL` is not set and by the test suite. Content does not survive
 * a restart.
 */

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, RwLock};

use crate::backend::store::{LogStore, StoreError, WorkspaceDirectory};
use crate::shared::ArchiveRecord;

/// Archive records held in a map keyed by `(workspace_id, date)`
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    records: Mutex<BTreeMap<(String, NaiveDate), String>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content stored for one workspace and day
    pub fn get(&self, workspace_id: &str, date: NaiveDate) -> Option<String> {
        self.records
            .lock()
            .ok()?
            .get(&(workspace_id.to_string(), date))
            .cloned()
    }

    /// Every stored record, ordered by workspace then date
    pub fn records(&self) -> Vec<ArchiveRecord> {
        match self.records.lock() {
            Ok(records) => records
                .iter()
                .map(|((workspace_id, date), content)| {
                    ArchiveRecord::new(workspace_id.clone(), *date, content.clone())
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn upsert(&self, record: &ArchiveRecord) -> Result<(), StoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError::unavailable("log store lock poisoned"))?;
        records.insert(
            (record.workspace_id.clone(), record.date),
            record.content.clone(),
        );
        Ok(())
    }

    async fn range(
        &self,
        workspace_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ArchiveRecord>, StoreError> {
        if from > to {
            return Ok(Vec::new());
        }
        let records = self
            .records
            .lock()
            .map_err(|_| StoreError::unavailable("log store lock poisoned"))?;
        let start = (workspace_id.to_string(), from);
        let end = (workspace_id.to_string(), to);
        Ok(records
            .range(start..=end)
            .map(|((workspace_id, date), content)| {
                ArchiveRecord::new(workspace_id.clone(), *date, content.clone())
            })
            .collect())
    }
}

/// A fixed, editable set of workspace ids
#[derive(Debug, Default)]
pub struct MemoryWorkspaceDirectory {
    ids: RwLock<BTreeSet<String>>,
}

impl MemoryWorkspaceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspaces<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: RwLock::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    pub fn insert(&self, workspace_id: impl Into<String>) {
        if let Ok(mut ids) = self.ids.write() {
            ids.insert(workspace_id.into());
        }
    }

    /// Forget a workspace, as if it had been deleted
    pub fn remove(&self, workspace_id: &str) -> bool {
        self.ids
            .write()
            .map(|mut ids| ids.remove(workspace_id))
            .unwrap_or(false)
    }
}

#[async_trait]
impl WorkspaceDirectory for MemoryWorkspaceDirectory {
    async fn list_workspace_ids(&self) -> Result<Vec<String>, StoreError> {
        let ids = self
            .ids
            .read()
            .map_err(|_| StoreError::unavailable("workspace directory lock poisoned"))?;
        Ok(ids.iter().cloned().collect())
    }
}
