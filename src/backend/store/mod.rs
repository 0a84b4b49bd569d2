//! Storage Collaborators
//!
//! The archival code only needs two things from the outside world: the list
//! of workspaces that currently exist, and somewhere to upsert a day's text.
//! Both are traits so the job can run against Postgres in production and
//! against in-memory stores in tests or when no database is configured.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Collaborator traits and StoreError
//! ├── postgres.rs - sqlx-backed implementations
//! └── memory.rs   - In-memory implementations
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::shared::ArchiveRecord;

/// PostgreSQL implementations
pub mod postgres;

/// In-memory implementations
pub mod memory;

pub use memory::{MemoryLogStore, MemoryWorkspaceDirectory};
pub use postgres::{PgLogStore, PgWorkspaceDirectory};

/// Errors from a storage collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database rejected or failed the query
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store couldn't be reached or is in a bad state
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Durable store of archived day logs, keyed by `(workspace_id, date)`
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Insert the record, or replace the content of the existing record
    /// with the same workspace and date
    async fn upsert(&self, record: &ArchiveRecord) -> Result<(), StoreError>;

    /// Records for one workspace with `from <= date <= to`, ordered by date
    async fn range(
        &self,
        workspace_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ArchiveRecord>, StoreError>;
}

/// Source of truth for which workspaces exist
#[async_trait]
pub trait WorkspaceDirectory: Send + Sync {
    async fn list_workspace_ids(&self) -> Result<Vec<String>, StoreError>;
}
