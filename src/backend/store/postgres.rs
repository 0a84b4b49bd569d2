/**
 * PostgreSQL Storage
 *
 * sqlx-backed log store and workspace directory. Queries are checked at
 * runtime so the crate builds without a live database.
 */

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::backend::store::{LogStore, StoreError, WorkspaceDirectory};
use crate::shared::ArchiveRecord;

/// Archived day logs in the `daily_logs` table
#[derive(Debug, Clone)]
pub struct PgLogStore {
    pool: PgPool,
}

impl PgLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogStore for PgLogStore {
    async fn upsert(&self, record: &ArchiveRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO daily_logs (workspace_id, log_date, content, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (workspace_id, log_date) DO UPDATE SET
                content = EXCLUDED.content,
                updated_at = NOW()
            "#
        )
        .bind(&record.workspace_id)
        .bind(record.date)
        .bind(&record.content)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn range(
        &self,
        workspace_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ArchiveRecord>, StoreError> {
        #[derive(sqlx::FromRow)]
        struct DailyLogRow {
            workspace_id: String,
            log_date: NaiveDate,
            content: String,
        }

        let rows = sqlx::query_as::<_, DailyLogRow>(
            r#"
            SELECT workspace_id, log_date, content
            FROM daily_logs
            WHERE workspace_id = $1 AND log_date BETWEEN $2 AND $3
            ORDER BY log_date ASC
            "#
        )
        .bind(workspace_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ArchiveRecord::new(row.workspace_id, row.log_date, row.content))
            .collect())
    }
}

/// Workspace ids from the `workspaces` table
#[derive(Debug, Clone)]
pub struct PgWorkspaceDirectory {
    pool: PgPool,
}

impl PgWorkspaceDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceDirectory for PgWorkspaceDirectory {
    async fn list_workspace_ids(&self) -> Result<Vec<String>, StoreError> {
        let ids = sqlx::query_scalar::<_, String>("SELECT id FROM workspaces ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }
}
