//! SQLite-backed [`DocumentStore`] implementation.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::DocumentRecord;

use super::DocumentStore;

/// SQLite implementation of the [`DocumentStore`] trait.
///
/// Wraps a [`SqlitePool`] and translates every operation into a single SQL
/// statement, so each upsert commits or rolls back as one unit.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project TEXT NOT NULL,
                path TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                category TEXT,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_project ON documents(project)")
            .execute(&self.pool)
            .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_documents_updated_at ON documents(updated_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn upsert(&self, record: &DocumentRecord) -> Result<i64> {
        // The conflict target is the path's UNIQUE constraint, so the rowid
        // assigned on first insert survives every later replace.
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO documents (project, path, title, content, category, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(path) DO UPDATE SET
                project = excluded.project,
                title = excluded.title,
                content = excluded.content,
                category = excluded.category,
                updated_at = excluded.updated_at
            RETURNING id
            "#,
        )
        .bind(&record.project)
        .bind(&record.path)
        .bind(&record.title)
        .bind(&record.content)
        .bind(&record.category)
        .bind(record.updated_at.timestamp())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn count_by_project(&self, project: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE project = ?")
            .bind(project)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
