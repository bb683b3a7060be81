//! Storage abstraction for synced documents.
//!
//! The [`DocumentStore`] trait defines the operations the sync pass needs
//! from a persistent table keyed uniquely by path, enabling pluggable
//! backends (SQLite in production, in-memory for tests).
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::DocumentRecord;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

/// Abstract storage backend for document rows.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`ensure_schema`](DocumentStore::ensure_schema) | Create the documents table if missing |
/// | [`upsert`](DocumentStore::upsert) | Insert or fully replace a row, keyed by path |
/// | [`count_by_project`](DocumentStore::count_by_project) | Row count for end-of-run reporting |
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Guarantee the documents table exists. Idempotent; must be called
    /// before the first upsert.
    async fn ensure_schema(&self) -> Result<()>;

    /// Insert a row for an unseen path, or replace every field of the
    /// existing row (last write wins). Atomic per call.
    ///
    /// Returns the row's surrogate id, which is stable across replacements
    /// of the same path.
    async fn upsert(&self, record: &DocumentRecord) -> Result<i64>;

    /// Number of rows tagged with the given project.
    async fn count_by_project(&self, project: &str) -> Result<i64>;
}
