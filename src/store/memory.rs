//! In-memory [`DocumentStore`] implementation for testing.
//!
//! Uses a `HashMap` keyed by path behind `std::sync::RwLock`, with a
//! monotonically increasing id counter standing in for the database's
//! autoincrement rowid.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::DocumentRecord;

use super::DocumentStore;

struct StoredRow {
    id: i64,
    record: DocumentRecord,
}

/// In-memory store for tests.
pub struct InMemoryStore {
    rows: RwLock<HashMap<String, StoredRow>>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Look up a stored row by path. Test helper.
    pub fn get(&self, path: &str) -> Option<(i64, DocumentRecord)> {
        self.rows
            .read()
            .unwrap()
            .get(path)
            .map(|row| (row.id, row.record.clone()))
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, record: &DocumentRecord) -> Result<i64> {
        let mut rows = self.rows.write().unwrap();
        match rows.get_mut(&record.path) {
            Some(row) => {
                row.record = record.clone();
                Ok(row.id)
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                rows.insert(
                    record.path.clone(),
                    StoredRow {
                        id,
                        record: record.clone(),
                    },
                );
                Ok(id)
            }
        }
    }

    async fn count_by_project(&self, project: &str) -> Result<i64> {
        let rows = self.rows.read().unwrap();
        Ok(rows
            .values()
            .filter(|row| row.record.project == project)
            .count() as i64)
    }
}
