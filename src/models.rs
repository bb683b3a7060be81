//! Core data models.
//!
//! These types represent the files, records, and run reports that flow
//! through the sync pipeline.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A file discovered under the source root, before its content is read.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub absolute_path: PathBuf,
    /// Path relative to the scanned root; the document's identity key.
    pub relative_path: String,
}

/// One document as materialized for a single sync pass.
///
/// Records are transient; the persisted row they map to is created on the
/// first sync of a path and fully replaced on every subsequent sync. The
/// store-assigned surrogate id is stable across replacements.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub project: String,
    pub path: String,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// A file that failed during a sync pass, with the rendered cause.
#[derive(Debug, Clone, Serialize)]
pub struct SyncFailure {
    pub path: String,
    pub reason: String,
}

/// Outcome of a full sync pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Files discovered under the source root.
    pub total: usize,
    /// Files read, classified, and upserted without error.
    pub succeeded: usize,
    /// Files skipped after a read or upsert failure.
    pub failed: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
