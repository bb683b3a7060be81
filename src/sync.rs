//! Sync reconciliation.
//!
//! Coordinates the full sync flow: scan the source tree, derive per-file
//! metadata (title, category), and drive the store's upsert for each file.
//! Failures are isolated per file; one unreadable document never aborts the
//! batch. Every run is a full rescan, which doubles as the recovery
//! mechanism for files that failed last time.

use anyhow::Result;
use chrono::Utc;

use crate::classify::classify;
use crate::config::Config;
use crate::error::FileSyncError;
use crate::models::{DocumentRecord, SourceFile, SyncFailure, SyncReport};
use crate::progress::{SyncProgressEvent, SyncProgressReporter};
use crate::scan;
use crate::store::DocumentStore;
use crate::title::extract_title;

/// Per-run knobs resolved by the CLI layer.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Corpus tag stamped on every row.
    pub project: String,
    /// Discover and count, but write nothing.
    pub dry_run: bool,
    /// Cap on the number of files processed this run.
    pub limit: Option<usize>,
}

/// Run a full sync pass over the configured source tree.
///
/// Connection and schema setup belong to the caller; by the time this runs,
/// the store must be ready to accept upserts. Scan failures abort the run
/// before any row is touched. Per-file read and upsert failures are recorded
/// in the report and the pass continues.
pub async fn run_sync(
    config: &Config,
    store: &dyn DocumentStore,
    reporter: &dyn SyncProgressReporter,
    opts: &SyncOptions,
) -> Result<SyncReport> {
    reporter.report(SyncProgressEvent::Discovering {
        root: config.source.root.display().to_string(),
    });

    let mut files = scan::scan_source(&config.source)?;
    if let Some(limit) = opts.limit {
        files.truncate(limit);
    }

    let total = files.len();
    let mut report = SyncReport {
        total,
        succeeded: 0,
        failed: Vec::new(),
    };

    if opts.dry_run {
        return Ok(report);
    }

    for (n, file) in files.iter().enumerate() {
        reporter.report(SyncProgressEvent::Syncing {
            n: n as u64 + 1,
            total: total as u64,
        });

        match sync_file(config, store, opts, file).await {
            Ok(_id) => report.succeeded += 1,
            Err(err) => report.failed.push(SyncFailure {
                path: file.relative_path.clone(),
                reason: err.to_string(),
            }),
        }
    }

    Ok(report)
}

/// Read, classify, and upsert one file. Returns the row's surrogate id.
async fn sync_file(
    config: &Config,
    store: &dyn DocumentStore,
    opts: &SyncOptions,
    file: &SourceFile,
) -> Result<i64, FileSyncError> {
    let content = std::fs::read_to_string(&file.absolute_path)?;

    let record = DocumentRecord {
        project: opts.project.clone(),
        path: file.relative_path.clone(),
        title: extract_title(&content),
        category: classify(&config.categories, &file.relative_path),
        content,
        updated_at: Utc::now(),
    };

    store.upsert(&record).await.map_err(FileSyncError::Upsert)
}
