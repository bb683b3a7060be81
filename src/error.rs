//! Per-file sync errors.
//!
//! A file that fails to read or upsert is recorded in the run report and the
//! pass continues; only connection, schema, and scan failures abort a run
//! (those surface as `anyhow::Error` from the plumbing).

use thiserror::Error;

/// Why a single file was skipped during a sync pass.
#[derive(Debug, Error)]
pub enum FileSyncError {
    /// The file could not be read as UTF-8 text.
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    /// The store rejected the upsert.
    #[error("upsert failed: {0}")]
    Upsert(anyhow::Error),
}
