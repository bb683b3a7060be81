//! Database statistics overview.
//!
//! Provides a quick summary of what's synced: document counts, per-category
//! breakdown, and the last sync time. Used by `docsync stats` to give
//! confidence that syncs are working as expected.

use anyhow::{Context, Result};
use sqlx::Row;

use crate::config::Config;
use crate::db;
use crate::store::{DocumentStore, SqliteStore};

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(&config.db).await?;
    let store = SqliteStore::new(pool);

    let project = &config.project.name;
    let total_docs = store
        .count_by_project(project)
        .await
        .context("reading document counts (run `docsync init` first?)")?;

    let last_sync: Option<i64> = sqlx::query_scalar(
        "SELECT MAX(updated_at) FROM documents WHERE project = ?",
    )
    .bind(project)
    .fetch_one(store.pool())
    .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("docsync — Database Stats");
    println!("========================");
    println!();
    println!("  Database:   {}", config.db.path.display());
    println!("  Size:       {}", format_bytes(db_size));
    println!();
    println!("  Project:    {}", project);
    println!("  Documents:  {}", total_docs);
    match last_sync {
        Some(ts) => println!("  Last sync:  {}", format_ts_iso(ts)),
        None => println!("  Last sync:  never"),
    }

    // Per-category breakdown
    let category_rows = sqlx::query(
        r#"
        SELECT
            COALESCE(category, '(uncategorized)') AS category,
            COUNT(*) AS doc_count
        FROM documents
        WHERE project = ?
        GROUP BY category
        ORDER BY doc_count DESC, category ASC
        "#,
    )
    .bind(project)
    .fetch_all(store.pool())
    .await?;

    if !category_rows.is_empty() {
        println!();
        println!("  {:<24} DOCS", "CATEGORY");
        for row in &category_rows {
            let category: String = row.get("category");
            let doc_count: i64 = row.get("doc_count");
            println!("  {:<24} {}", category, doc_count);
        }
    }

    store.pool().close().await;
    Ok(())
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
