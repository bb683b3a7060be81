//! Reconciler behavior tests against the in-memory store.

use std::fs;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use docsync::classify::CategoryRule;
use docsync::config::{Config, DbConfig, ProjectConfig, SourceConfig};
use docsync::models::DocumentRecord;
use docsync::progress::NoProgress;
use docsync::store::{DocumentStore, InMemoryStore};
use docsync::sync::{run_sync, SyncOptions};

fn test_config(root: &Path) -> Config {
    Config {
        project: ProjectConfig {
            name: "notes".to_string(),
        },
        db: DbConfig {
            path: root.join("unused.sqlite"),
        },
        source: SourceConfig {
            root: root.to_path_buf(),
            include_globs: vec!["**/*.md".to_string()],
            exclude_globs: vec![],
            follow_symlinks: false,
        },
        categories: vec![
            CategoryRule {
                pattern: "design".to_string(),
                label: "design".to_string(),
            },
            CategoryRule {
                pattern: "tests".to_string(),
                label: "testing".to_string(),
            },
        ],
    }
}

fn opts() -> SyncOptions {
    SyncOptions {
        project: "notes".to_string(),
        dry_run: false,
        limit: None,
    }
}

#[tokio::test]
async fn syncs_all_files_and_derives_metadata() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("design")).unwrap();
    fs::write(tmp.path().join("design/layout.md"), "# Layout\n\nnotes").unwrap();
    fs::write(tmp.path().join("intro.md"), "plain opening line\nbody").unwrap();

    let config = test_config(tmp.path());
    let store = InMemoryStore::new();

    let report = run_sync(&config, &store, &NoProgress, &opts()).await.unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.succeeded, 2);
    assert!(report.is_clean());
    assert_eq!(store.len(), 2);

    let (_, layout) = store.get("design/layout.md").unwrap();
    assert_eq!(layout.title, "Layout");
    assert_eq!(layout.category, Some("design".to_string()));
    assert_eq!(layout.project, "notes");

    let (_, intro) = store.get("intro.md").unwrap();
    assert_eq!(intro.title, "plain opening line");
    assert_eq!(intro.category, None);
}

#[tokio::test]
async fn unreadable_file_is_isolated() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.md"), "# A").unwrap();
    fs::write(tmp.path().join("b.md"), [0x66u8, 0x6f, 0xff, 0xfe]).unwrap();
    fs::write(tmp.path().join("c.md"), "# C").unwrap();

    let config = test_config(tmp.path());
    let store = InMemoryStore::new();

    let report = run_sync(&config, &store, &NoProgress, &opts()).await.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, "b.md");
    assert!(report.failed[0].reason.contains("read failed"));

    // Both readable files are persisted despite the failure between them.
    assert!(store.get("a.md").is_some());
    assert!(store.get("c.md").is_some());
    assert!(store.get("b.md").is_none());
}

#[tokio::test]
async fn resync_replaces_every_field_and_keeps_id() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("p.md"), "# First\n\ncontent A").unwrap();

    let config = test_config(tmp.path());
    let store = InMemoryStore::new();

    run_sync(&config, &store, &NoProgress, &opts()).await.unwrap();
    let (first_id, first) = store.get("p.md").unwrap();
    assert_eq!(first.title, "First");

    fs::write(tmp.path().join("p.md"), "# Second\n\ncontent B").unwrap();
    run_sync(&config, &store, &NoProgress, &opts()).await.unwrap();

    let (second_id, second) = store.get("p.md").unwrap();
    assert_eq!(second_id, first_id);
    assert_eq!(second.title, "Second");
    assert_eq!(second.content, "# Second\n\ncontent B");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn unchanged_tree_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("one.md"), "# One").unwrap();
    fs::write(tmp.path().join("two.md"), "# Two").unwrap();

    let config = test_config(tmp.path());
    let store = InMemoryStore::new();

    run_sync(&config, &store, &NoProgress, &opts()).await.unwrap();
    let (id_one, rec_one) = store.get("one.md").unwrap();
    let (id_two, _) = store.get("two.md").unwrap();

    let report = run_sync(&config, &store, &NoProgress, &opts()).await.unwrap();
    assert_eq!(report.succeeded, 2);

    let (id_one_again, rec_one_again) = store.get("one.md").unwrap();
    let (id_two_again, _) = store.get("two.md").unwrap();
    assert_eq!(id_one_again, id_one);
    assert_eq!(id_two_again, id_two);
    assert_eq!(rec_one_again.title, rec_one.title);
    assert_eq!(rec_one_again.content, rec_one.content);
    assert_eq!(rec_one_again.category, rec_one.category);
    assert_eq!(rec_one_again.project, rec_one.project);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn repeated_syncs_never_duplicate_paths() {
    let tmp = TempDir::new().unwrap();
    for name in ["a.md", "b.md", "c.md", "d.md"] {
        fs::write(tmp.path().join(name), "# Doc").unwrap();
    }

    let config = test_config(tmp.path());
    let store = InMemoryStore::new();

    for _ in 0..3 {
        run_sync(&config, &store, &NoProgress, &opts()).await.unwrap();
    }

    assert_eq!(store.count_by_project("notes").await.unwrap(), 4);
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.md"), "# A").unwrap();
    fs::write(tmp.path().join("b.md"), "# B").unwrap();

    let config = test_config(tmp.path());
    let store = InMemoryStore::new();

    let mut options = opts();
    options.dry_run = true;
    let report = run_sync(&config, &store, &NoProgress, &options)
        .await
        .unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.succeeded, 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn limit_caps_the_pass() {
    let tmp = TempDir::new().unwrap();
    for name in ["a.md", "b.md", "c.md"] {
        fs::write(tmp.path().join(name), "# Doc").unwrap();
    }

    let config = test_config(tmp.path());
    let store = InMemoryStore::new();

    let mut options = opts();
    options.limit = Some(2);
    let report = run_sync(&config, &store, &NoProgress, &options)
        .await
        .unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.succeeded, 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn first_matching_category_rule_wins() {
    let tmp = TempDir::new().unwrap();
    // Matches both the "design" and "tests" patterns; table order decides.
    fs::create_dir_all(tmp.path().join("design/tests")).unwrap();
    fs::write(tmp.path().join("design/tests/plan.md"), "# Plan").unwrap();

    let config = test_config(tmp.path());
    let store = InMemoryStore::new();

    run_sync(&config, &store, &NoProgress, &opts()).await.unwrap();

    let (_, record) = store.get("design/tests/plan.md").unwrap();
    assert_eq!(record.category, Some("design".to_string()));
}

/// Store double that rejects upserts for paths containing a marker.
struct FailOn {
    inner: InMemoryStore,
    needle: &'static str,
}

#[async_trait]
impl DocumentStore for FailOn {
    async fn ensure_schema(&self) -> Result<()> {
        self.inner.ensure_schema().await
    }

    async fn upsert(&self, record: &DocumentRecord) -> Result<i64> {
        if record.path.contains(self.needle) {
            anyhow::bail!("constraint violation");
        }
        self.inner.upsert(record).await
    }

    async fn count_by_project(&self, project: &str) -> Result<i64> {
        self.inner.count_by_project(project).await
    }
}

#[tokio::test]
async fn upsert_failure_is_isolated() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("good.md"), "# Good").unwrap();
    fs::write(tmp.path().join("rejected.md"), "# Rejected").unwrap();

    let config = test_config(tmp.path());
    let store = FailOn {
        inner: InMemoryStore::new(),
        needle: "rejected",
    };

    let report = run_sync(&config, &store, &NoProgress, &opts()).await.unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, "rejected.md");
    assert!(report.failed[0].reason.contains("upsert failed"));
    assert!(store.inner.get("good.md").is_some());
}
