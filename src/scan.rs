use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::SourceConfig;
use crate::models::SourceFile;

/// Enumerate every file under the source root matching the configured globs.
///
/// Content is not read here; yielding paths keeps read failures per-file
/// instead of aborting discovery. Results are sorted by relative path so
/// runs over the same tree process files in a stable order.
pub fn scan_source(source: &SourceConfig) -> Result<Vec<SourceFile>> {
    let root = &source.root;
    if !root.exists() {
        bail!("source root does not exist: {}", root.display());
    }

    let include_set = build_globset(&source.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(source.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(source.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }

        if !include_set.is_match(&rel_str) {
            continue;
        }

        files.push(SourceFile {
            absolute_path: path.to_path_buf(),
            relative_path: rel_str,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
