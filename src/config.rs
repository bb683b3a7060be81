use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::classify::CategoryRule;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub db: DbConfig,
    pub source: SourceConfig,
    /// Ordered classification rules; first match wins.
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProjectConfig {
    /// Tag identifying the corpus; stored on every row.
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.project.name.trim().is_empty() {
        anyhow::bail!("project.name must not be empty");
    }

    if config.source.include_globs.is_empty() {
        anyhow::bail!("source.include_globs must list at least one pattern");
    }

    for rule in &config.categories {
        if rule.pattern.is_empty() {
            anyhow::bail!("categories: pattern must not be empty");
        }
        if rule.label.trim().is_empty() {
            anyhow::bail!(
                "categories: label must not be empty (pattern '{}')",
                rule.pattern
            );
        }
    }

    Ok(config)
}
