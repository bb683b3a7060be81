use anyhow::Result;

use crate::config::Config;

/// Print the resolved configuration and source health.
///
/// Useful for verifying a config file before the first sync.
pub fn run_check(config: &Config) -> Result<()> {
    let root_status = if config.source.root.exists() {
        "OK"
    } else {
        "MISSING"
    };

    println!("{:<12} {}", "project", config.project.name);
    println!(
        "{:<12} {}  [{}]",
        "source",
        config.source.root.display(),
        root_status
    );
    println!("{:<12} {}", "database", config.db.path.display());
    println!(
        "{:<12} {}",
        "include",
        config.source.include_globs.join(", ")
    );
    if !config.source.exclude_globs.is_empty() {
        println!(
            "{:<12} {}",
            "exclude",
            config.source.exclude_globs.join(", ")
        );
    }

    if config.categories.is_empty() {
        println!("{:<12} (none configured)", "categories");
    } else {
        println!("{:<12} {} rules", "categories", config.categories.len());
        for rule in &config.categories {
            println!("  {:<24} -> {}", rule.pattern, rule.label);
        }
    }

    Ok(())
}
