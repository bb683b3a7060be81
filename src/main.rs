//! # docsync CLI
//!
//! The `docsync` binary syncs a directory tree of text documents into a
//! SQLite table so the content becomes queryable.
//!
//! ## Usage
//!
//! ```bash
//! docsync --config ./config/docsync.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docsync init` | Create the SQLite database and the documents table |
//! | `docsync check` | Show the resolved configuration and source health |
//! | `docsync sync` | Run a full sync pass over the source tree |
//! | `docsync stats` | Show document counts and category breakdown |
//! | `docsync completions <shell>` | Generate shell completions |

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

use docsync::progress::ProgressMode;
use docsync::store::{DocumentStore, SqliteStore};
use docsync::sync::SyncOptions;
use docsync::{check, config, db, stats, sync};

/// docsync — sync a tree of text documents into a queryable SQLite table.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/docsync.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "docsync",
    about = "Sync a directory tree of text documents into a queryable SQLite table",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/docsync.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the documents table. Safe to
    /// run multiple times.
    Init,

    /// Show the resolved configuration and source health.
    Check,

    /// Run a full sync pass over the source tree.
    ///
    /// Every run rescans everything: each matching file is read, its title
    /// and category are derived, and its row is inserted or fully replaced.
    /// A file that fails to read or upsert is reported and skipped; the run
    /// continues.
    Sync {
        /// Override the project tag from the config file.
        #[arg(long)]
        project: Option<String>,

        /// Discover and count files without writing to the database.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of files to process.
        #[arg(long)]
        limit: Option<usize>,

        /// Progress output on stderr. Defaults to `human` when stderr is a
        /// TTY, `off` otherwise.
        #[arg(long, value_enum)]
        progress: Option<ProgressArg>,

        /// Print the run report as JSON on stdout instead of the summary.
        #[arg(long)]
        json: bool,
    },

    /// Show document counts and category breakdown.
    Stats,

    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProgressArg {
    Off,
    Human,
    Json,
}

impl From<ProgressArg> for ProgressMode {
    fn from(arg: ProgressArg) -> Self {
        match arg {
            ProgressArg::Off => ProgressMode::Off,
            ProgressArg::Human => ProgressMode::Human,
            ProgressArg::Json => ProgressMode::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Completions don't need a config file
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&cfg.db).await?;
            let store = SqliteStore::new(pool);
            store.ensure_schema().await?;
            store.pool().close().await;
            println!("Database initialized successfully.");
        }
        Commands::Check => {
            check::run_check(&cfg)?;
        }
        Commands::Sync {
            project,
            dry_run,
            limit,
            progress,
            json,
        } => {
            let pool = db::connect(&cfg.db).await?;
            let store = SqliteStore::new(pool);
            store.ensure_schema().await?;

            let mode = progress
                .map(ProgressMode::from)
                .unwrap_or_else(ProgressMode::default_for_tty);
            let reporter = mode.reporter();

            let opts = SyncOptions {
                project: project.unwrap_or_else(|| cfg.project.name.clone()),
                dry_run,
                limit,
            };

            let report = sync::run_sync(&cfg, &store, reporter.as_ref(), &opts).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if dry_run {
                println!("sync {} (dry-run)", opts.project);
                println!("  files found: {}", report.total);
            } else {
                println!("sync {}", opts.project);
                println!("  files found: {}", report.total);
                println!("  synced: {}", report.succeeded);
                println!("  failed: {}", report.failed.len());
                for failure in &report.failed {
                    println!("    {}: {}", failure.path, failure.reason);
                }
                let total_docs = store.count_by_project(&opts.project).await?;
                println!("  documents in store: {}", total_docs);
                if report.is_clean() {
                    println!("ok");
                }
            }

            store.pool().close().await;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
