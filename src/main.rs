//! quizdb-import - music-quiz play log importer
//!
//! Reads a quiz export file, resolves each played song's artist, show, and
//! song against the quizdb store, links resolved show-song pairs, and records
//! play history. Re-runnable: `--missing-only` skips pairs that are already
//! linked so a re-run after fixing missing entities records no duplicate
//! history.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use quizdb_import::models::QuizExport;
use quizdb_import::services::report;
use quizdb_import::store::CommandGateway;
use quizdb_import::{run_import, ImportOptions};

/// Command-line arguments for quizdb-import
#[derive(Parser, Debug)]
#[command(name = "quizdb-import")]
#[command(about = "Import music-quiz play logs into a quizdb store")]
#[command(version)]
struct Args {
    /// Path to the quiz export JSON file
    export_file: PathBuf,

    /// Skip records whose show-song link already exists (safe re-run mode)
    #[arg(long)]
    missing_only: bool,

    /// Create songs whose artist resolved but which were not found themselves
    #[arg(long)]
    create_songs: bool,

    /// Store CLI binary to invoke
    #[arg(long, default_value = "quizdb", env = "QUIZDB_BIN")]
    store_bin: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting quizdb-import v{} ({})",
        env!("CARGO_PKG_VERSION"),
        args.export_file.display()
    );

    // An unreadable or unparsable export is the only fatal failure past
    // argument parsing; the Err return is the non-zero exit
    let export = QuizExport::load(&args.export_file)
        .with_context(|| format!("cannot import {}", args.export_file.display()))?;

    let gateway = CommandGateway::new(args.store_bin);
    let options = ImportOptions {
        missing_only: args.missing_only,
        create_songs: args.create_songs,
    };

    let run = run_import(&gateway, &export, options).await;
    print!("{}", report::render(&run.summary, &run.missing));

    // Per-record commit errors are reported above, not fatal
    Ok(())
}
