//! Two-phase import pipeline
//!
//! Phase one resolves every record against the store (read-only by default);
//! phase two commits links and play history for the fully-resolved set. The
//! split is what makes re-runs safe: a run can be repeated with
//! skip-if-linked after missing entities are fixed without duplicating the
//! history already recorded for previously-complete records.

use tracing::info;

use crate::models::{MissingReport, QuizExport, RunSummary};
use crate::services::{commit, partition, CommitMode, EntityResolver};
use crate::store::StoreGateway;

/// Pipeline options, mapped from CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Commit in skip-if-linked mode (safe re-run)
    pub missing_only: bool,
    /// Resolver opt-in: create songs whose artist resolved but which were
    /// not found themselves
    pub create_songs: bool,
}

/// Everything a finished run reports
#[derive(Debug, Clone)]
pub struct ImportRun {
    pub summary: RunSummary,
    pub missing: MissingReport,
}

/// Run the full pipeline over one export against the given store.
///
/// Never fails: store-level problems surface in the summary (missing
/// descriptors, error strings), not as errors from this function.
pub async fn run_import<G: StoreGateway>(
    store: &G,
    export: &QuizExport,
    options: ImportOptions,
) -> ImportRun {
    let records = export.records();
    let total = records.len();
    info!(total, missing_only = options.missing_only, "starting import");

    let resolver = EntityResolver::new(store).create_songs(options.create_songs);
    let mut outcomes = Vec::with_capacity(total);
    for (idx, record) in records.iter().enumerate() {
        info!("[{}/{}] resolving {}", idx + 1, total, record.label());
        outcomes.push(resolver.resolve(record).await);
    }

    let songs_created = outcomes.iter().filter(|o| o.created_song).count();
    let parts = partition(outcomes);
    info!(
        complete = parts.complete.len(),
        incomplete = parts.incomplete.len(),
        "resolution phase finished"
    );

    let mode = if options.missing_only {
        CommitMode::SkipIfLinked
    } else {
        CommitMode::Normal
    };
    let stats = commit(store, &parts.complete, mode).await;

    let summary = RunSummary {
        total,
        complete: parts.complete.len(),
        incomplete: parts.incomplete.len(),
        links_created: stats.links_created,
        histories_created: stats.histories_created,
        songs_created,
        skipped: stats.skipped,
        errors: stats.errors,
    };
    info!(
        links = summary.links_created,
        histories = summary.histories_created,
        skipped = summary.skipped,
        errors = summary.errors.len(),
        "import finished"
    );

    ImportRun {
        summary,
        missing: parts.missing,
    }
}
