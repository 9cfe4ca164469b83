//! Commit engine: link and play-history writes for resolved records
//!
//! A show-song link is establish-once: it is checked before every create.
//! Play history is attach-many: one history per play event, never
//! deduplicated by media URL. In skip-if-linked mode an existing link means
//! the whole outcome is skipped, which keeps a re-run (after the operator
//! fixes missing entities) from recording duplicate history for pairs a
//! prior run already handled.
//!
//! There is no cross-outcome transaction. Each outcome's link and history
//! writes are independent store calls; a failure is recorded and the run
//! moves on to the next outcome.

use tracing::{info, warn};

use crate::models::ResolutionOutcome;
use crate::store::{EntityKind, SearchTerm, StoreGateway};

/// Commit behavior for already-linked pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Record history even when the link already exists
    Normal,
    /// Skip outcomes whose link already exists (safe re-run mode)
    SkipIfLinked,
}

/// Counters and errors accumulated by one commit pass
#[derive(Debug, Clone, Default)]
pub struct CommitStats {
    pub links_created: usize,
    pub histories_created: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Commit every complete outcome, in input order, on a single task.
///
/// Sequential execution serializes the link existence check against the
/// create that follows it, so two outcomes for the same (show, song) pair
/// cannot race each other within a run.
pub async fn commit<G: StoreGateway>(
    store: &G,
    complete: &[ResolutionOutcome],
    mode: CommitMode,
) -> CommitStats {
    let mut stats = CommitStats::default();

    for outcome in complete {
        let label = outcome.record.label();
        let (Some(show_id), Some(song_id)) =
            (outcome.show_id.as_deref(), outcome.song_id.as_deref())
        else {
            // A complete outcome always carries both ids; guard anyway so a
            // logic error upstream surfaces as a report line, not a panic.
            stats.errors.push(format!("{label}: incomplete outcome passed to commit"));
            continue;
        };

        // Link existence gate
        let link_exists = match link_exists(store, show_id, song_id).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(record = %label, error = %e, "link existence check failed");
                stats.errors.push(format!("{label}: link check failed: {e}"));
                continue;
            }
        };

        if link_exists && mode == CommitMode::SkipIfLinked {
            info!(record = %label, "already linked, skipping");
            stats.skipped += 1;
            continue;
        }

        if !link_exists {
            match store
                .create(
                    EntityKind::RelShowSong,
                    &[("show_id", show_id), ("song_id", song_id)],
                )
                .await
            {
                Ok(_) => {
                    info!(record = %label, "show-song link created");
                    stats.links_created += 1;
                }
                Err(e) => {
                    // No history without a confirmed link
                    warn!(record = %label, error = %e, "link creation failed");
                    stats.errors.push(format!("{label}: link creation failed: {e}"));
                    continue;
                }
            }
        }

        match store
            .create(
                EntityKind::PlayHistory,
                &[
                    ("show_id", show_id),
                    ("song_id", song_id),
                    ("media_url", outcome.record.media_url.as_str()),
                ],
            )
            .await
        {
            Ok(_) => {
                info!(record = %label, "play history created");
                stats.histories_created += 1;
            }
            Err(e) => {
                warn!(record = %label, error = %e, "play history creation failed");
                stats
                    .errors
                    .push(format!("{label}: history creation failed: {e}"));
            }
        }
    }

    stats
}

async fn link_exists<G: StoreGateway>(
    store: &G,
    show_id: &str,
    song_id: &str,
) -> Result<bool, crate::store::StoreError> {
    let term = SearchTerm::new()
        .value("show_id", show_id)
        .value("song_id", song_id);
    let results = store
        .search(EntityKind::RelShowSong, &["show_id", "song_id"], &term)
        .await?;
    Ok(!results.is_empty())
}
