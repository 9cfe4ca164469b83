//! Resolution outcomes and run aggregates
//!
//! `ResolutionOutcome` is built once per record by the resolver and is not
//! modified afterwards. `MissingReport` and `RunSummary` are rebuilt per run
//! and never persisted; all durable state lives in the store.

use std::collections::BTreeSet;

use crate::models::export::PlayRecord;

/// Result of resolving one play record against the store
#[derive(Debug, Clone)]
pub struct ResolutionOutcome {
    /// The input record this outcome was resolved from
    pub record: PlayRecord,

    /// Resolved artist id, if the artist was found
    pub artist_id: Option<String>,
    /// Resolved show id, if the show (name + vintage) was found
    pub show_id: Option<String>,
    /// Resolved song id. Only ever present when `artist_id` is present:
    /// song lookup and song creation are both keyed by artist.
    pub song_id: Option<String>,

    /// Whether the song id came from an opt-in create rather than a lookup
    pub created_song: bool,

    /// Human-readable descriptors for every entity that failed to resolve,
    /// in resolution order. Empty iff all three ids are present.
    pub missing: Vec<String>,
}

impl ResolutionOutcome {
    pub fn new(record: PlayRecord) -> Self {
        Self {
            record,
            artist_id: None,
            show_id: None,
            song_id: None,
            created_song: false,
            missing: Vec::new(),
        }
    }

    /// A record is complete exactly when nothing was reported missing
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Aggregated missing-entity report across all incomplete outcomes
///
/// The three category sets are deduplicated and lexically sorted (`BTreeSet`)
/// so the report is deterministic regardless of input order.
#[derive(Debug, Clone, Default)]
pub struct MissingReport {
    pub artists: BTreeSet<String>,
    pub shows: BTreeSet<String>,
    pub songs: BTreeSet<String>,

    /// Per-record breakdown: record label paired with its descriptors
    pub by_record: Vec<(String, Vec<String>)>,
}

impl MissingReport {
    pub fn is_empty(&self) -> bool {
        self.by_record.is_empty()
    }
}

/// Counters and error descriptors for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub total: usize,
    pub complete: usize,
    pub incomplete: usize,
    pub links_created: usize,
    pub histories_created: usize,
    pub songs_created: usize,
    pub skipped: usize,
    /// Commit-phase error descriptors; never fatal to the run
    pub errors: Vec<String>,
}
