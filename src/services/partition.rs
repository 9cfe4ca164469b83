//! Partitioning of resolution outcomes
//!
//! Pure function over resolver results: splits outcomes into complete and
//! incomplete sets (preserving input order within each) and aggregates the
//! incomplete ones into the deduplicated missing-entity report.

use crate::models::{MissingReport, ResolutionOutcome};

/// Outcomes split by completeness, plus the aggregated missing report
#[derive(Debug, Default)]
pub struct Partitioned {
    pub complete: Vec<ResolutionOutcome>,
    pub incomplete: Vec<ResolutionOutcome>,
    pub missing: MissingReport,
}

/// Classify each outcome and build the missing-entity report.
///
/// Descriptors are routed by their leading tag into the report's category
/// sets; `BTreeSet` gives deduplication and lexical order for free.
pub fn partition(outcomes: Vec<ResolutionOutcome>) -> Partitioned {
    let mut result = Partitioned::default();

    for outcome in outcomes {
        if outcome.is_complete() {
            result.complete.push(outcome);
            continue;
        }

        for descriptor in &outcome.missing {
            if descriptor.starts_with("artist:") {
                result.missing.artists.insert(descriptor.clone());
            } else if descriptor.starts_with("show:") {
                result.missing.shows.insert(descriptor.clone());
            } else if descriptor.starts_with("song:") {
                result.missing.songs.insert(descriptor.clone());
            }
        }
        result
            .missing
            .by_record
            .push((outcome.record.label(), outcome.missing.clone()));
        result.incomplete.push(outcome);
    }

    result
}
