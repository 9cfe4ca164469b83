//! End-of-run report rendering
//!
//! Pure formatting over the run summary and missing-entity report. The count
//! lines are the operator's (and the tests') anchors; keep their wording
//! stable.

use std::fmt::Write;

use crate::models::{MissingReport, RunSummary};

/// Render the end-of-run report as printable text
pub fn render(summary: &RunSummary, missing: &MissingReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Import Summary ===");
    let _ = writeln!(out, "Total records: {}", summary.total);
    let _ = writeln!(out, "Complete: {}", summary.complete);
    let _ = writeln!(out, "Missing:  {}", summary.incomplete);
    let _ = writeln!(out, "Show-song links created: {}", summary.links_created);
    let _ = writeln!(out, "Play histories created: {}", summary.histories_created);
    let _ = writeln!(out, "Songs created: {}", summary.songs_created);
    let _ = writeln!(out, "Skipped (already linked): {}", summary.skipped);
    let _ = writeln!(out, "Errors: {}", summary.errors.len());

    if !missing.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Missing Entities ===");
        for (heading, set) in [
            ("Artists", &missing.artists),
            ("Shows", &missing.shows),
            ("Songs", &missing.songs),
        ] {
            if set.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{} ({}):", heading, set.len());
            for descriptor in set {
                let _ = writeln!(out, "  - {descriptor}");
            }
        }
        let _ = writeln!(out, "Per record:");
        for (label, descriptors) in &missing.by_record {
            let _ = writeln!(out, "  {label}");
            for descriptor in descriptors {
                let _ = writeln!(out, "    - {descriptor}");
            }
        }
    }

    if !summary.errors.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Errors ===");
        for error in &summary.errors {
            let _ = writeln!(out, "  - {error}");
        }
    }

    out
}
