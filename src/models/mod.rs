//! Data models for the import pipeline

pub mod export;
pub mod resolution;

pub use export::{PlayRecord, QuizExport};
pub use resolution::{MissingReport, ResolutionOutcome, RunSummary};
