//! Store boundary: typed search/create interface to the quizdb store
//!
//! Everything the pipeline knows about persistence goes through the
//! `StoreGateway` trait, so the resolver and commit engine can be exercised
//! against an in-memory fake in tests. The real implementation
//! (`CommandGateway`) shells out to the store's CLI.

pub mod command;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use command::CommandGateway;

/// Single failure signal from the store boundary.
///
/// A non-zero exit status and unparsable output collapse into this one error:
/// neither is retryable within a pipeline pass, so callers have no reason to
/// tell them apart. The message is kept for the operator's error list.
#[derive(Debug, Error)]
#[error("store command failed: {0}")]
pub struct StoreError(pub String);

/// Entity kinds the store manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Artist,
    Show,
    Song,
    RelShowSong,
    PlayHistory,
}

impl EntityKind {
    /// Wire name used by the store CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Show => "show",
            EntityKind::Song => "song",
            EntityKind::RelShowSong => "rel_show_song",
            EntityKind::PlayHistory => "play_history",
        }
    }
}

/// Comparison mode for one search-term field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Exact string match (wire: `"match": "exact"`)
    Exact,
    /// Case-insensitive exact match (wire: `"match": "exact-i"`)
    ExactCaseInsensitive,
    /// Plain value equality, no `match` key; used for id foreign-key filters
    Value,
}

/// One field predicate within a search term
#[derive(Debug, Clone)]
pub struct TermField {
    pub value: String,
    pub mode: MatchMode,
}

/// Typed search predicate over named fields
///
/// Field order is preserved so serialized terms are deterministic.
#[derive(Debug, Clone, Default)]
pub struct SearchTerm {
    fields: Vec<(String, TermField)>,
}

impl SearchTerm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: &str, mode: MatchMode) -> Self {
        self.fields.push((
            name.to_string(),
            TermField {
                value: value.to_string(),
                mode,
            },
        ));
        self
    }

    pub fn exact(self, name: &str, value: &str) -> Self {
        self.field(name, value, MatchMode::Exact)
    }

    pub fn exact_ci(self, name: &str, value: &str) -> Self {
        self.field(name, value, MatchMode::ExactCaseInsensitive)
    }

    pub fn value(self, name: &str, value: &str) -> Self {
        self.field(name, value, MatchMode::Value)
    }

    pub fn fields(&self) -> &[(String, TermField)] {
        &self.fields
    }
}

/// Synchronous request/response interface to the store
///
/// Both operations either return the store's structured payload or the single
/// `StoreError` failure signal. Implementations own any value encoding their
/// transport needs; callers always pass plain strings.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Search `kind` for records matching `term`, projecting `fields`.
    /// Result order is store-defined; callers take the first match.
    async fn search(
        &self,
        kind: EntityKind,
        fields: &[&str],
        term: &SearchTerm,
    ) -> Result<Vec<Map<String, Value>>, StoreError>;

    /// Create a `kind` record with the given attributes, returning the
    /// store's payload for the created record.
    async fn create(
        &self,
        kind: EntityKind,
        attrs: &[(&str, &str)],
    ) -> Result<Value, StoreError>;
}

/// Pull the `id` field out of a store record, if present
pub fn record_id(record: &Map<String, Value>) -> Option<String> {
    record.get("id").and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_wire_names() {
        assert_eq!(EntityKind::Artist.as_str(), "artist");
        assert_eq!(EntityKind::RelShowSong.as_str(), "rel_show_song");
        assert_eq!(EntityKind::PlayHistory.as_str(), "play_history");
    }

    #[test]
    fn test_search_term_preserves_field_order() {
        let term = SearchTerm::new()
            .exact_ci("name", "Your Name.")
            .value("vintage", "Summer 2016");

        let names: Vec<_> = term.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["name", "vintage"]);
        assert_eq!(term.fields()[0].1.mode, MatchMode::ExactCaseInsensitive);
        assert_eq!(term.fields()[1].1.mode, MatchMode::Value);
    }
}
