//! Test helpers for quizdb-import integration tests
//!
//! `MemoryStore` is an in-memory `StoreGateway` fake: seeded tables, the same
//! exact / exact-i / value-equality match semantics as the real store, and
//! per-kind failure injection for exercising error paths without a store
//! process.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use quizdb_import::store::{EntityKind, MatchMode, SearchTerm, StoreError, StoreGateway};

/// In-memory store fake
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Map<String, Value>>>>,
    next_id: Mutex<u64>,
    fail_searches: Mutex<HashSet<String>>,
    fail_creates: Mutex<HashSet<String>>,
    search_counts: Mutex<HashMap<String, usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly (test seeding), returning its generated id
    pub fn seed(&self, kind: EntityKind, attrs: &[(&str, &str)]) -> String {
        let id = self.generate_id();
        let mut row = Map::new();
        row.insert("id".to_string(), Value::String(id.clone()));
        for (name, value) in attrs {
            row.insert(name.to_string(), Value::String(value.to_string()));
        }
        self.tables
            .lock()
            .unwrap()
            .entry(kind.as_str().to_string())
            .or_default()
            .push(row);
        id
    }

    /// Number of records in a table
    pub fn count(&self, kind: EntityKind) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(kind.as_str())
            .map_or(0, Vec::len)
    }

    /// Number of search calls made against a table
    pub fn search_count(&self, kind: EntityKind) -> usize {
        self.search_counts
            .lock()
            .unwrap()
            .get(kind.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Make every search against `kind` fail
    pub fn fail_searches_for(&self, kind: EntityKind) {
        self.fail_searches
            .lock()
            .unwrap()
            .insert(kind.as_str().to_string());
    }

    /// Make every create against `kind` fail
    pub fn fail_creates_for(&self, kind: EntityKind) {
        self.fail_creates
            .lock()
            .unwrap()
            .insert(kind.as_str().to_string());
    }

    fn generate_id(&self) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("id-{:04}", *next)
    }
}

fn field_matches(row: &Map<String, Value>, name: &str, value: &str, mode: MatchMode) -> bool {
    let Some(actual) = row.get(name).and_then(Value::as_str) else {
        return false;
    };
    match mode {
        MatchMode::Exact | MatchMode::Value => actual == value,
        MatchMode::ExactCaseInsensitive => actual.eq_ignore_ascii_case(value),
    }
}

#[async_trait]
impl StoreGateway for MemoryStore {
    async fn search(
        &self,
        kind: EntityKind,
        fields: &[&str],
        term: &SearchTerm,
    ) -> Result<Vec<Map<String, Value>>, StoreError> {
        *self
            .search_counts
            .lock()
            .unwrap()
            .entry(kind.as_str().to_string())
            .or_insert(0) += 1;

        if self.fail_searches.lock().unwrap().contains(kind.as_str()) {
            return Err(StoreError("injected search failure".to_string()));
        }

        let tables = self.tables.lock().unwrap();
        let rows = tables.get(kind.as_str()).cloned().unwrap_or_default();

        // Insertion order preserved: "first result" is the oldest match
        let matches = rows
            .into_iter()
            .filter(|row| {
                term.fields()
                    .iter()
                    .all(|(name, field)| field_matches(row, name, &field.value, field.mode))
            })
            .map(|row| {
                let mut projected = Map::new();
                for field in fields {
                    if let Some(value) = row.get(*field) {
                        projected.insert(field.to_string(), value.clone());
                    }
                }
                projected
            })
            .collect();
        Ok(matches)
    }

    async fn create(
        &self,
        kind: EntityKind,
        attrs: &[(&str, &str)],
    ) -> Result<Value, StoreError> {
        if self.fail_creates.lock().unwrap().contains(kind.as_str()) {
            return Err(StoreError("injected create failure".to_string()));
        }
        let id = self.seed(kind, attrs);
        let mut created = Map::new();
        created.insert("id".to_string(), Value::String(id));
        for (name, value) in attrs {
            created.insert(name.to_string(), Value::String(value.to_string()));
        }
        Ok(Value::Object(created))
    }
}
