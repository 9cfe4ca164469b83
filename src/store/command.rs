//! CLI transport for the quizdb store
//!
//! Runs the store binary as a subprocess per operation:
//!
//! ```text
//! quizdb search <kind> --fields id,name --term <json>
//! quizdb create <kind> --data <json>
//! ```
//!
//! String values are percent-encoded here, at the transport boundary, before
//! being embedded in term or data payloads; callers never encode. Search
//! responses are `{"results": [...]}`; create responses are the created
//! record itself.

use std::process::Command;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{EntityKind, MatchMode, SearchTerm, StoreError, StoreGateway};

/// Gateway to a quizdb store reached through its CLI binary
pub struct CommandGateway {
    bin: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Map<String, Value>>,
}

impl CommandGateway {
    /// Create a gateway for the given store binary (name or path)
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// Serialize a typed search term to the store's JSON term format
    fn term_json(term: &SearchTerm) -> String {
        let mut obj = Map::new();
        for (name, field) in term.fields() {
            let mut predicate = Map::new();
            predicate.insert(
                "value".to_string(),
                Value::String(encode(&field.value)),
            );
            match field.mode {
                MatchMode::Exact => {
                    predicate.insert("match".to_string(), Value::String("exact".to_string()));
                }
                MatchMode::ExactCaseInsensitive => {
                    predicate.insert("match".to_string(), Value::String("exact-i".to_string()));
                }
                MatchMode::Value => {}
            }
            obj.insert(name.clone(), Value::Object(predicate));
        }
        Value::Object(obj).to_string()
    }

    /// Serialize create attributes to the store's JSON data format
    fn data_json(attrs: &[(&str, &str)]) -> String {
        let mut obj = Map::new();
        for (name, value) in attrs {
            obj.insert(name.to_string(), Value::String(encode(value)));
        }
        Value::Object(obj).to_string()
    }

    /// Run the store binary and return its stdout.
    ///
    /// Spawn failure, non-zero exit, and non-UTF-8 output all collapse into
    /// the single `StoreError` signal.
    async fn run(&self, args: Vec<String>) -> Result<String, StoreError> {
        debug!(bin = %self.bin, ?args, "running store command");

        let bin = self.bin.clone();
        let output = tokio::task::spawn_blocking(move || Command::new(&bin).args(&args).output())
            .await
            .map_err(|e| StoreError(format!("task join error: {e}")))?
            .map_err(|e| StoreError(format!("failed to run store binary: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoreError(format!(
                "exit code {:?}: {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| StoreError(format!("invalid output: {e}")))
    }
}

#[async_trait::async_trait]
impl StoreGateway for CommandGateway {
    async fn search(
        &self,
        kind: EntityKind,
        fields: &[&str],
        term: &SearchTerm,
    ) -> Result<Vec<Map<String, Value>>, StoreError> {
        let args = vec![
            "search".to_string(),
            kind.as_str().to_string(),
            "--fields".to_string(),
            fields.join(","),
            "--term".to_string(),
            Self::term_json(term),
        ];

        let stdout = self.run(args).await?;
        let response: SearchResponse = serde_json::from_str(&stdout)
            .map_err(|e| StoreError(format!("unparsable search response: {e}")))?;
        Ok(response.results)
    }

    async fn create(
        &self,
        kind: EntityKind,
        attrs: &[(&str, &str)],
    ) -> Result<Value, StoreError> {
        let args = vec![
            "create".to_string(),
            kind.as_str().to_string(),
            "--data".to_string(),
            Self::data_json(attrs),
        ];

        let stdout = self.run(args).await?;
        serde_json::from_str(&stdout)
            .map_err(|e| StoreError(format!("unparsable create response: {e}")))
    }
}

/// Percent-encode a value for transmission, reserving nothing
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
