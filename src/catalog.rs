//! Model Catalog Resolver.
//!
//! `GET /v1/models` has returned several payload layouts over time; this
//! module accepts all of them and normalizes the result into a stable option
//! list for the host's model picker.

use crate::transport::{Method, Transport};
use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashSet;

/// One selectable model, as presented to the workflow editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOption {
    /// Display name.
    pub name: String,
    /// Identifier sent as `model` in completion requests.
    pub value: String,
    pub description: Option<String>,
}

/// Stateless resolver over an injected transport.
pub struct ModelCatalog<'a> {
    transport: &'a dyn Transport,
}

impl<'a> ModelCatalog<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Fetch and normalize the model list.
    ///
    /// Accepted payload shapes, in order: a bare array; an object with a
    /// `data` array; an object with a `models` array; otherwise the first
    /// array-valued top-level property in the payload's own key order (the
    /// scan order is the tie-break contract, kept deterministic by parsing
    /// with key order preserved).
    ///
    /// Entries are identified by `model_id`, falling back to `id`, then
    /// `name`; entries with none of those are discarded. Duplicated
    /// identifiers keep their first occurrence. The result is sorted by
    /// display name. An empty result is an error, not a sentinel entry.
    pub async fn list_models(&self) -> Result<Vec<ModelOption>> {
        let payload = self
            .transport
            .request(Method::GET, "/models", None)
            .await
            .map_err(|err| match err {
                Error::Transport(source) => Error::ModelListFetchFailed {
                    reason: source.to_string(),
                    source: Some(source),
                },
                other => other,
            })?;

        let entries = extract_model_list(&payload).ok_or_else(|| Error::ModelListFetchFailed {
            reason: "response contains no model array".to_string(),
            source: None,
        })?;

        let mut seen = HashSet::new();
        let mut options = Vec::new();
        for entry in entries {
            let Some(id) = model_identifier(entry) else {
                tracing::debug!("skipping model entry without identifier");
                continue;
            };
            if !seen.insert(id.to_string()) {
                continue;
            }
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(id);
            let description = entry
                .get("description")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            options.push(ModelOption {
                name: name.to_string(),
                value: id.to_string(),
                description,
            });
        }

        if options.is_empty() {
            tracing::warn!("model list response yielded no usable entries");
            return Err(Error::NoModelsFound);
        }

        options.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(count = options.len(), "loaded model options");
        Ok(options)
    }
}

/// Locate the array of model entries within an unspecified payload shape.
fn extract_model_list(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(entries) => Some(entries),
        Value::Object(map) => {
            for key in ["data", "models"] {
                if let Some(Value::Array(entries)) = map.get(key) {
                    return Some(entries);
                }
            }
            // Fallback: first array-valued property wins, in key order.
            map.values().find_map(Value::as_array)
        }
        _ => None,
    }
}

/// Identifier priority: `model_id`, then `id`, then `name`.
fn model_identifier(entry: &Value) -> Option<&str> {
    ["model_id", "id", "name"]
        .into_iter()
        .find_map(|key| entry.get(key).and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_bare_array() {
        let payload = json!([{ "model_id": "a" }]);
        assert_eq!(extract_model_list(&payload).unwrap().len(), 1);
    }

    #[test]
    fn test_prefers_data_over_other_arrays() {
        let payload = json!({
            "extras": [{ "model_id": "wrong" }],
            "data": [{ "model_id": "right" }]
        });
        let entries = extract_model_list(&payload).unwrap();
        assert_eq!(entries[0]["model_id"], "right");
    }

    #[test]
    fn test_falls_back_to_models_key() {
        let payload = json!({ "models": [{ "id": "m" }] });
        assert_eq!(extract_model_list(&payload).unwrap().len(), 1);
    }

    #[test]
    fn test_scan_takes_first_array_valued_property() {
        // Neither "data" nor "models": the first array in key order wins.
        let payload = json!({
            "object": "list",
            "available": [{ "id": "first" }],
            "deprecated": [{ "id": "second" }]
        });
        let entries = extract_model_list(&payload).unwrap();
        assert_eq!(entries[0]["id"], "first");
    }

    #[test]
    fn test_scalar_payload_has_no_list() {
        assert!(extract_model_list(&json!("nope")).is_none());
        assert!(extract_model_list(&json!({ "object": "list" })).is_none());
    }

    #[test]
    fn test_identifier_priority() {
        let entry = json!({ "model_id": "m", "id": "i", "name": "n" });
        assert_eq!(model_identifier(&entry), Some("m"));
        let entry = json!({ "id": "i", "name": "n" });
        assert_eq!(model_identifier(&entry), Some("i"));
        let entry = json!({ "name": "n" });
        assert_eq!(model_identifier(&entry), Some("n"));
        assert_eq!(model_identifier(&json!({ "other": 1 })), None);
    }
}
