//! Chat-completions request body and the performance-hint translation.
//!
//! The JSON shapes here are a bit-exact contract with the upstream API:
//! absent optionals are omitted from the payload, never sent as null.

use crate::types::message::Message;
use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_query: Option<ExtraQuery>,
}

/// Routing hints for the serving backend. String-valued on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_throughput: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_latency: Option<String>,
}

impl ExtraQuery {
    pub fn is_empty(&self) -> bool {
        self.min_throughput.is_none() && self.max_latency.is_none()
    }
}

/// Three-way performance trade-off selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceMode {
    /// Default: no hint emitted, backend picks the cheapest route.
    #[default]
    BestPrice,
    /// Emit the user-supplied numeric value, coerced to a string.
    Custom,
    /// Emit the literal string `"best"`.
    Best,
}

/// One performance dial (min throughput or max latency): a mode plus the
/// custom numeric value used when the mode is `custom`.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceTarget {
    pub mode: PerformanceMode,
    pub value: Option<f64>,
}

impl PerformanceTarget {
    pub fn custom(value: f64) -> Self {
        Self {
            mode: PerformanceMode::Custom,
            value: Some(value),
        }
    }

    pub fn best() -> Self {
        Self {
            mode: PerformanceMode::Best,
            value: None,
        }
    }

    /// Resolve to the wire value: `None` for bestPrice (field omitted), the
    /// number as a string for custom, `"best"` otherwise. A custom mode with
    /// no value behaves like bestPrice.
    pub fn resolve(&self) -> Option<String> {
        match self.mode {
            PerformanceMode::BestPrice => None,
            PerformanceMode::Custom => self.value.map(|v| v.to_string()),
            PerformanceMode::Best => Some("best".to_string()),
        }
    }
}

/// Both performance dials as they appear in the node's parameter form.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceSettings {
    pub min_throughput: PerformanceTarget,
    pub max_latency: PerformanceTarget,
}

impl PerformanceSettings {
    /// Translate into the request's `extra_query` object. Present iff at
    /// least one dial resolved to a value.
    pub fn to_extra_query(&self) -> Option<ExtraQuery> {
        let extra = ExtraQuery {
            min_throughput: self.min_throughput.resolve(),
            max_latency: self.max_latency.resolve(),
        };
        if extra.is_empty() {
            None
        } else {
            Some(extra)
        }
    }
}
