//! Node execution layer.
//!
//! Processes a batch of independent input items sequentially, one completion
//! exchange per item, with the host's "continue on fail" policy: in lenient
//! mode a failed item becomes an `{"error": ...}` record and later items
//! still run; in strict mode the first failure aborts the batch. Output
//! order always matches input order.

use crate::catalog::{ModelCatalog, ModelOption};
use crate::completion::CompletionBuilder;
use crate::expression::{ExpressionEvaluator, IdentityEvaluator};
use crate::transport::Transport;
use crate::types::message::Message;
use crate::types::request::PerformanceSettings;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Node resource. Only chat exists today; the tagged enum keeps dispatch
/// honest when more are added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    #[default]
    Chat,
}

/// Operation within a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    #[default]
    MessageModel,
}

/// Optional request tuning fields from the node's "Additional Fields"
/// collection.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdditionalFields {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub stream: Option<bool>,
    pub simplify_output: bool,
}

/// Per-item node parameters, mirroring the workflow form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatParameters {
    #[serde(default)]
    pub resource: Resource,
    #[serde(default)]
    pub operation: Operation,
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(default)]
    pub additional_fields: AdditionalFields,
    #[serde(default)]
    pub performance_settings: PerformanceSettings,
}

impl ChatParameters {
    /// Convenience constructor for the one supported resource/operation.
    pub fn chat(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            resource: Resource::Chat,
            operation: Operation::MessageModel,
            model: model.into(),
            messages,
            additional_fields: AdditionalFields::default(),
            performance_settings: PerformanceSettings::default(),
        }
    }
}

/// The MakeHub chat node: a transport, an expression evaluator, and the
/// batch failure policy. Stateless across invocations.
pub struct ChatNode {
    transport: Arc<dyn Transport>,
    evaluator: Arc<dyn ExpressionEvaluator>,
    continue_on_fail: bool,
}

impl ChatNode {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            evaluator: Arc::new(IdentityEvaluator),
            continue_on_fail: false,
        }
    }

    /// Inject the host's expression evaluator. Default is pass-through.
    pub fn with_evaluator(mut self, evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Lenient batch mode: replace a failed item's output with an error
    /// record and keep going.
    pub fn continue_on_fail(mut self, enable: bool) -> Self {
        self.continue_on_fail = enable;
        self
    }

    /// Load the model options for the node's model picker.
    pub async fn list_models(&self) -> Result<Vec<ModelOption>> {
        ModelCatalog::new(self.transport.as_ref()).list_models().await
    }

    /// Process the batch. One output value per input item, same order.
    pub async fn execute(&self, items: Vec<ChatParameters>) -> Result<Vec<Value>> {
        tracing::info!(items = items.len(), "executing MakeHub chat node");
        let mut outputs = Vec::with_capacity(items.len());

        for (index, item) in items.into_iter().enumerate() {
            match self.run_item(index, item).await {
                Ok(value) => outputs.push(value),
                Err(err) if self.continue_on_fail => {
                    tracing::warn!(item_index = index, error = %err, "item failed, continuing");
                    outputs.push(serde_json::json!({ "error": err.to_string() }));
                }
                Err(err) => {
                    tracing::error!(item_index = index, error = %err, "item failed, aborting batch");
                    return Err(crate::Error::ItemFailed {
                        index,
                        source: Box::new(err),
                    });
                }
            }
        }

        tracing::info!(outputs = outputs.len(), "node execution finished");
        Ok(outputs)
    }

    async fn run_item(&self, index: usize, item: ChatParameters) -> Result<Value> {
        tracing::debug!(item_index = index, model = %item.model, "processing item");

        match (item.resource, item.operation) {
            (Resource::Chat, Operation::MessageModel) => {
                let mut builder = CompletionBuilder::new(self.transport.as_ref(), item.model)
                    .messages(item.messages)
                    .performance(item.performance_settings)
                    .simplify_output(item.additional_fields.simplify_output)
                    .item_index(index);
                if let Some(temperature) = item.additional_fields.temperature {
                    builder = builder.temperature(temperature);
                }
                if let Some(max_tokens) = item.additional_fields.max_tokens {
                    builder = builder.max_tokens(max_tokens);
                }
                if let Some(stream) = item.additional_fields.stream {
                    builder = builder.stream(stream);
                }
                builder.execute(self.evaluator.as_ref()).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_parse_from_form_json() {
        let params: ChatParameters = serde_json::from_value(serde_json::json!({
            "resource": "chat",
            "operation": "messageModel",
            "model": "m1",
            "messages": [{ "role": "user", "content": "hi" }],
            "additionalFields": { "maxTokens": 256, "simplifyOutput": true },
            "performanceSettings": {
                "minThroughput": { "mode": "custom", "value": 75 }
            }
        }))
        .unwrap();
        assert_eq!(params.model, "m1");
        assert_eq!(params.additional_fields.max_tokens, Some(256));
        assert!(params.additional_fields.simplify_output);
        assert_eq!(
            params
                .performance_settings
                .min_throughput
                .resolve()
                .as_deref(),
            Some("75")
        );
    }

    #[test]
    fn test_parameters_default_resource_and_operation() {
        let params: ChatParameters = serde_json::from_value(serde_json::json!({
            "model": "m1",
            "messages": []
        }))
        .unwrap();
        assert_eq!(params.resource, Resource::Chat);
        assert_eq!(params.operation, Operation::MessageModel);
    }
}
