//! Completion Request Builder.
//!
//! Assembles the chat-completions body from node parameters, resolves
//! dynamic message content through the injected evaluator, and issues the
//! single upstream POST. Optionally simplifies the response down to the
//! generated text.

use crate::expression::{resolve_messages, ExpressionEvaluator};
use crate::transport::{Method, Transport};
use crate::types::message::Message;
use crate::types::request::{CompletionRequest, PerformanceSettings};
use crate::{Error, Result};
use serde_json::Value;

/// Builder for one chat-completion exchange.
pub struct CompletionBuilder<'a> {
    transport: &'a dyn Transport,
    model: String,
    messages: Vec<Message>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    stream: Option<bool>,
    simplify_output: bool,
    performance: PerformanceSettings,
    item_index: usize,
}

impl<'a> CompletionBuilder<'a> {
    pub fn new(transport: &'a dyn Transport, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            stream: None,
            simplify_output: false,
            performance: PerformanceSettings::default(),
            item_index: 0,
        }
    }

    /// Set the ordered message history.
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Pass the stream flag through to the API. The core does no stream
    /// decoding; the flag is forwarded verbatim.
    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Return only `{"content": ...}` instead of the raw response body.
    pub fn simplify_output(mut self, simplify: bool) -> Self {
        self.simplify_output = simplify;
        self
    }

    /// Set the performance dials translated into `extra_query`.
    pub fn performance(mut self, settings: PerformanceSettings) -> Self {
        self.performance = settings;
        self
    }

    /// Positional context handed to the expression evaluator.
    pub fn item_index(mut self, index: usize) -> Self {
        self.item_index = index;
        self
    }

    /// Resolve expressions, send the request, and post-process the response.
    pub async fn execute(self, evaluator: &dyn ExpressionEvaluator) -> Result<Value> {
        let messages = resolve_messages(evaluator, self.messages, self.item_index).await?;

        let request = CompletionRequest {
            model: self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: self.stream,
            extra_query: self.performance.to_extra_query(),
        };

        tracing::debug!(
            model = %request.model,
            message_count = request.messages.len(),
            has_extra_query = request.extra_query.is_some(),
            "sending chat completion request"
        );

        let body = serde_json::to_value(&request)?;
        let response = self
            .transport
            .request(Method::POST, "/chat/completions", Some(&body))
            .await?;

        if self.simplify_output {
            simplify_response(&response)
        } else {
            Ok(response)
        }
    }
}

/// Extract `choices[0].message.content` as the sole output field.
fn simplify_response(response: &Value) -> Result<Value> {
    let content = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::InvalidResponseShape("missing choices[0].message.content".to_string())
        })?;
    Ok(serde_json::json!({ "content": content }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simplify_extracts_content() {
        let response = json!({
            "id": "cmpl-1",
            "choices": [{ "message": { "role": "assistant", "content": "4" } }]
        });
        assert_eq!(simplify_response(&response).unwrap(), json!({ "content": "4" }));
    }

    #[test]
    fn test_simplify_rejects_missing_choices() {
        let err = simplify_response(&json!({ "id": "cmpl-1" })).unwrap_err();
        assert!(matches!(err, Error::InvalidResponseShape(_)));
    }

    #[test]
    fn test_simplify_rejects_non_string_content() {
        let response = json!({ "choices": [{ "message": { "content": 42 } }] });
        assert!(matches!(
            simplify_response(&response),
            Err(Error::InvalidResponseShape(_))
        ));
    }
}
