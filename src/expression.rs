//! Expression evaluator capability.
//!
//! Message content entered in the workflow editor may carry dynamic
//! placeholders (`{{ ... }}` or `$`-prefixed references) that only the host
//! runtime can resolve. The core detects the marker and delegates; it never
//! interprets expressions itself.

use crate::error::BoxError;
use crate::types::message::Message;
use crate::{Error, Result};
use async_trait::async_trait;

/// Resolves a dynamic expression against the workflow runtime context of the
/// item at `item_index`.
#[async_trait]
pub trait ExpressionEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        expression: &str,
        item_index: usize,
    ) -> std::result::Result<String, BoxError>;
}

/// Pass-through evaluator for hosts without dynamic content support.
pub struct IdentityEvaluator;

#[async_trait]
impl ExpressionEvaluator for IdentityEvaluator {
    async fn evaluate(
        &self,
        expression: &str,
        _item_index: usize,
    ) -> std::result::Result<String, BoxError> {
        Ok(expression.to_string())
    }
}

/// Resolve every message's content, in order. Messages without an expression
/// marker pass through untouched; evaluation is independent per message but
/// the output sequence preserves the input order.
pub async fn resolve_messages(
    evaluator: &dyn ExpressionEvaluator,
    messages: Vec<Message>,
    item_index: usize,
) -> Result<Vec<Message>> {
    let mut resolved = Vec::with_capacity(messages.len());
    for (index, message) in messages.into_iter().enumerate() {
        if !message.contains_expression() {
            resolved.push(message);
            continue;
        }

        tracing::debug!(item_index, message_index = index, "evaluating message expression");
        let content = evaluator
            .evaluate(&message.content, item_index)
            .await
            .map_err(|source| Error::ExpressionEvaluationFailed {
                index,
                content: message.content.clone(),
                source,
            })?;
        resolved.push(Message {
            role: message.role,
            content,
        });
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::message::MessageRole;

    struct UpperEvaluator;

    #[async_trait]
    impl ExpressionEvaluator for UpperEvaluator {
        async fn evaluate(
            &self,
            expression: &str,
            _item_index: usize,
        ) -> std::result::Result<String, BoxError> {
            Ok(expression.to_uppercase())
        }
    }

    struct FailingEvaluator;

    #[async_trait]
    impl ExpressionEvaluator for FailingEvaluator {
        async fn evaluate(
            &self,
            _expression: &str,
            _item_index: usize,
        ) -> std::result::Result<String, BoxError> {
            Err("unknown variable".into())
        }
    }

    #[tokio::test]
    async fn test_plain_content_bypasses_evaluator() {
        let messages = vec![Message::user("no placeholders here")];
        let resolved = resolve_messages(&FailingEvaluator, messages, 0).await.unwrap();
        assert_eq!(resolved[0].content, "no placeholders here");
    }

    #[tokio::test]
    async fn test_marked_content_is_evaluated_in_order() {
        let messages = vec![
            Message::system("static"),
            Message::user("{{ greeting }}"),
            Message::user("also static"),
        ];
        let resolved = resolve_messages(&UpperEvaluator, messages, 3).await.unwrap();
        let contents: Vec<_> = resolved.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["static", "{{ GREETING }}", "also static"]);
        assert_eq!(resolved[1].role, MessageRole::User);
    }

    #[tokio::test]
    async fn test_failure_carries_index_and_content() {
        let messages = vec![Message::system("static"), Message::user("{{ bad }}")];
        let err = resolve_messages(&FailingEvaluator, messages, 0)
            .await
            .unwrap_err();
        match err {
            Error::ExpressionEvaluationFailed { index, content, .. } => {
                assert_eq!(index, 1);
                assert_eq!(content, "{{ bad }}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
