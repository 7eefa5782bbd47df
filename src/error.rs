use crate::transport::TransportError;
use thiserror::Error;

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error for collaborator failures (expression evaluator, etc.).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for the node core.
///
/// Every variant is terminal for the single item being processed. The node
/// layer decides per-item continuation vs abort; nothing here retries or
/// swallows an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The credential collaborator supplied no usable API key. Raised before
    /// any network call is attempted.
    #[error("no valid MakeHub API key provided")]
    MissingCredential,

    /// The `/models` request failed, or its payload contained nothing that
    /// looks like a model array.
    #[error("failed to load models: {reason}")]
    ModelListFetchFailed {
        reason: String,
        #[source]
        source: Option<TransportError>,
    },

    /// The `/models` payload was well formed but yielded no usable entries
    /// after identifier filtering.
    #[error("no models found in MakeHub API response")]
    NoModelsFound,

    /// The expression evaluator rejected a message's dynamic content. Carries
    /// the message index and the original content for diagnostics.
    #[error("failed to evaluate expression in message #{index} ({content:?}): {source}")]
    ExpressionEvaluationFailed {
        index: usize,
        content: String,
        #[source]
        source: BoxError,
    },

    /// The completion response did not carry `choices[0].message.content`
    /// where the caller asked for simplified output.
    #[error("invalid response format from MakeHub API: {0}")]
    InvalidResponseShape(String),

    /// Strict-mode batch abort: carries the position of the item that
    /// failed so callers can tell which input was at fault.
    #[error("item #{index} failed: {source}")]
    ItemFailed {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
