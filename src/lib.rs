//! # makehub-node
//!
//! Execution core for a MakeHub AI workflow node. It covers the two things a
//! workflow host needs from the MakeHub chat-completions API:
//!
//! - **Model catalog**: [`ModelCatalog`] fetches `/v1/models` and normalizes
//!   the heterogeneous list shapes the API has been observed to return into a
//!   deduplicated, deterministically ordered option list.
//! - **Chat completions**: [`CompletionBuilder`] resolves dynamic expressions
//!   in message content, assembles the request body (including the optional
//!   `extra_query` performance hints), and posts it to `/v1/chat/completions`.
//!
//! The node-facing layer is [`ChatNode`], which processes a batch of
//! independent input items sequentially and supports the host's
//! "continue on fail" policy.
//!
//! Collaborators are injected at trait seams: [`Transport`] for HTTP and
//! [`ExpressionEvaluator`] for resolving dynamic placeholders against the
//! workflow runtime. The crate owns no retry, caching, or rate limiting;
//! those belong to the host platform.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use makehub_node::{ChatNode, ChatParameters, Credentials, HttpTransport, Message};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> makehub_node::Result<()> {
//!     let credentials = Credentials::new("your-api-key");
//!     let transport = Arc::new(HttpTransport::new(&credentials)?);
//!     let node = ChatNode::new(transport);
//!
//!     let item = ChatParameters::chat(
//!         "meta/llama-3.1-8b-instruct",
//!         vec![Message::user("Hello, how are you?")],
//!     );
//!     let outputs = node.execute(vec![item]).await?;
//!     println!("{}", outputs[0]);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod completion;
pub mod credentials;
pub mod error;
pub mod expression;
pub mod node;
pub mod transport;
pub mod types;

pub use catalog::{ModelCatalog, ModelOption};
pub use completion::CompletionBuilder;
pub use credentials::Credentials;
pub use error::{BoxError, Error, Result};
pub use expression::{ExpressionEvaluator, IdentityEvaluator};
pub use node::{AdditionalFields, ChatNode, ChatParameters, Operation, Resource};
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::message::{Message, MessageRole};
pub use types::request::{
    CompletionRequest, ExtraQuery, PerformanceMode, PerformanceSettings, PerformanceTarget,
};
