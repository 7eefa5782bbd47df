//! Wire types shared across the node core.

pub mod message;
pub mod request;

pub use message::{Message, MessageRole};
pub use request::{
    CompletionRequest, ExtraQuery, PerformanceMode, PerformanceSettings, PerformanceTarget,
};
