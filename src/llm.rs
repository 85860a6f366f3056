//! Remote-model boundary
//!
//! Abstracts the conversation with the remote LLM behind a trait so the
//! dispatch loop can be driven by a scripted session in tests.

mod error;
pub mod gemini;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use types::{Reply, ToolDefinition};

use async_trait::async_trait;

/// One ongoing conversation with the remote model.
///
/// Each call appends to the conversation history, so call order matters:
/// a user turn, then (if the model requested a tool) exactly one
/// tool-result turn, then the next reply. The session never retries
/// internally; failures surface as [`LlmError`] for the caller to classify.
#[async_trait]
pub trait ChatSession: Send {
    /// Send one user turn and await the model's reply.
    async fn send_user_text(&mut self, text: &str) -> Result<Reply, LlmError>;

    /// Send the outcome of a tool the model asked for, await its follow-up.
    async fn send_tool_result(&mut self, name: &str, result: &str) -> Result<Reply, LlmError>;
}
