//! Common types for the remote-model exchange

use serde_json::Value;

/// What the model came back with for one turn.
///
/// `Empty` (no usable candidate) is deliberately distinct from
/// `DirectText(String::new())` and from a communication failure: the
/// dispatch loop's fallback policy differs for each.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The model answered with plain text
    DirectText(String),
    /// The model wants a local tool invoked on its behalf
    ToolCall { name: String, args: Value },
    /// The model returned no usable candidate
    Empty,
}

/// Declaration of a local tool, advertised to the model
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema for the tool's named arguments
    pub parameters: Value,
}
