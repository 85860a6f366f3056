//! Local tool implementations
//!
//! Tools are the named operations the remote model may ask to have invoked
//! on its behalf. Every tool returns a short natural-language string (never
//! structured data) because the result is spoken back to the user and fed
//! back to the model as the tool outcome. Missing or placeholder arguments
//! produce a clarifying question rather than an error.

mod clock;
mod comms;
mod media;
mod recall;
mod todo;

pub use clock::CurrentTimeTool;
pub use comms::{CallPersonTool, SendMessageTool, SetReminderTool};
pub use media::{NextSongTool, PlayMusicTool, StopMusicTool};
pub use recall::{RecentEventsTool, SearchEventsTool};
pub use todo::{AddTodoTool, ReadTodoListTool, RemoveTodoTool};

use crate::llm::ToolDefinition;
use crate::memory::EventLog;
use crate::store::TodoStore;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Shared handles a tool may need during one invocation.
///
/// Tools themselves are stateless singletons; all storage access goes
/// through this context.
#[derive(Clone)]
pub struct ToolContext {
    pub todo: Arc<TodoStore>,
    pub events: Arc<EventLog>,
}

impl ToolContext {
    pub fn new(todo: Arc<TodoStore>, events: Arc<EventLog>) -> Self {
        Self { todo, events }
    }
}

/// A named, locally-executable operation the model can request
#[async_trait]
pub trait Tool: Send + Sync {
    /// Exact-match, case-sensitive tool name
    fn name(&self) -> &'static str;

    /// Tool description advertised to the model
    fn description(&self) -> String;

    /// JSON schema for the tool's named arguments
    fn parameters(&self) -> Value;

    /// Execute with model-supplied arguments, returning a speakable string
    async fn run(&self, args: &Value, ctx: &ToolContext) -> String;
}

/// Capability registry mapping names to tools, built once at startup
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// The full TARA catalog, hand-registered so the declarations sent to
    /// the model and the dispatchable set can never drift apart.
    pub fn standard() -> Self {
        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(AddTodoTool),
            Arc::new(ReadTodoListTool),
            Arc::new(RemoveTodoTool),
            Arc::new(PlayMusicTool),
            Arc::new(StopMusicTool),
            Arc::new(NextSongTool),
            Arc::new(CallPersonTool),
            Arc::new(SendMessageTool),
            Arc::new(SetReminderTool),
            Arc::new(CurrentTimeTool),
            Arc::new(RecentEventsTool),
            Arc::new(SearchEventsTool),
        ];
        Self { tools }
    }

    /// Function declarations for the remote model
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description(),
                parameters: t.parameters(),
            })
            .collect()
    }

    /// Execute a tool by name. `None` means the name is not in the catalog,
    /// which the caller reports as an unsupported capability.
    pub async fn execute(&self, name: &str, args: &Value, ctx: &ToolContext) -> Option<String> {
        for tool in &self.tools {
            if tool.name() == name {
                return Some(tool.run(args, ctx).await);
            }
        }
        None
    }
}

/// Pull a string argument, treating the placeholder sentinels the model
/// falls back to (`"something"`, `"someone"`) as not provided.
fn string_arg(args: &Value, key: &str) -> Option<String> {
    let value = args.get(key)?.as_str()?.trim().to_string();
    if value.is_empty() || matches!(value.to_lowercase().as_str(), "something" | "someone") {
        return None;
    }
    Some(value)
}
