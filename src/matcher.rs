//! Deterministic keyword fallback
//!
//! Last-resort command handling for when the remote model is unconfigured
//! or returns nothing usable. Ordered first-match-wins rules over the
//! lowercased command text, invoking registry tools directly with
//! heuristically extracted arguments. Has no memory of the remote
//! conversation and no function-calling.

use crate::tools::{ToolContext, ToolRegistry};
use serde_json::json;

const DONT_UNDERSTAND: &str =
    "I'm sorry, I didn't quite understand that. Could you rephrase?";

/// Trailing phrases stripped when pulling a to-do item out of a command
const TODO_TRAILERS: &[&str] = &[
    "to my to do list",
    "from my to do list",
    "to my list",
    "from my list",
    "to do",
];

pub struct RuleBasedMatcher;

impl RuleBasedMatcher {
    /// Match the command against the rule table and produce a reply,
    /// invoking at most one tool.
    pub async fn respond(
        &self,
        command: &str,
        registry: &ToolRegistry,
        ctx: &ToolContext,
    ) -> String {
        let text = command.to_lowercase();

        if text.contains("hello") || text.contains("hi tara") {
            return "Hello to you too! It's nice to chat with you.".to_string();
        }
        if text.contains("how are you") {
            return "I am functioning optimally and ready to assist!".to_string();
        }
        if text.contains("add") && (text.contains("to do") || text.contains("list")) {
            let item = extract_after(&text, "add ");
            let reply = registry
                .execute("add_todo", &json!({ "item": item }), ctx)
                .await;
            return reply.unwrap_or_else(|| DONT_UNDERSTAND.to_string());
        }
        if (text.contains("read") || text.contains("what's on")) && text.contains("list") {
            let reply = registry.execute("read_todo_list", &json!({}), ctx).await;
            return reply.unwrap_or_else(|| DONT_UNDERSTAND.to_string());
        }
        if (text.contains("remove ") || text.contains("delete "))
            && (text.contains("to do") || text.contains("list"))
        {
            let trigger = if text.contains("remove ") { "remove " } else { "delete " };
            let keyword = extract_after(&text, trigger);
            let reply = registry
                .execute("remove_todo", &json!({ "item_keyword": keyword }), ctx)
                .await;
            return reply.unwrap_or_else(|| DONT_UNDERSTAND.to_string());
        }
        if text.contains("play music") || text.contains("play some music") {
            let reply = registry.execute("play_music", &json!({}), ctx).await;
            return reply.unwrap_or_else(|| DONT_UNDERSTAND.to_string());
        }
        if text.contains("stop music") {
            let reply = registry.execute("stop_music", &json!({}), ctx).await;
            return reply.unwrap_or_else(|| DONT_UNDERSTAND.to_string());
        }
        if text.contains("next song") {
            let reply = registry.execute("next_song", &json!({}), ctx).await;
            return reply.unwrap_or_else(|| DONT_UNDERSTAND.to_string());
        }
        if text.contains("call ") {
            let person = extract_after(&text, "call ");
            let reply = registry
                .execute("call_person", &json!({ "person_name": person }), ctx)
                .await;
            return reply.unwrap_or_else(|| DONT_UNDERSTAND.to_string());
        }
        if text.contains("what time") || text.contains("the time") {
            let reply = registry.execute("get_current_time", &json!({}), ctx).await;
            return reply.unwrap_or_else(|| DONT_UNDERSTAND.to_string());
        }
        if text.contains("thank") {
            return "You're most welcome! It's my pleasure to help.".to_string();
        }

        DONT_UNDERSTAND.to_string()
    }
}

/// Everything after the first occurrence of `trigger`, with common to-do
/// trailers stripped. An empty extraction falls through to the tool's own
/// clarifying question via the placeholder sentinel.
fn extract_after(text: &str, trigger: &str) -> String {
    let Some((_, rest)) = text.split_once(trigger) else {
        return "something".to_string();
    };
    let mut item = rest.trim().to_string();
    for trailer in TODO_TRAILERS {
        if let Some(stripped) = item.strip_suffix(trailer) {
            item = stripped.trim().to_string();
        }
    }
    if item.is_empty() {
        "something".to_string()
    } else {
        item
    }
}
