//! Memory recall tools, read-only against the event log

use super::{Tool, ToolContext};
use crate::memory::Event;
use async_trait::async_trait;
use serde_json::{json, Value};

pub struct RecentEventsTool;

#[async_trait]
impl Tool for RecentEventsTool {
    fn name(&self) -> &'static str {
        "get_recent_events"
    }

    fn description(&self) -> String {
        "Retrieves the most recent events TARA remembers, such as past commands and actions."
            .to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "count": {
                    "type": "number",
                    "description": "How many recent events to retrieve. Defaults to 5."
                }
            }
        })
    }

    async fn run(&self, args: &Value, ctx: &ToolContext) -> String {
        let count = args.get("count").and_then(Value::as_i64);
        let events = ctx.events.recent(count);
        match events.as_slice() {
            [] => "I don't have anything in my memory yet.".to_string(),
            [only] => format!(
                "Here is the last thing I remember: {}.",
                render_events(std::slice::from_ref(only))
            ),
            _ => format!(
                "Here are the last {} things I remember: {}.",
                events.len(),
                render_events(&events)
            ),
        }
    }
}

pub struct SearchEventsTool;

#[async_trait]
impl Tool for SearchEventsTool {
    fn name(&self) -> &'static str {
        "search_events"
    }

    fn description(&self) -> String {
        "Searches TARA's memory of past events for any of the given keywords.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query_keywords": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Keywords to look for in remembered events."
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of matches to return. Defaults to 10."
                }
            },
            "required": ["query_keywords"]
        })
    }

    async fn run(&self, args: &Value, ctx: &ToolContext) -> String {
        let keywords: Vec<String> = args
            .get("query_keywords")
            .and_then(Value::as_array)
            .map(|a| {
                a.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        if keywords.is_empty() {
            return "What would you like me to search my memory for?".to_string();
        }

        let limit = args.get("limit").and_then(Value::as_i64);
        let matches = ctx.events.search(&keywords, limit);
        if matches.is_empty() {
            return format!(
                "I couldn't find anything in my memory about {}.",
                keywords.join(", ")
            );
        }
        if let [only] = matches.as_slice() {
            return format!(
                "I found one memory matching {}: {}.",
                keywords.join(", "),
                render_events(std::slice::from_ref(only))
            );
        }
        format!(
            "I found {} memories matching {}: {}.",
            matches.len(),
            keywords.join(", "),
            render_events(&matches)
        )
    }
}

fn render_events(events: &[Event]) -> String {
    events
        .iter()
        .map(|e| format!("{} at {}", e.event_type.replace('_', " "), e.timestamp))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tests::test_context;

    #[tokio::test]
    async fn recent_on_empty_memory() {
        let (_dir, ctx) = test_context();
        let reply = RecentEventsTool.run(&json!({}), &ctx).await;
        assert_eq!(reply, "I don't have anything in my memory yet.");
    }

    #[tokio::test]
    async fn recent_respects_count_argument() {
        let (_dir, ctx) = test_context();
        for i in 0..7 {
            ctx.events.append("user_command", json!({ "n": i }));
        }
        let reply = RecentEventsTool.run(&json!({ "count": 2 }), &ctx).await;
        assert!(reply.starts_with("Here are the last 2 things I remember:"));

        // Non-numeric count coerces to the default of 5
        let reply = RecentEventsTool.run(&json!({ "count": "lots" }), &ctx).await;
        assert!(reply.starts_with("Here are the last 5 things I remember:"));
    }

    #[tokio::test]
    async fn recent_singular_for_one_event() {
        let (_dir, ctx) = test_context();
        ctx.events.append("user_command", json!({ "n": 0 }));
        let reply = RecentEventsTool.run(&json!({}), &ctx).await;
        assert!(reply.starts_with("Here is the last thing I remember:"));
    }

    #[tokio::test]
    async fn search_requires_keywords() {
        let (_dir, ctx) = test_context();
        let reply = SearchEventsTool.run(&json!({}), &ctx).await;
        assert_eq!(reply, "What would you like me to search my memory for?");
    }

    #[tokio::test]
    async fn search_reports_matches_and_misses() {
        let (_dir, ctx) = test_context();
        ctx.events
            .append("tool_executed", json!({ "result": "added milk" }));

        let hit = SearchEventsTool
            .run(&json!({ "query_keywords": ["milk"] }), &ctx)
            .await;
        assert!(hit.starts_with("I found one memory matching milk"));

        let miss = SearchEventsTool
            .run(&json!({ "query_keywords": ["tofu"] }), &ctx)
            .await;
        assert_eq!(miss, "I couldn't find anything in my memory about tofu.");
    }

    #[tokio::test]
    async fn search_pluralizes_multiple_matches() {
        let (_dir, ctx) = test_context();
        ctx.events
            .append("tool_executed", json!({ "result": "added milk" }));
        ctx.events
            .append("user_command", json!({ "command": "buy milk" }));

        let hit = SearchEventsTool
            .run(&json!({ "query_keywords": ["milk"] }), &ctx)
            .await;
        assert!(hit.starts_with("I found 2 memories matching milk"));
    }
}
