//! Time lookup tool

use super::{Tool, ToolContext};
use async_trait::async_trait;
use chrono::Local;
use serde_json::{json, Value};

pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &'static str {
        "get_current_time"
    }

    fn description(&self) -> String {
        "Retrieves the current local time.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn run(&self, _args: &Value, _ctx: &ToolContext) -> String {
        let now = Local::now();
        format!("The current time is {}", now.format("%I:%M %p"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tests::test_context;

    #[tokio::test]
    async fn speaks_a_twelve_hour_clock() {
        let (_dir, ctx) = test_context();
        let reply = CurrentTimeTool.run(&json!({}), &ctx).await;
        assert!(reply.starts_with("The current time is "));
        assert!(reply.ends_with("AM") || reply.ends_with("PM"));
    }
}
