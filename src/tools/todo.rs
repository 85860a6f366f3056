//! To-do list tools

use super::{string_arg, Tool, ToolContext};
use async_trait::async_trait;
use serde_json::{json, Value};

pub struct AddTodoTool;

#[async_trait]
impl Tool for AddTodoTool {
    fn name(&self) -> &'static str {
        "add_todo"
    }

    fn description(&self) -> String {
        "Adds a specific item to the user's to-do list.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item": {
                    "type": "string",
                    "description": "The item to add to the to-do list (e.g., 'buy milk', 'call doctor')."
                }
            },
            "required": ["item"]
        })
    }

    async fn run(&self, args: &Value, ctx: &ToolContext) -> String {
        let Some(item) = string_arg(args, "item") else {
            return "I need a specific item to add. What would you like to add?".to_string();
        };
        ctx.todo.add(&item);
        format!("Okay, I've added '{item}' to your to-do list.")
    }
}

pub struct ReadTodoListTool;

#[async_trait]
impl Tool for ReadTodoListTool {
    fn name(&self) -> &'static str {
        "read_todo_list"
    }

    fn description(&self) -> String {
        "Reads out all items currently on the user's to-do list.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn run(&self, _args: &Value, ctx: &ToolContext) -> String {
        let items = ctx.todo.items();
        match items.as_slice() {
            [] => "Your to-do list is empty.".to_string(),
            [only] => format!("You have one item on your list: {only}."),
            [rest @ .., last] => format!(
                "You have {} items on your list: {}, and {last}.",
                items.len(),
                rest.join(", "),
            ),
        }
    }
}

pub struct RemoveTodoTool;

#[async_trait]
impl Tool for RemoveTodoTool {
    fn name(&self) -> &'static str {
        "remove_todo"
    }

    fn description(&self) -> String {
        "Removes an item from the to-do list based on a keyword or phrase.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "item_keyword": {
                    "type": "string",
                    "description": "A keyword or phrase identifying the item to remove (e.g., 'milk', 'doctor appointment')."
                }
            },
            "required": ["item_keyword"]
        })
    }

    async fn run(&self, args: &Value, ctx: &ToolContext) -> String {
        let Some(keyword) = string_arg(args, "item_keyword") else {
            return "Please tell me what item you'd like to remove.".to_string();
        };
        let removed = ctx.todo.remove_matching(&keyword);
        match removed.as_slice() {
            [] => format!("I couldn't find any item containing '{keyword}' on your list."),
            [only] => format!("I've removed '{only}' from your list."),
            _ => format!(
                "I've removed {} items from your list, including those related to '{keyword}'.",
                removed.len()
            ),
        }
    }
}
