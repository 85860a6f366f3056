//! Mocked calling, messaging, and reminder tools

use super::{string_arg, Tool, ToolContext};
use async_trait::async_trait;
use serde_json::{json, Value};

pub struct CallPersonTool;

#[async_trait]
impl Tool for CallPersonTool {
    fn name(&self) -> &'static str {
        "call_person"
    }

    fn description(&self) -> String {
        "Initiates a simulated phone call to a specified person.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "person_name": {
                    "type": "string",
                    "description": "The name of the person to call (e.g., 'Mom', 'Doctor Smith')."
                }
            },
            "required": ["person_name"]
        })
    }

    async fn run(&self, args: &Value, _ctx: &ToolContext) -> String {
        let Some(person) = string_arg(args, "person_name") else {
            return "Who would you like me to call?".to_string();
        };
        format!("Attempting to call {person} now... (simulation complete).")
    }
}

pub struct SendMessageTool;

#[async_trait]
impl Tool for SendMessageTool {
    fn name(&self) -> &'static str {
        "send_message"
    }

    fn description(&self) -> String {
        "Sends a simulated text message to a specified person with a given message content."
            .to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "person_name": {
                    "type": "string",
                    "description": "The name of the person to send the message to."
                },
                "message": {
                    "type": "string",
                    "description": "The content of the message to send."
                }
            },
            "required": ["person_name", "message"]
        })
    }

    async fn run(&self, args: &Value, _ctx: &ToolContext) -> String {
        let Some(person) = string_arg(args, "person_name") else {
            return "Who should I send the message to?".to_string();
        };
        let message = string_arg(args, "message")
            .filter(|m| m.to_lowercase() != "empty message");
        let Some(message) = message else {
            return "What message would you like to send?".to_string();
        };
        format!("Sending message to {person}: '{message}'... (simulation complete).")
    }
}

pub struct SetReminderTool;

#[async_trait]
impl Tool for SetReminderTool {
    fn name(&self) -> &'static str {
        "set_reminder"
    }

    fn description(&self) -> String {
        "Sets a reminder for the user at a specified time with a given message.".to_string()
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "time": {
                    "type": "string",
                    "description": "The time for the reminder (e.g., '3 PM', 'tomorrow morning')."
                },
                "message": {
                    "type": "string",
                    "description": "The content of the reminder (e.g., 'take medicine')."
                }
            },
            "required": ["time", "message"]
        })
    }

    async fn run(&self, args: &Value, _ctx: &ToolContext) -> String {
        let (Some(time), Some(message)) = (string_arg(args, "time"), string_arg(args, "message"))
        else {
            return "I need both a time and a message for the reminder.".to_string();
        };
        format!("Okay, I've set a reminder for {time}: '{message}'.")
    }
}
