//! Google Gemini conversation session
//!
//! The Gemini `generateContent` endpoint is stateless at the wire level, so
//! the session owns the transcript and replays it on every call. Session
//! lifetime is process lifetime; there is no persistence across restarts.

use super::types::{Reply, ToolDefinition};
use super::{ChatSession, LlmError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Stateful handle to one Gemini conversation
pub struct GeminiChat {
    client: Client,
    api_key: String,
    base_url: String,
    system_instruction: String,
    tools: Vec<GeminiTool>,
    history: Vec<GeminiContent>,
}

impl GeminiChat {
    pub fn new(
        api_key: String,
        model: &str,
        system_instruction: &str,
        tool_definitions: &[ToolDefinition],
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let base_url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
        );

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        let tools = vec![GeminiTool {
            function_declarations: tool_definitions
                .iter()
                .map(|t| GeminiFunctionDeclaration {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.parameters.clone(),
                })
                .collect(),
        }];

        Ok(Self {
            client,
            api_key,
            base_url,
            system_instruction: system_instruction.to_string(),
            tools,
            history: Vec::new(),
        })
    }

    async fn generate(&mut self) -> Result<Reply, LlmError> {
        let request = GeminiRequest {
            contents: self.history.clone(),
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![GeminiPart::Text {
                    text: self.system_instruction.clone(),
                }],
            }),
            tools: Some(self.tools.clone()),
        };

        let url = format!("{}?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                let message = error_resp.error.message;
                return Err(match status.as_u16() {
                    400 => LlmError::invalid_request(format!("Invalid request: {message}")),
                    401 | 403 => LlmError::auth(format!("Authentication failed: {message}")),
                    429 => LlmError::rate_limit(format!("Rate limit exceeded: {message}")),
                    500..=599 => LlmError::server_error(format!("Server error: {message}")),
                    _ => LlmError::unknown(format!("HTTP {status}: {message}")),
                });
            }
            return Err(LlmError::unknown(format!("HTTP {status} error: {body}")));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        let (reply, model_content) = normalize_response(gemini_response);
        if let Some(content) = model_content {
            self.history.push(content);
        }
        Ok(reply)
    }

    /// Drop a trailing model `functionCall` turn that never received a
    /// `functionResponse`. The wire contract requires every function call
    /// to be answered before the conversation continues, but dispatch
    /// declines to answer unknown or chained tool requests; replaying the
    /// unanswered call on the next turn would fail the whole request.
    fn prune_unanswered_call(&mut self) {
        let unanswered = self.history.last().is_some_and(|content| {
            content
                .parts
                .iter()
                .any(|p| matches!(p, GeminiPart::FunctionCall { .. }))
        });
        if unanswered {
            tracing::warn!("Dropping unanswered function call from conversation history");
            self.history.pop();
        }
    }
}

#[async_trait]
impl ChatSession for GeminiChat {
    async fn send_user_text(&mut self, text: &str) -> Result<Reply, LlmError> {
        self.prune_unanswered_call();
        self.history.push(GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart::Text {
                text: text.to_string(),
            }],
        });
        self.generate().await
    }

    async fn send_tool_result(&mut self, name: &str, result: &str) -> Result<Reply, LlmError> {
        self.history.push(GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart::FunctionResponse {
                function_response: GeminiFunctionResponse {
                    name: name.to_string(),
                    response: json!({ "result": result }),
                },
            }],
        });
        self.generate().await
    }
}

/// Map a wire response onto a [`Reply`], plus the model turn to record in
/// history (absent when there was no usable candidate).
///
/// A candidate-free response is `Reply::Empty`, never an error: the
/// dispatch loop treats it as "model never attempted a tool" and hands the
/// command to the deterministic matcher.
fn normalize_response(resp: GeminiResponse) -> (Reply, Option<GeminiContent>) {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return (Reply::Empty, None);
    };

    let mut text_parts: Vec<String> = Vec::new();
    let mut tool_call: Option<(String, Value)> = None;

    for part in &candidate.content.parts {
        match part {
            GeminiPart::Text { text } => text_parts.push(text.clone()),
            GeminiPart::FunctionCall { function_call } => {
                // First function call wins; the catalog never needs more
                if tool_call.is_none() {
                    tool_call = Some((function_call.name.clone(), function_call.args.clone()));
                }
            }
            GeminiPart::FunctionResponse { .. } => {}
        }
    }

    let reply = match tool_call {
        Some((name, args)) => Reply::ToolCall { name, args },
        None if candidate.content.parts.is_empty() => Reply::Empty,
        None => Reply::DirectText(text_parts.join("")),
    };

    let model_content = match reply {
        Reply::Empty => None,
        _ => Some(candidate.content),
    };
    (reply, model_content)
}

// Gemini API wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: GeminiFunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: GeminiFunctionResponse,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiFunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    function_declarations: Vec<GeminiFunctionDeclaration>,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiFunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiApiError,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> (Reply, Option<GeminiContent>) {
        let resp: GeminiResponse = serde_json::from_str(body).unwrap();
        normalize_response(resp)
    }

    #[test]
    fn text_candidate_becomes_direct_text() {
        let (reply, recorded) = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello there!"}]}}]}"#,
        );
        assert_eq!(reply, Reply::DirectText("Hello there!".to_string()));
        assert!(recorded.is_some());
    }

    #[test]
    fn function_call_becomes_tool_call() {
        let (reply, _) = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[
                {"functionCall":{"name":"call_person","args":{"person_name":"Mom"}}}
            ]}}]}"#,
        );
        assert_eq!(
            reply,
            Reply::ToolCall {
                name: "call_person".to_string(),
                args: json!({ "person_name": "Mom" }),
            }
        );
    }

    #[test]
    fn no_candidates_is_empty_not_error() {
        let (reply, recorded) = parse(r"{}");
        assert_eq!(reply, Reply::Empty);
        assert!(recorded.is_none());

        let (reply, _) = parse(r#"{"candidates":[]}"#);
        assert_eq!(reply, Reply::Empty);
    }

    #[test]
    fn candidate_with_no_parts_is_empty() {
        let (reply, _) = parse(r#"{"candidates":[{"content":{"role":"model","parts":[]}}]}"#);
        assert_eq!(reply, Reply::Empty);
    }

    #[test]
    fn empty_text_is_direct_text_not_empty() {
        let (reply, _) =
            parse(r#"{"candidates":[{"content":{"role":"model","parts":[{"text":""}]}}]}"#);
        assert_eq!(reply, Reply::DirectText(String::new()));
    }

    fn chat() -> GeminiChat {
        GeminiChat::new(
            "test-key".to_string(),
            "gemini-2.5-flash",
            "You are TARA.",
            &[],
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn user_text(text: &str) -> GeminiContent {
        GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart::Text {
                text: text.to_string(),
            }],
        }
    }

    fn model_call(name: &str) -> GeminiContent {
        GeminiContent {
            role: Some("model".to_string()),
            parts: vec![GeminiPart::FunctionCall {
                function_call: GeminiFunctionCall {
                    name: name.to_string(),
                    args: json!({}),
                },
            }],
        }
    }

    #[test]
    fn unanswered_function_call_is_pruned_before_next_user_turn() {
        let mut chat = chat();
        chat.history.push(user_text("launch the rocket"));
        chat.history.push(model_call("launch_rocket"));

        chat.prune_unanswered_call();
        assert_eq!(chat.history.len(), 1);
        assert!(matches!(chat.history[0].parts[0], GeminiPart::Text { .. }));
    }

    #[test]
    fn answered_function_call_is_kept() {
        let mut chat = chat();
        chat.history.push(user_text("call mom"));
        chat.history.push(model_call("call_person"));
        chat.history.push(GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart::FunctionResponse {
                function_response: GeminiFunctionResponse {
                    name: "call_person".to_string(),
                    response: json!({ "result": "done" }),
                },
            }],
        });

        chat.prune_unanswered_call();
        assert_eq!(chat.history.len(), 3);
    }

    #[test]
    fn error_body_maps_to_classified_error() {
        let err: GeminiErrorResponse =
            serde_json::from_str(r#"{"error":{"message":"API key not valid","code":400}}"#)
                .unwrap();
        assert_eq!(err.error.message, "API key not valid");
    }
}
