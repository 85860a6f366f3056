//! Command dispatch and tool-calling orchestration
//!
//! One turn: forward the command to the model session, execute at most one
//! requested tool, feed the result back for a natural-language reply, and
//! fall back to the rule-based matcher when the remote path is unconfigured
//! or yields nothing usable. Every transition that reaches the model,
//! executes a tool, or produces a final reply appends one event to the
//! recall log; logging never changes the outcome of a turn.

use crate::llm::{ChatSession, LlmError, Reply};
use crate::matcher::RuleBasedMatcher;
use crate::memory::EventLog;
use crate::tools::{ToolContext, ToolRegistry};
use serde_json::json;
use std::sync::Arc;

/// Fixed apology for a remote communication failure. Deliberately not a
/// fallback to the matcher: by the time a failure surfaces, a tool may
/// already have run once on the model path, and re-entering the matcher
/// could execute a side-effecting tool a second time.
const APOLOGY: &str = "I'm sorry, I ran into a problem while processing that. Please try again.";

const EMPTY_COMMAND_PROMPT: &str = "I didn't catch anything. What would you like me to do?";

/// Why the deterministic matcher took over a turn
#[derive(Debug, Clone, Copy)]
enum FallbackReason {
    ModelNotConfigured,
    EmptyCandidate,
}

impl FallbackReason {
    fn as_str(self) -> &'static str {
        match self {
            FallbackReason::ModelNotConfigured => "model_not_configured",
            FallbackReason::EmptyCandidate => "empty_candidate",
        }
    }
}

/// The per-turn orchestrator
pub struct DispatchLoop {
    session: Option<Box<dyn ChatSession>>,
    registry: ToolRegistry,
    matcher: RuleBasedMatcher,
    ctx: ToolContext,
    events: Arc<EventLog>,
}

impl DispatchLoop {
    /// `session` is `None` when no model credential is configured; every
    /// command then goes straight to the rule-based matcher.
    pub fn new(
        session: Option<Box<dyn ChatSession>>,
        registry: ToolRegistry,
        ctx: ToolContext,
        events: Arc<EventLog>,
    ) -> Self {
        Self {
            session,
            registry,
            matcher: RuleBasedMatcher,
            ctx,
            events,
        }
    }

    /// Process one command to completion and return the reply to speak.
    pub async fn handle_command(&mut self, command: &str) -> String {
        let command = command.trim();
        self.events
            .append("user_command", json!({ "command": command }));

        if command.is_empty() {
            self.events.append("empty_command", json!({}));
            return EMPTY_COMMAND_PROMPT.to_string();
        }

        // Take the session for the duration of the turn so the model
        // exchange and the fallback/event paths don't fight over borrows.
        let Some(mut session) = self.session.take() else {
            return self
                .fall_back(command, FallbackReason::ModelNotConfigured)
                .await;
        };
        let reply = self.model_turn(session.as_mut(), command).await;
        self.session = Some(session);
        reply
    }

    async fn model_turn(&mut self, session: &mut dyn ChatSession, command: &str) -> String {
        self.events
            .append("gemini_send_message_start", json!({ "command": command }));
        let outcome = session.send_user_text(command).await;
        self.events.append("gemini_send_message_end", json!({}));

        match outcome {
            Err(e) => self.report_failure(&e, command),
            Ok(Reply::Empty) => self.fall_back(command, FallbackReason::EmptyCandidate).await,
            Ok(Reply::DirectText(text)) => {
                self.events.append(
                    "gemini_direct_response",
                    json!({ "response_text": text }),
                );
                text
            }
            Ok(Reply::ToolCall { name, args }) => {
                self.run_tool_turn(session, command, &name, args).await
            }
        }
    }

    /// Execute the requested tool once and send its result back for the
    /// model's second-pass reply.
    async fn run_tool_turn(
        &mut self,
        session: &mut dyn ChatSession,
        command: &str,
        name: &str,
        args: serde_json::Value,
    ) -> String {
        self.events.append(
            "gemini_tool_call_request",
            json!({ "function_name": name, "args": args }),
        );

        let Some(result) = self.registry.execute(name, &args, &self.ctx).await else {
            self.events.append(
                "gemini_unknown_tool_call",
                json!({ "function_name": name }),
            );
            return format!("I don't have the ability to do '{name}' yet.");
        };

        self.events.append(
            "tool_executed",
            json!({ "function_name": name, "args": args, "result": result }),
        );

        self.events.append(
            "gemini_tool_result_send_start",
            json!({ "function_name": name }),
        );
        let outcome = session.send_tool_result(name, &result).await;
        self.events
            .append("gemini_tool_result_send_end", json!({}));

        match outcome {
            Err(e) => self.report_failure(&e, command),
            // The tool already ran; re-entering the matcher here could
            // execute a second side-effecting tool, so the tool's own
            // result doubles as the reply.
            Ok(Reply::Empty) => {
                self.events.append(
                    "gemini_final_response",
                    json!({ "response_text": result, "tool_executed": true }),
                );
                result
            }
            Ok(Reply::DirectText(text)) => {
                self.events.append(
                    "gemini_final_response",
                    json!({ "response_text": text, "tool_executed": true }),
                );
                text
            }
            // One tool per turn; a second request is out of contract and
            // the already-obtained result is the safest reply.
            Ok(Reply::ToolCall { name: next, .. }) => {
                tracing::warn!(requested = %next, "Ignoring chained tool request");
                self.events.append(
                    "gemini_final_response",
                    json!({ "response_text": result, "tool_executed": true }),
                );
                result
            }
        }
    }

    async fn fall_back(&mut self, command: &str, reason: FallbackReason) -> String {
        self.events.append(
            "fallback_triggered",
            json!({ "reason": reason.as_str() }),
        );
        tracing::info!(reason = reason.as_str(), "Falling back to rule-based matcher");
        self.matcher.respond(command, &self.registry, &self.ctx).await
    }

    fn report_failure(&self, error: &LlmError, command: &str) -> String {
        tracing::error!(error = %error, kind = ?error.kind, "Remote model exchange failed");
        self.events.append(
            "gemini_error_during_processing",
            json!({ "error": error.to_string(), "command": command }),
        );
        APOLOGY.to_string()
    }
}
