//! TARA - voice-driven personal assistant
//!
//! Turns free-text commands into actions through a Gemini tool-calling
//! dispatch loop with a deterministic rule-based fallback. Commands come
//! from stdin and replies go to stdout; the audio pipeline is out of scope.

mod config;
mod dispatch;
mod llm;
mod matcher;
mod memory;
mod persona;
mod store;
mod tools;

use config::TaraConfig;
use dispatch::DispatchLoop;
use llm::gemini::GeminiChat;
use llm::ChatSession;
use memory::EventLog;
use serde_json::json;
use std::io::{BufRead, Write};
use std::sync::Arc;
use store::TodoStore;
use tools::{ToolContext, ToolRegistry};
use tracing_subscriber::EnvFilter;

const GREETING: &str =
    "Hello there! I am TARA, your personal companion robot. How can I assist you today?";
const GOODBYE: &str = "Goodbye! Have a wonderful day.";

/// Case-insensitive substring check on the raw command; terminates the
/// session unconditionally, whatever the model or matcher would have said.
const EXIT_PHRASES: &[&str] = &["quit", "exit", "goodbye"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "tara=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = TaraConfig::from_env();

    // Storage directory must exist before anything else; this is the one
    // failure that aborts startup.
    std::fs::create_dir_all(&config.data_dir)?;

    let events = Arc::new(EventLog::new(config.memory_path()));
    let ctx = ToolContext::new(Arc::new(TodoStore::new(config.todo_path())), events.clone());
    let registry = ToolRegistry::standard();

    let session: Option<Box<dyn ChatSession>> = match &config.gemini_api_key {
        Some(key) => {
            tracing::info!(model = %config.model, "Gemini session configured");
            let chat = GeminiChat::new(
                key.clone(),
                &config.model,
                persona::SYSTEM_INSTRUCTION,
                &registry.definitions(),
                config.request_timeout,
            )?;
            Some(Box::new(chat))
        }
        None => {
            tracing::warn!("No GEMINI_API_KEY configured, using the rule-based matcher only");
            None
        }
    };

    let mut dispatch = DispatchLoop::new(session, registry, ctx, events.clone());

    speak(GREETING);

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        prompt();
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF counts as a goodbye
            speak(GOODBYE);
            events.append(
                "tara_response",
                json!({ "response": GOODBYE, "exit_triggered": true }),
            );
            break;
        }
        let command = line.trim().to_string();
        events.append(
            "user_command_processed_by_voice_interface",
            json!({ "command": command }),
        );

        let lowered = command.to_lowercase();
        if EXIT_PHRASES.iter().any(|p| lowered.contains(p)) {
            speak(GOODBYE);
            events.append(
                "tara_response",
                json!({ "response": GOODBYE, "exit_triggered": true }),
            );
            break;
        }

        let reply = dispatch.handle_command(&command).await;
        speak(&reply);
        events.append("tara_response", json!({ "response": reply }));
    }

    Ok(())
}

/// Stand-in for text-to-speech: print the reply for the user to read.
fn speak(text: &str) {
    println!("TARA: {text}");
}

fn prompt() {
    print!("You say: ");
    let _ = std::io::stdout().flush();
}
