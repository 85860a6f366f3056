//! Environment-driven configuration

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_DATA_DIR: &str = "tara_data";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct TaraConfig {
    /// Absent means rule-based-only mode, not an error
    pub gemini_api_key: Option<String>,
    pub model: String,
    pub data_dir: PathBuf,
    /// Bounded wait on each remote-model exchange
    pub request_timeout: Duration,
}

impl TaraConfig {
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("TARA_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: std::env::var("TARA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            data_dir: std::env::var("TARA_DATA_DIR")
                .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn todo_path(&self) -> PathBuf {
        self.data_dir.join("todo_list.json")
    }

    pub fn memory_path(&self) -> PathBuf {
        self.data_dir.join("memory_log.jsonl")
    }
}
