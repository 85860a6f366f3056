//! Append-only event log used for recall
//!
//! One JSON object per line, file order is chronological. The log is
//! best-effort: a failed append is reported but never surfaced to the
//! caller, because logging must not block command processing.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

const DEFAULT_RECENT_COUNT: usize = 5;
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// One immutable timestamped record in the recall log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
}

/// Append-only store of timestamped structured events
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one event with a fresh timestamp.
    ///
    /// Never fails the caller: serialization or write errors are logged
    /// and swallowed.
    pub fn append(&self, event_type: &str, data: Value) {
        let event = Event {
            timestamp: Local::now().to_rfc3339(),
            event_type: event_type.to_string(),
            data,
        };

        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(event_type, error = %e, "Failed to serialize event");
                return;
            }
        };

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| writeln!(f, "{line}"));

        if let Err(e) = result {
            tracing::error!(event_type, error = %e, "Failed to append event");
        } else {
            tracing::debug!(event_type, "Logged event");
        }
    }

    /// The last `count` events in file order (oldest of the window first).
    ///
    /// A missing or non-positive count coerces to the default of 5. Returns
    /// an empty list when the log does not exist yet.
    pub fn recent(&self, count: Option<i64>) -> Vec<Event> {
        let count = coerce_positive(count, DEFAULT_RECENT_COUNT);
        let events = self.read_all();
        let skip = events.len().saturating_sub(count);
        events.into_iter().skip(skip).collect()
    }

    /// Events whose serialized form contains any keyword, case-insensitive.
    ///
    /// Results come back in file order, capped at `limit`; the scan stops
    /// as soon as the cap is reached. A missing or non-positive limit
    /// coerces to the default of 10.
    pub fn search(&self, keywords: &[String], limit: Option<i64>) -> Vec<Event> {
        let limit = coerce_positive(limit, DEFAULT_SEARCH_LIMIT);
        let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

        let mut matches = Vec::new();
        let Ok(file) = File::open(&self.path) else {
            return matches;
        };

        for line in BufReader::new(file).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "Stopping event log scan on read error");
                    break;
                }
            };
            let event: Event = match serde_json::from_str(&line) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, line = %line, "Skipping corrupted event log line");
                    continue;
                }
            };
            let haystack = serde_json::to_string(&event)
                .unwrap_or_default()
                .to_lowercase();
            if lowered.iter().any(|k| haystack.contains(k.as_str())) {
                matches.push(event);
                if matches.len() >= limit {
                    break;
                }
            }
        }

        matches
    }

    fn read_all(&self) -> Vec<Event> {
        let Ok(file) = File::open(&self.path) else {
            return Vec::new();
        };

        let mut events = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "Stopping event log scan on read error");
                    break;
                }
            };
            match serde_json::from_str(&line) {
                Ok(event) => events.push(event),
                Err(e) => {
                    tracing::warn!(error = %e, line = %line, "Skipping corrupted event log line");
                }
            }
        }
        events
    }
}

fn coerce_positive(value: Option<i64>, default: usize) -> usize {
    match value {
        Some(n) if n > 0 => usize::try_from(n).unwrap_or(default),
        _ => default,
    }
}
