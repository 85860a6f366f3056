//! File-backed to-do list
//!
//! Persisted as a JSON array of strings, rewritten whole on every mutation.
//! There is no partial-write atomicity; the process handles one command at a
//! time so there is no concurrent writer within a single instance.

use std::fs;
use std::path::PathBuf;

/// Ordered list of free-text to-do items backed by a JSON file
pub struct TodoStore {
    path: PathBuf,
}

impl TodoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the current items. A missing file is an empty list; a corrupted
    /// file is reported and read as empty rather than aborting the turn.
    pub fn items(&self) -> Vec<String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e,
                    "Corrupted to-do file, starting with an empty list");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored list. Failures are reported but not propagated;
    /// the spoken confirmation stays best-effort.
    pub fn replace(&self, items: &[String]) {
        let result = serde_json::to_string_pretty(items)
            .map_err(std::io::Error::other)
            .and_then(|json| fs::write(&self.path, json));
        if let Err(e) = result {
            tracing::error!(path = %self.path.display(), error = %e,
                "Failed to save to-do list");
        }
    }

    /// Append one item.
    pub fn add(&self, item: &str) {
        let mut items = self.items();
        items.push(item.to_string());
        self.replace(&items);
    }

    /// Remove every item whose lowercased text contains the lowercased
    /// keyword. Returns the removed items; when nothing matches the stored
    /// list is left untouched.
    pub fn remove_matching(&self, keyword: &str) -> Vec<String> {
        let needle = keyword.to_lowercase();
        let items = self.items();
        let (removed, kept): (Vec<String>, Vec<String>) = items
            .into_iter()
            .partition(|item| item.to_lowercase().contains(&needle));

        if !removed.is_empty() {
            self.replace(&kept);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, TodoStore) {
        let dir = TempDir::new().unwrap();
        let store = TodoStore::new(dir.path().join("todo_list.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_dir, store) = temp_store();
        assert!(store.items().is_empty());
    }

    #[test]
    fn add_appends_in_order() {
        let (_dir, store) = temp_store();
        store.add("buy milk");
        store.add("call doctor");
        assert_eq!(store.items(), vec!["buy milk", "call doctor"]);
    }

    #[test]
    fn remove_matching_removes_all_substring_matches() {
        let (_dir, store) = temp_store();
        store.add("buy Milk");
        store.add("buy oat milk");
        store.add("call doctor");

        let removed = store.remove_matching("MILK");
        assert_eq!(removed, vec!["buy Milk", "buy oat milk"]);
        assert_eq!(store.items(), vec!["call doctor"]);
    }

    #[test]
    fn remove_matching_with_no_match_leaves_list_unchanged() {
        let (_dir, store) = temp_store();
        store.add("buy milk");

        let removed = store.remove_matching("doctor");
        assert!(removed.is_empty());
        assert_eq!(store.items(), vec!["buy milk"]);
    }

    #[test]
    fn corrupted_file_reads_as_empty() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("todo_list.json"), "{definitely not").unwrap();
        assert!(store.items().is_empty());

        // And the next mutation recovers the file
        store.add("fresh start");
        assert_eq!(store.items(), vec!["fresh start"]);
    }
}
