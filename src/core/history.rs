// src/core/history.rs
//! Deduplicated, newest-first clipboard history
//!
//! This module provides:
//! - Content-based deduplication (first occurrence keeps its position)
//! - Case-insensitive substring search
//! - Listener hooks fired after every mutation

use tracing::debug;
use uuid::Uuid;

use crate::core::entry::ClipboardEntry;

/// Trait for history observers
pub trait HistoryListener {
    /// Called after a new entry was inserted at the front of the history
    fn on_entry_recorded(&mut self, entry: &ClipboardEntry, history: &[ClipboardEntry]);

    /// Called after the history was emptied
    fn on_history_cleared(&mut self) {}

    /// Called when the pasteboard timer starts
    fn on_monitoring_started(&mut self) {}

    /// Called when the pasteboard timer stops
    fn on_monitoring_stopped(&mut self) {}
}

/// Ordered clipboard history, newest first.
///
/// Invariant: no two entries share the same `content`.
#[derive(Default)]
pub struct HistoryStore {
    entries: Vec<ClipboardEntry>,
    listeners: Vec<Box<dyn HistoryListener>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener for history changes
    pub fn add_listener<T: HistoryListener + 'static>(&mut self, listener: T) {
        self.listeners.push(Box::new(listener));
    }

    /// Insert `entry` at the front unless an entry with identical content
    /// already exists. Returns whether the entry was inserted.
    pub fn record_if_new(&mut self, entry: ClipboardEntry) -> bool {
        if self.entries.iter().any(|e| e.content == entry.content) {
            debug!(source = %entry.source_app, "dropping duplicate clipboard content");
            return false;
        }

        self.entries.insert(0, entry);
        debug!(count = self.entries.len(), "recorded clipboard entry");

        let (recorded, history) = (&self.entries[0], self.entries.as_slice());
        for listener in &mut self.listeners {
            listener.on_entry_recorded(recorded, history);
        }
        true
    }

    /// Entries whose content contains `search_text`, ignoring case, in
    /// history order. An empty search returns everything.
    pub fn query(&self, search_text: &str) -> Vec<&ClipboardEntry> {
        if search_text.is_empty() {
            return self.entries.iter().collect();
        }
        let needle = search_text.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.content.to_lowercase().contains(&needle))
            .collect()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        debug!("cleared clipboard history");
        for listener in &mut self.listeners {
            listener.on_history_cleared();
        }
    }

    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by position (0 = most recent)
    pub fn get(&self, index: usize) -> Option<&ClipboardEntry> {
        self.entries.get(index)
    }

    pub fn find(&self, id: Uuid) -> Option<&ClipboardEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub(crate) fn notify_monitoring_started(&mut self) {
        for listener in &mut self.listeners {
            listener.on_monitoring_started();
        }
    }

    pub(crate) fn notify_monitoring_stopped(&mut self) {
        for listener in &mut self.listeners {
            listener.on_monitoring_stopped();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn entry(content: &str) -> ClipboardEntry {
        ClipboardEntry::capture(content, Some("Terminal".to_string())).unwrap()
    }

    fn contents(entries: &[&ClipboardEntry]) -> Vec<String> {
        entries.iter().map(|e| e.content.clone()).collect()
    }

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl HistoryListener for Recorder {
        fn on_entry_recorded(&mut self, entry: &ClipboardEntry, history: &[ClipboardEntry]) {
            self.events
                .borrow_mut()
                .push(format!("recorded {} of {}", entry.content, history.len()));
        }

        fn on_history_cleared(&mut self) {
            self.events.borrow_mut().push("cleared".to_string());
        }
    }

    #[test]
    fn test_newest_first() {
        let mut store = HistoryStore::new();
        store.record_if_new(entry("a"));
        store.record_if_new(entry("b"));
        store.record_if_new(entry("c"));

        assert_eq!(contents(&store.query("")), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_duplicate_keeps_first_occurrence() {
        let mut store = HistoryStore::new();
        let first = entry("same");
        let first_id = first.id;

        assert!(store.record_if_new(first));
        assert!(!store.record_if_new(entry("same")));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().id, first_id);
    }

    #[test]
    fn test_duplicate_is_not_reordered() {
        let mut store = HistoryStore::new();
        store.record_if_new(entry("abc"));
        store.record_if_new(entry("abc"));
        store.record_if_new(entry("def"));
        store.record_if_new(entry("abc"));

        assert_eq!(contents(&store.query("")), vec!["def", "abc"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut store = HistoryStore::new();
        store.record_if_new(entry("Hello"));
        assert!(store.record_if_new(entry("hello")));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_query_case_insensitive_substring() {
        let mut store = HistoryStore::new();
        store.record_if_new(entry("Hello World"));
        store.record_if_new(entry("something else"));
        store.record_if_new(entry("world peace"));

        assert_eq!(contents(&store.query("WORLD")), vec!["world peace", "Hello World"]);
        assert!(store.query("xyz").is_empty());
    }

    #[test]
    fn test_clear_empties_store() {
        let mut store = HistoryStore::new();
        store.record_if_new(entry("one"));
        store.record_if_new(entry("two"));

        store.clear();

        assert!(store.is_empty());
        assert!(store.query("").is_empty());

        // Content seen before the clear can be recorded again
        assert!(store.record_if_new(entry("one")));
    }

    #[test]
    fn test_find_by_id() {
        let mut store = HistoryStore::new();
        let e = entry("lookup");
        let id = e.id;
        store.record_if_new(e);

        assert_eq!(store.find(id).map(|e| e.content.as_str()), Some("lookup"));
        assert!(store.find(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_listeners_see_mutations_only() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = HistoryStore::new();
        store.add_listener(Recorder {
            events: events.clone(),
        });

        store.record_if_new(entry("x"));
        store.record_if_new(entry("x"));
        store.record_if_new(entry("y"));
        store.clear();

        assert_eq!(
            *events.borrow(),
            vec!["recorded x of 1", "recorded y of 2", "cleared"]
        );
    }
}
