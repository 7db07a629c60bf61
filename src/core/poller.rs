// src/core/poller.rs
//! Change-counter based pasteboard polling
//!
//! The pasteboard exposes a counter that advances on every copy. Reading the
//! counter is cheap, so each tick compares it with the last value seen and
//! only reads the text and the frontmost application when it moved.

use tracing::{debug, trace};

use crate::core::entry::ClipboardEntry;
use crate::core::history::HistoryStore;
use crate::core::pasteboard::{FrontmostApp, Pasteboard};

/// Last change counter observed by the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerState {
    pub last_seen_change_count: isize,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Counter did not move
    Unchanged,
    /// Counter moved but the pasteboard holds no text
    NoText,
    /// Text was already in history
    Duplicate,
    /// New entry at the front of the history
    Recorded(ClipboardEntry),
}

pub struct PasteboardPoller<P, A> {
    pasteboard: P,
    apps: A,
    state: PollerState,
}

impl<P: Pasteboard, A: FrontmostApp> PasteboardPoller<P, A> {
    /// Create a poller that ignores whatever is already on the pasteboard
    pub fn new(pasteboard: P, apps: A) -> Self {
        let state = PollerState {
            last_seen_change_count: pasteboard.change_count(),
        };
        debug!(change_count = state.last_seen_change_count, "pasteboard poller created");
        Self {
            pasteboard,
            apps,
            state,
        }
    }

    /// Sample the pasteboard once and forward new text to `history`
    pub fn tick(&mut self, history: &mut HistoryStore) -> TickOutcome {
        let current = self.pasteboard.change_count();
        if current == self.state.last_seen_change_count {
            trace!(change_count = current, "pasteboard unchanged");
            return TickOutcome::Unchanged;
        }

        debug!(
            "pasteboard changed: {} -> {}",
            self.state.last_seen_change_count, current
        );
        self.state.last_seen_change_count = current;

        let Some(text) = self.pasteboard.read_text() else {
            debug!("pasteboard has no text representation");
            return TickOutcome::NoText;
        };

        let source_app = self.apps.frontmost_app_name();
        let Some(entry) = ClipboardEntry::capture(text, source_app) else {
            debug!("pasteboard text is empty");
            return TickOutcome::NoText;
        };

        if history.record_if_new(entry.clone()) {
            TickOutcome::Recorded(entry)
        } else {
            TickOutcome::Duplicate
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn pasteboard(&self) -> &P {
        &self.pasteboard
    }

    /// Mutable pasteboard access for copy-back
    pub fn pasteboard_mut(&mut self) -> &mut P {
        &mut self.pasteboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::UNKNOWN_SOURCE_APP;
    use crate::core::pasteboard::{copy_back, FixedFrontmostApp, MemoryPasteboard};
    use pretty_assertions::assert_eq;

    fn poller_with(pb: MemoryPasteboard) -> PasteboardPoller<MemoryPasteboard, FixedFrontmostApp> {
        PasteboardPoller::new(pb, FixedFrontmostApp::named("Safari"))
    }

    #[test]
    fn test_existing_content_is_not_captured() {
        let mut pb = MemoryPasteboard::new();
        pb.set_text("copied before launch");
        let mut poller = poller_with(pb);
        let mut history = HistoryStore::new();

        assert_eq!(poller.tick(&mut history), TickOutcome::Unchanged);
        assert!(history.is_empty());
    }

    #[test]
    fn test_unchanged_ticks_are_idempotent() {
        let mut poller = poller_with(MemoryPasteboard::new());
        let mut history = HistoryStore::new();

        poller.pasteboard_mut().set_text("hello");
        assert!(matches!(poller.tick(&mut history), TickOutcome::Recorded(_)));

        for _ in 0..5 {
            assert_eq!(poller.tick(&mut history), TickOutcome::Unchanged);
        }
        assert_eq!(history.len(), 1);
        assert_eq!(poller.state().last_seen_change_count, 1);
    }

    #[test]
    fn test_records_source_app_and_content() {
        let mut poller = poller_with(MemoryPasteboard::new());
        let mut history = HistoryStore::new();

        poller.pasteboard_mut().set_text("https://example.com");
        let TickOutcome::Recorded(entry) = poller.tick(&mut history) else {
            panic!("expected a recorded entry");
        };

        assert_eq!(entry.content, "https://example.com");
        assert_eq!(entry.source_app, "Safari");
        assert_eq!(history.get(0), Some(&entry));
    }

    #[test]
    fn test_missing_frontmost_app_records_unknown() {
        let mut poller = PasteboardPoller::new(MemoryPasteboard::new(), FixedFrontmostApp::unavailable());
        let mut history = HistoryStore::new();

        poller.pasteboard_mut().set_text("text");
        poller.tick(&mut history);

        assert_eq!(history.get(0).unwrap().source_app, UNKNOWN_SOURCE_APP);
    }

    #[test]
    fn test_non_text_change_advances_counter_only() {
        let mut poller = poller_with(MemoryPasteboard::new());
        let mut history = HistoryStore::new();

        poller.pasteboard_mut().set_non_text();
        assert_eq!(poller.tick(&mut history), TickOutcome::NoText);
        assert_eq!(poller.state().last_seen_change_count, 1);
        assert_eq!(poller.tick(&mut history), TickOutcome::Unchanged);

        poller.pasteboard_mut().set_text("");
        assert_eq!(poller.tick(&mut history), TickOutcome::NoText);
        assert!(history.is_empty());
    }

    #[test]
    fn test_abc_abc_def_scenario() {
        let mut poller = poller_with(MemoryPasteboard::new());
        let mut history = HistoryStore::new();

        for text in ["abc", "abc", "def"] {
            poller.pasteboard_mut().set_text(text);
            poller.tick(&mut history);
        }

        let contents: Vec<_> = history.query("").iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["def", "abc"]);
    }

    #[test]
    fn test_copy_back_does_not_duplicate() {
        let mut poller = poller_with(MemoryPasteboard::new());
        let mut history = HistoryStore::new();

        poller.pasteboard_mut().set_text("first");
        poller.tick(&mut history);
        poller.pasteboard_mut().set_text("second");
        poller.tick(&mut history);

        copy_back(poller.pasteboard_mut(), "first").unwrap();
        assert_eq!(poller.tick(&mut history), TickOutcome::Duplicate);
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().content, "second");
    }

    #[test]
    fn test_changes_between_ticks_collapse() {
        let mut poller = poller_with(MemoryPasteboard::new());
        let mut history = HistoryStore::new();

        poller.pasteboard_mut().set_text("overwritten");
        poller.pasteboard_mut().set_text("latest");
        poller.tick(&mut history);

        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0).unwrap().content, "latest");
    }
}
