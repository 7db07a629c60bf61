// src/core/monitor.rs
//! Poller and history wired together
//!
//! `ClipboardMonitor` is what the front end talks to: the run-loop timer calls
//! [`ClipboardMonitor::tick`], console commands read and clear the history and
//! copy entries back. Everything happens on one thread, so there is no locking.

use tracing::info;

use crate::config::MonitorConfig;
use crate::core::entry::ClipboardEntry;
use crate::core::history::{HistoryListener, HistoryStore};
use crate::core::pasteboard::{copy_back, FrontmostApp, Pasteboard};
use crate::core::poller::{PasteboardPoller, TickOutcome};
use crate::error::{ClipError, Result};
use crate::utils::TextTransform;

pub struct ClipboardMonitor<P, A> {
    poller: PasteboardPoller<P, A>,
    history: HistoryStore,
    config: MonitorConfig,
    running: bool,
}

impl<P: Pasteboard, A: FrontmostApp> ClipboardMonitor<P, A> {
    pub fn new(pasteboard: P, apps: A, config: MonitorConfig) -> Self {
        Self {
            poller: PasteboardPoller::new(pasteboard, apps),
            history: HistoryStore::new(),
            config,
            running: false,
        }
    }

    pub fn add_listener<T: HistoryListener + 'static>(&mut self, listener: T) {
        self.history.add_listener(listener);
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        info!("clipboard monitoring started");
        self.history.notify_monitoring_started();
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        info!(entries = self.history.len(), "clipboard monitoring stopped");
        self.history.notify_monitoring_stopped();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sample the pasteboard once. A stopped monitor does nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Unchanged;
        }
        self.poller.tick(&mut self.history)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn pasteboard(&self) -> &P {
        self.poller.pasteboard()
    }

    pub fn pasteboard_mut(&mut self) -> &mut P {
        self.poller.pasteboard_mut()
    }

    /// Copy the entry at `index` (0 = most recent) back to the pasteboard,
    /// optionally transformed. Returns the text that was written.
    pub fn copy_entry(&mut self, index: usize, transform: Option<TextTransform>) -> Result<String> {
        let entry: &ClipboardEntry = self
            .history
            .get(index)
            .ok_or(ClipError::NoSuchEntry(index + 1))?;

        let text = match transform {
            Some(t) => t.apply(&entry.content),
            None => entry.content.clone(),
        };
        copy_back(self.poller.pasteboard_mut(), &text)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pasteboard::{FixedFrontmostApp, MemoryPasteboard};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type TestMonitor = ClipboardMonitor<MemoryPasteboard, FixedFrontmostApp>;

    fn monitor() -> TestMonitor {
        let mut m = ClipboardMonitor::new(
            MemoryPasteboard::new(),
            FixedFrontmostApp::named("Xcode"),
            MonitorConfig::default(),
        );
        m.start();
        m
    }

    fn copy(m: &mut TestMonitor, text: &str) {
        m.pasteboard_mut().set_text(text);
        m.tick();
    }

    struct Lifecycle(Rc<RefCell<Vec<&'static str>>>);

    impl HistoryListener for Lifecycle {
        fn on_entry_recorded(&mut self, _entry: &ClipboardEntry, _history: &[ClipboardEntry]) {
            self.0.borrow_mut().push("recorded");
        }
        fn on_monitoring_started(&mut self) {
            self.0.borrow_mut().push("started");
        }
        fn on_monitoring_stopped(&mut self) {
            self.0.borrow_mut().push("stopped");
        }
    }

    #[test]
    fn test_stopped_monitor_ignores_changes() {
        let mut m = monitor();
        m.stop();

        m.pasteboard_mut().set_text("while stopped");
        assert_eq!(m.tick(), TickOutcome::Unchanged);
        assert!(m.history().is_empty());
    }

    #[test]
    fn test_copy_entry_with_transform() {
        let mut m = monitor();
        copy(&mut m, "  Padded Text  ");
        copy(&mut m, "see https://example.com now");

        let written = m.copy_entry(1, Some(TextTransform::Trim)).unwrap();
        assert_eq!(written, "Padded Text");
        assert_eq!(m.pasteboard().read_text().as_deref(), Some("Padded Text"));

        // The transformed text is new content, so the next tick records it
        assert!(matches!(m.tick(), TickOutcome::Recorded(_)));
        assert_eq!(m.history().len(), 3);
    }

    #[test]
    fn test_copy_entry_untransformed_is_deduplicated() {
        let mut m = monitor();
        copy(&mut m, "alpha");
        copy(&mut m, "beta");

        assert_eq!(m.copy_entry(1, None).unwrap(), "alpha");
        assert_eq!(m.tick(), TickOutcome::Duplicate);
        assert_eq!(m.history().len(), 2);
    }

    #[test]
    fn test_copy_entry_out_of_range() {
        let mut m = monitor();
        copy(&mut m, "only");

        let err = m.copy_entry(4, None).unwrap_err();
        assert!(matches!(err, ClipError::NoSuchEntry(5)));
    }

    #[test]
    fn test_lifecycle_notifications() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut m = ClipboardMonitor::new(
            MemoryPasteboard::new(),
            FixedFrontmostApp::unavailable(),
            MonitorConfig::default(),
        );
        m.add_listener(Lifecycle(events.clone()));

        m.start();
        m.start();
        copy(&mut m, "x");
        m.stop();
        m.stop();

        assert_eq!(*events.borrow(), vec!["started", "recorded", "stopped"]);
    }
}
