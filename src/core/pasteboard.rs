// src/core/pasteboard.rs
//! Platform seams for the pasteboard and the frontmost application.
//!
//! The poller only needs three things from the platform: a change counter,
//! the current plain text and the frontmost application's display name.
//! On macOS these come from `NSPasteboard` and `NSWorkspace`
//! (see `core::macos`); [`MemoryPasteboard`] and [`FixedFrontmostApp`] are
//! in-process stand-ins with the same counter semantics.

use tracing::{info, warn};

use crate::error::{ClipError, Result};

/// Read/write access to a plain-text pasteboard
pub trait Pasteboard {
    /// Counter that advances every time the pasteboard contents change
    fn change_count(&self) -> isize;

    /// Current plain-text contents, `None` if there is no text representation
    fn read_text(&self) -> Option<String>;

    /// Replace the pasteboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Query for the application the user is currently working in
pub trait FrontmostApp {
    /// Localized display name, `None` if unavailable
    fn frontmost_app_name(&self) -> Option<String>;
}

/// Copy `text` back to the pasteboard.
///
/// The write advances the change counter; the poller then sees content that is
/// already in history and drops it as a duplicate.
pub fn copy_back<P: Pasteboard + ?Sized>(pasteboard: &mut P, text: &str) -> Result<()> {
    match pasteboard.write_text(text) {
        Ok(()) => {
            info!(chars = text.chars().count(), "copied text back to pasteboard");
            Ok(())
        }
        Err(e) => {
            warn!("pasteboard write failed: {}", e);
            Err(e)
        }
    }
}

/// In-process pasteboard with the same change-counter semantics as the system one
#[derive(Debug, Clone, Default)]
pub struct MemoryPasteboard {
    change_count: isize,
    text: Option<String>,
    read_only: bool,
}

impl MemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate another application copying `text`
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.change_count += 1;
        self.text = Some(text.into());
    }

    /// Simulate a copy with no text representation (an image, a file list)
    pub fn set_non_text(&mut self) {
        self.change_count += 1;
        self.text = None;
    }

    /// Make subsequent writes fail, as a locked pasteboard would
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

impl Pasteboard for MemoryPasteboard {
    fn change_count(&self) -> isize {
        self.change_count
    }

    fn read_text(&self) -> Option<String> {
        self.text.clone()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.read_only {
            return Err(ClipError::WriteRejected);
        }
        self.set_text(text);
        Ok(())
    }
}

/// Frontmost application answer that never changes
#[derive(Debug, Clone, Default)]
pub struct FixedFrontmostApp(pub Option<String>);

impl FixedFrontmostApp {
    pub fn named(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl FrontmostApp for FixedFrontmostApp {
    fn frontmost_app_name(&self) -> Option<String> {
        self.0.clone()
    }
}
