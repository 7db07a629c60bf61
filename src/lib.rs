//! Clip Context Library
//!
//! Clipboard history for macOS: a change-counter poller samples the general
//! pasteboard once a second and feeds a deduplicated, newest-first history
//! that can be searched, transformed and copied back.

#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod console;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::config::MonitorConfig;
pub use crate::core::entry::ClipboardEntry;
pub use crate::core::history::{HistoryListener, HistoryStore};
pub use crate::core::monitor::ClipboardMonitor;
pub use crate::core::pasteboard::{FrontmostApp, Pasteboard};
pub use crate::core::poller::{PasteboardPoller, PollerState, TickOutcome};
pub use crate::error::{ClipError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::entry::ClipboardEntry;
    pub use crate::core::history::{HistoryListener, HistoryStore};
    pub use crate::core::monitor::ClipboardMonitor;
    pub use crate::core::pasteboard::{copy_back, FrontmostApp, Pasteboard};
    pub use crate::utils::TextTransform;

    #[cfg(target_os = "macos")]
    pub use crate::core::macos::{GeneralPasteboard, WorkspaceFrontmostApp};
}
