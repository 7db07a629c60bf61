// src/core/entry.rs
//! The captured clipboard snapshot

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source name recorded when no frontmost application could be determined
pub const UNKNOWN_SOURCE_APP: &str = "Unknown";

/// One captured clipboard snapshot.
///
/// Entries are created once by the poller and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub id: Uuid,
    pub content: String,
    pub source_app: String,
    pub captured_at: DateTime<Local>,
}

impl ClipboardEntry {
    /// Build an entry stamped with the current time.
    ///
    /// Returns `None` for empty content. A missing source application is
    /// recorded as [`UNKNOWN_SOURCE_APP`].
    pub fn capture(content: impl Into<String>, source_app: Option<String>) -> Option<Self> {
        Self::capture_at(content, source_app, Local::now())
    }

    pub fn capture_at(
        content: impl Into<String>,
        source_app: Option<String>,
        captured_at: DateTime<Local>,
    ) -> Option<Self> {
        let content = content.into();
        if content.is_empty() {
            return None;
        }

        let source_app = source_app
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SOURCE_APP.to_string());

        Some(Self {
            id: Uuid::new_v4(),
            content,
            source_app,
            captured_at,
        })
    }

    /// Unicode-safe preview of the content, single line, at most `max_chars`
    /// characters followed by `...` when truncated.
    pub fn preview(&self, max_chars: usize) -> String {
        let flattened: String = self
            .content
            .chars()
            .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
            .collect();
        safe_truncate(&flattened, max_chars)
    }
}

impl fmt::Display for ClipboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.preview(60),
            self.source_app,
            self.captured_at.format("%H:%M:%S")
        )
    }
}

/// Safe Unicode-aware string truncation
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect::<String>() + "..."
    }
}
