// src/config.rs
//! Monitor configuration

use std::time::Duration;

/// Pasteboard sampling period. Fixed, not exposed on the command line.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub poll_interval: Duration,
    /// Characters of content shown per entry in console listings
    pub preview_chars: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            preview_chars: 80,
        }
    }
}

impl MonitorConfig {
    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_polls_every_second() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.preview_chars, 80);
    }

    #[test]
    fn test_preview_chars_never_zero() {
        assert_eq!(MonitorConfig::default().with_preview_chars(0).preview_chars, 1);
    }
}
