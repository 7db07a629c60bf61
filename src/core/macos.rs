// src/core/macos.rs
//! AppKit-backed pasteboard and frontmost application queries

use objc2::rc::Retained;
use objc2_app_kit::{NSPasteboard, NSPasteboardTypeString, NSWorkspace};
use objc2_foundation::NSString;
use tracing::trace;

use crate::core::pasteboard::{FrontmostApp, Pasteboard};
use crate::error::{ClipError, Result};

/// `NSPasteboard.generalPasteboard`, plain text only
pub struct GeneralPasteboard {
    pasteboard: Retained<NSPasteboard>,
}

impl GeneralPasteboard {
    pub fn new() -> Self {
        let pasteboard = unsafe { NSPasteboard::generalPasteboard() };
        Self { pasteboard }
    }
}

impl Default for GeneralPasteboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Pasteboard for GeneralPasteboard {
    fn change_count(&self) -> isize {
        unsafe { self.pasteboard.changeCount() }
    }

    fn read_text(&self) -> Option<String> {
        unsafe {
            self.pasteboard
                .stringForType(NSPasteboardTypeString)
                .map(|s| s.to_string())
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let string = NSString::from_str(text);
        let written = unsafe {
            self.pasteboard.clearContents();
            self.pasteboard
                .setString_forType(&string, NSPasteboardTypeString)
        };
        if written {
            Ok(())
        } else {
            Err(ClipError::WriteRejected)
        }
    }
}

/// `NSWorkspace.frontmostApplication.localizedName`
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkspaceFrontmostApp;

impl FrontmostApp for WorkspaceFrontmostApp {
    fn frontmost_app_name(&self) -> Option<String> {
        unsafe {
            let workspace = NSWorkspace::sharedWorkspace();
            let name = workspace
                .frontmostApplication()
                .and_then(|app| app.localizedName())
                .map(|n| n.to_string());
            trace!(?name, "frontmost application");
            name
        }
    }
}
