// src/core/mod.rs
pub mod entry;
pub mod history;
pub mod monitor;
pub mod pasteboard;
pub mod poller;

#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "macos")]
pub mod run_loop;
