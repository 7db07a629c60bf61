// src/error.rs
//! Error type for the fallible edges of the monitor.
//!
//! The polling core itself never fails: a pasteboard without text, a missing
//! frontmost application or a text without a URL are all "nothing to do".
//! Only pasteboard writes, main-thread checks and console input can go wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipError {
    #[error("pasteboard rejected the write")]
    WriteRejected,

    #[error("no history entry at position {0}")]
    NoSuchEntry(usize),

    #[error("the pasteboard monitor must run on the main thread")]
    NotMainThread,

    #[error("unknown transform `{0}` (expected trim, lowercase, capitalize or url)")]
    UnknownTransform(String),

    #[error("unknown command `{0}`, type `help` for the command list")]
    UnknownCommand(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ClipError>;
