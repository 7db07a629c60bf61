// src/console.rs
//! Line commands for browsing the history from a terminal
//!
//! The console stands in for a popover: it lists and searches entries, copies
//! one back (optionally transformed) and clears the history. Positions are
//! 1-based and always refer to the full history, so a position printed by
//! `search` can be passed straight to `copy`.

use std::str::FromStr;

use crate::core::entry::ClipboardEntry;
use crate::core::monitor::ClipboardMonitor;
use crate::core::pasteboard::{FrontmostApp, Pasteboard};
use crate::error::{ClipError, Result};
use crate::utils::TextTransform;

pub const HELP: &str = "\
commands:
  list                      show the whole history
  search <text>             show entries containing <text> (case-insensitive)
  copy <n> [transform]      copy entry <n> back; transform = trim | lowercase | capitalize | url
  clear                     forget every entry
  help                      show this message
  quit                      stop monitoring and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Search(String),
    Copy {
        position: usize,
        transform: Option<TextTransform>,
    },
    Clear,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ClipError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" | "list" | "ls" => Ok(ConsoleCommand::List),
            "search" | "find" | "/" => {
                if rest.is_empty() {
                    return Err(ClipError::MissingArgument {
                        command: "search",
                        expected: "the text to look for",
                    });
                }
                Ok(ConsoleCommand::Search(rest.to_string()))
            }
            "copy" | "cp" => {
                let mut args = rest.split_whitespace();
                let position = args
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .filter(|n| *n > 0)
                    .ok_or(ClipError::MissingArgument {
                        command: "copy",
                        expected: "an entry position (1, 2, ...)",
                    })?;
                let transform: Option<TextTransform> =
                    args.next().map(str::parse).transpose()?;
                Ok(ConsoleCommand::Copy {
                    position,
                    transform,
                })
            }
            "clear" => Ok(ConsoleCommand::Clear),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
            other => Err(ClipError::UnknownCommand(other.to_string())),
        }
    }
}

/// Result of running a console command
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleReply {
    /// `(position, entry)` pairs, position 1-based in the full history
    Listing(Vec<(usize, ClipboardEntry)>),
    Copied {
        position: usize,
        text: String,
    },
    Cleared,
    Help,
    Quit,
}

pub fn execute<P: Pasteboard, A: FrontmostApp>(
    monitor: &mut ClipboardMonitor<P, A>,
    command: ConsoleCommand,
) -> Result<ConsoleReply> {
    match command {
        ConsoleCommand::List => Ok(ConsoleReply::Listing(listing(monitor, ""))),
        ConsoleCommand::Search(text) => Ok(ConsoleReply::Listing(listing(monitor, &text))),
        ConsoleCommand::Copy {
            position,
            transform,
        } => {
            let text = monitor.copy_entry(position - 1, transform)?;
            Ok(ConsoleReply::Copied { position, text })
        }
        ConsoleCommand::Clear => {
            monitor.clear_history();
            Ok(ConsoleReply::Cleared)
        }
        ConsoleCommand::Help => Ok(ConsoleReply::Help),
        ConsoleCommand::Quit => {
            monitor.stop();
            Ok(ConsoleReply::Quit)
        }
    }
}

fn listing<P: Pasteboard, A: FrontmostApp>(
    monitor: &ClipboardMonitor<P, A>,
    search_text: &str,
) -> Vec<(usize, ClipboardEntry)> {
    let history = monitor.history();
    let matches = history.query(search_text);
    history
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| matches.iter().any(|m| m.id == e.id))
        .map(|(i, e)| (i + 1, e.clone()))
        .collect()
}
