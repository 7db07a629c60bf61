// src/bin/pasteboard_probe.rs
//! Samples the general pasteboard a few times and prints each detected change

use anyhow::Result;

#[cfg(target_os = "macos")]
fn main() -> Result<()> {
    use std::thread;
    use std::time::Duration;

    use clip_context::core::history::HistoryStore;
    use clip_context::core::macos::{GeneralPasteboard, WorkspaceFrontmostApp};
    use clip_context::core::pasteboard::Pasteboard;
    use clip_context::core::poller::{PasteboardPoller, TickOutcome};

    println!("🚀 PASTEBOARD PROBE");
    println!("===================");
    println!("📋 Copy some text in another application during the next 5 seconds...");

    let mut poller = PasteboardPoller::new(GeneralPasteboard::new(), WorkspaceFrontmostApp);
    let mut history = HistoryStore::new();
    println!("🔍 Starting change count: {}", poller.pasteboard().change_count());

    for cycle in 1..=10 {
        match poller.tick(&mut history) {
            TickOutcome::Recorded(entry) => {
                println!("🎉 [{}] change #{}", cycle, poller.state().last_seen_change_count);
                println!("   📱 Source app: {}", entry.source_app);
                println!("   📝 Content: \"{}\"", entry.preview(100));
            }
            TickOutcome::Duplicate => println!("♻️  [{}] already in history", cycle),
            TickOutcome::NoText => println!("📦 [{}] change without text", cycle),
            TickOutcome::Unchanged => {}
        }
        thread::sleep(Duration::from_millis(500));
    }

    println!("✅ Probe complete: {} distinct entries", history.len());
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn main() -> Result<()> {
    anyhow::bail!("pasteboard-probe only runs on macOS")
}
