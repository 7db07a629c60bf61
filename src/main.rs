// src/main.rs
//! Clip Context: clipboard history from the terminal
//!
//! `watch` samples the general pasteboard once a second on the main run loop
//! and prints every new text entry. While it runs, stdin accepts console
//! commands (`list`, `search`, `copy`, `clear`, `quit`) that operate on the
//! in-memory history.

#![deny(unsafe_op_in_unsafe_fn)]

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::info;

use clip_context::core::entry::ClipboardEntry;
use clip_context::core::history::HistoryListener;
use clip_context::utils::TextTransform;

/// Command line interface for clip-context
#[derive(Debug, Parser)]
#[command(
    name = "clip-context",
    version,
    about = "Clipboard history for macOS: watch, search, transform and re-copy",
    long_about = "Polls the macOS general pasteboard once a second and keeps a deduplicated, newest-first history of copied text. While watching, type `help` for the console commands."
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbosity level for logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Monitor the pasteboard and accept console commands (default)
    Watch(WatchArgs),

    /// Print what is on the pasteboard right now
    Current {
        /// Output format
        #[arg(long, default_value = "human", value_enum)]
        format: OutputFormat,
    },

    /// Transform text (or the current pasteboard text) and print the result
    Transform {
        /// Transform to apply
        #[arg(value_enum)]
        kind: TextTransform,

        /// Text to transform instead of the pasteboard contents
        #[arg(long)]
        text: Option<String>,

        /// Copy the result back to the pasteboard
        #[arg(long)]
        write: bool,
    },
}

#[derive(Debug, Clone, ClapArgs)]
struct WatchArgs {
    /// Output format for recorded entries
    #[arg(long, default_value = "human", value_enum)]
    format: OutputFormat,

    /// Do not read console commands from stdin
    #[arg(long)]
    no_console: bool,

    /// Characters of content shown per entry
    #[arg(long, default_value_t = 80)]
    preview_chars: usize,
}

impl Default for WatchArgs {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            no_console: false,
            preview_chars: 80,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// One JSON object per line
    Json,
}

/// Prints recorded entries and history changes to stdout
struct ConsoleEntryLogger {
    format: OutputFormat,
    preview_chars: usize,
}

impl ConsoleEntryLogger {
    fn new(format: OutputFormat, preview_chars: usize) -> Self {
        Self {
            format,
            preview_chars,
        }
    }

    fn print_json(value: serde_json::Value) {
        match serde_json::to_string(&value) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!("Failed to serialize event: {}", e),
        }
    }
}

impl HistoryListener for ConsoleEntryLogger {
    fn on_entry_recorded(&mut self, entry: &ClipboardEntry, history: &[ClipboardEntry]) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "📋 [{}] {}",
                    history.len(),
                    entry.preview(self.preview_chars)
                );
                println!(
                    "   From: {} at {}",
                    entry.source_app,
                    entry.captured_at.format("%H:%M:%S")
                );
            }
            OutputFormat::Json => Self::print_json(serde_json::json!({
                "event_type": "recorded",
                "history_len": history.len(),
                "entry": entry,
            })),
        }
    }

    fn on_history_cleared(&mut self) {
        match self.format {
            OutputFormat::Human => println!("🧹 History cleared"),
            OutputFormat::Json => Self::print_json(serde_json::json!({
                "event_type": "cleared",
                "timestamp": chrono::Local::now().to_rfc3339(),
            })),
        }
    }

    fn on_monitoring_started(&mut self) {
        match self.format {
            OutputFormat::Human => {
                println!("🚀 Watching the pasteboard. Type `help` for commands, Ctrl+C to quit.")
            }
            OutputFormat::Json => Self::print_json(serde_json::json!({
                "event_type": "monitoring_started",
                "timestamp": chrono::Local::now().to_rfc3339(),
            })),
        }
    }

    fn on_monitoring_stopped(&mut self) {
        match self.format {
            OutputFormat::Human => println!("🛑 Monitoring stopped"),
            OutputFormat::Json => Self::print_json(serde_json::json!({
                "event_type": "monitoring_stopped",
                "timestamp": chrono::Local::now().to_rfc3339(),
            })),
        }
    }
}

/// Set up logging based on verbosity level.
///
/// Logs go to stderr so JSON on stdout stays machine-readable.
fn setup_logging(verbose: u8) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 2)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[cfg(target_os = "macos")]
mod app {
    use anyhow::{bail, Context, Result};
    use objc2::MainThreadMarker;
    use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy};
    use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
    use tracing::{debug, info, warn};

    use clip_context::config::MonitorConfig;
    use clip_context::console::{self, ConsoleCommand, ConsoleReply, HELP};
    use clip_context::core::macos::{GeneralPasteboard, WorkspaceFrontmostApp};
    use clip_context::core::monitor::ClipboardMonitor;
    use clip_context::core::pasteboard::{copy_back, FrontmostApp, Pasteboard};
    use clip_context::core::poller::TickOutcome;
    use clip_context::core::run_loop::{run_main_loop, stop_main_run_loop, MonitorTimer};
    use clip_context::utils::TextTransform;

    use super::{ConsoleEntryLogger, OutputFormat, WatchArgs};

    type Monitor = ClipboardMonitor<GeneralPasteboard, WorkspaceFrontmostApp>;

    /// Input forwarded to the main thread
    enum ConsoleInput {
        Line(String),
        Interrupt,
    }

    /// Configure NSApplication for background operation
    fn setup_macos_context(mtm: MainThreadMarker) {
        let app = NSApplication::sharedApplication(mtm);
        app.setActivationPolicy(NSApplicationActivationPolicy::Prohibited);
        debug!("NSApplication initialized without a Dock icon");
    }

    pub async fn watch(args: WatchArgs) -> Result<()> {
        let mtm = MainThreadMarker::new()
            .context("Must run on main thread for pasteboard monitoring")?;
        setup_macos_context(mtm);

        let config = MonitorConfig::default().with_preview_chars(args.preview_chars);
        let interval = config.poll_interval;
        let preview_chars = config.preview_chars;
        let format = args.format;

        let mut monitor: Monitor = ClipboardMonitor::new(
            GeneralPasteboard::new(),
            WorkspaceFrontmostApp,
            config,
        );
        monitor.add_listener(ConsoleEntryLogger::new(format, preview_chars));

        let (tx, mut rx) = mpsc::unbounded_channel();
        if !args.no_console {
            spawn_stdin_reader(tx.clone());
        }
        spawn_interrupt_handler(tx);

        monitor.start();
        let mut timer = MonitorTimer::start(interval, move || {
            if let TickOutcome::Recorded(entry) = monitor.tick() {
                debug!(id = %entry.id, "new clipboard entry");
            }
            if drain_console(&mut monitor, &mut rx, format) {
                stop_main_run_loop();
            }
        })?;

        // Pump the CoreFoundation run loop on the main thread so the timer fires
        run_main_loop();
        timer.stop();

        info!("✅ Shutdown complete");
        Ok(())
    }

    /// Stdin is read on a plain thread: a blocking read must not hold up
    /// runtime shutdown.
    fn spawn_stdin_reader(tx: UnboundedSender<ConsoleInput>) {
        let spawned = std::thread::Builder::new()
            .name("console-stdin".into())
            .spawn(move || {
                for line in std::io::stdin().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(ConsoleInput::Line(line)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!("stdin closed: {}", e);
                            break;
                        }
                    }
                }
            });
        if let Err(e) = spawned {
            warn!("console unavailable: {}", e);
        }
    }

    fn spawn_interrupt_handler(tx: UnboundedSender<ConsoleInput>) {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = tx.send(ConsoleInput::Interrupt);
            }
        });
    }

    /// Run queued console input. Returns true once the user asked to quit.
    fn drain_console(
        monitor: &mut Monitor,
        rx: &mut UnboundedReceiver<ConsoleInput>,
        format: OutputFormat,
    ) -> bool {
        while let Ok(input) = rx.try_recv() {
            let command = match input {
                ConsoleInput::Interrupt => Ok(ConsoleCommand::Quit),
                ConsoleInput::Line(line) => line.parse::<ConsoleCommand>(),
            };
            let reply = command.and_then(|cmd| console::execute(monitor, cmd));
            match reply {
                Ok(ConsoleReply::Quit) => return true,
                Ok(reply) => print_reply(&reply, monitor.config().preview_chars, format),
                Err(e) => eprintln!("⚠️  {}", e),
            }
        }
        false
    }

    fn print_reply(reply: &ConsoleReply, preview_chars: usize, format: OutputFormat) {
        match (reply, format) {
            (ConsoleReply::Listing(items), OutputFormat::Human) => {
                if items.is_empty() {
                    println!("(no entries)");
                }
                for (position, entry) in items {
                    println!(
                        "{:>3}. {}  [{} {}]",
                        position,
                        entry.preview(preview_chars),
                        entry.source_app,
                        entry.captured_at.format("%H:%M:%S")
                    );
                }
            }
            (ConsoleReply::Listing(items), OutputFormat::Json) => {
                let rows: Vec<_> = items
                    .iter()
                    .map(|(position, entry)| {
                        serde_json::json!({ "position": position, "entry": entry })
                    })
                    .collect();
                ConsoleEntryLogger::print_json(serde_json::json!({
                    "event_type": "listing",
                    "entries": rows,
                }));
            }
            (ConsoleReply::Copied { position, text }, OutputFormat::Human) => {
                println!(
                    "✅ Copied entry {} to clipboard: {}",
                    position,
                    clip_context::core::entry::safe_truncate(text, preview_chars)
                );
            }
            (ConsoleReply::Copied { position, text }, OutputFormat::Json) => {
                ConsoleEntryLogger::print_json(serde_json::json!({
                    "event_type": "copied",
                    "position": position,
                    "text": text,
                }));
            }
            (ConsoleReply::Help, _) => println!("{}", HELP),
            // Cleared is reported by the history listener
            (ConsoleReply::Cleared, _) | (ConsoleReply::Quit, _) => {}
        }
    }

    pub fn current(format: OutputFormat) -> Result<()> {
        let pasteboard = GeneralPasteboard::new();
        let change_count = pasteboard.change_count();
        let text = pasteboard.read_text();
        let app = WorkspaceFrontmostApp.frontmost_app_name();

        match format {
            OutputFormat::Human => {
                println!("🔍 Pasteboard change count: {}", change_count);
                match &text {
                    Some(t) => println!(
                        "📝 Text ({} chars): \"{}\"",
                        t.chars().count(),
                        clip_context::core::entry::safe_truncate(t, 80)
                    ),
                    None => println!("📦 No text on the pasteboard"),
                }
                println!("📱 Frontmost app: {}", app.as_deref().unwrap_or("Unknown"));
            }
            OutputFormat::Json => ConsoleEntryLogger::print_json(serde_json::json!({
                "change_count": change_count,
                "text": text,
                "frontmost_app": app,
            })),
        }
        Ok(())
    }

    pub fn transform(kind: TextTransform, text: Option<String>, write: bool) -> Result<()> {
        let mut pasteboard = GeneralPasteboard::new();
        let source = match text {
            Some(t) => t,
            None => match pasteboard.read_text() {
                Some(t) => t,
                None => bail!("The pasteboard holds no text to transform"),
            },
        };

        let result = kind.apply(&source);
        println!("{}", result);

        if write {
            copy_back(&mut pasteboard, &result)
                .with_context(|| format!("Failed to copy {} result to the pasteboard", kind))?;
        }
        Ok(())
    }
}

#[cfg(not(target_os = "macos"))]
mod app {
    use anyhow::{bail, Result};

    use clip_context::utils::TextTransform;

    use super::{OutputFormat, WatchArgs};

    pub async fn watch(_args: WatchArgs) -> Result<()> {
        bail!("This application only runs on macOS")
    }

    pub fn current(_format: OutputFormat) -> Result<()> {
        bail!("This application only runs on macOS")
    }

    pub fn transform(kind: TextTransform, text: Option<String>, write: bool) -> Result<()> {
        match text {
            Some(t) if !write => {
                println!("{}", kind.apply(&t));
                Ok(())
            }
            _ => bail!("Reading or writing the pasteboard is only supported on macOS"),
        }
    }
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose)?;

    info!("🚀 Starting clip-context v{}", env!("CARGO_PKG_VERSION"));

    match args.command.unwrap_or(Command::Watch(WatchArgs::default())) {
        Command::Watch(watch) => app::watch(watch)
            .await
            .context("Clipboard monitor runtime error")?,
        Command::Current { format } => {
            app::current(format).context("Failed to read the pasteboard")?
        }
        Command::Transform { kind, text, write } => {
            app::transform(kind, text, write).context("Transform failed")?
        }
    }

    Ok(())
}
