//! shortcut-engine binary.
//!
//! Reads JSONL commands from stdin, dispatches them against the built-in
//! command table and prints one JSON result per line.

mod demo_commands;
mod stdin_commands;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use shortcut_engine::config::{self, Config};
use shortcut_engine::logging;
use shortcut_engine::shortcuts::{Dispatcher, LazyRegistry, Platform, SuspensionPolicy};

use stdin_commands::{handle_command, SessionState, StdinCommand};

static SHORTCUTS: LazyRegistry = LazyRegistry::new(demo_commands::commands);

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "shortcut-engine")]
#[command(about = "Resolve key presses and gestures to commands")]
struct Args {
    /// Config file (default: ~/.config/shortcut-engine/config.json)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use Apple-style labels ("Command") regardless of platform
    #[arg(long)]
    apple_labels: bool,

    /// Report shadowed bindings and exit
    #[arg(long)]
    check: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path),
        None => config::load_default_config(),
    };
    if args.apple_labels {
        config.apple_labels = Some(true);
    }

    let _guard = logging::init(&config.log_settings());
    info!(event_type = "app_lifecycle", action = "started", "shortcut-engine starting");

    let result = if args.check {
        check()
    } else {
        run(&config)
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "shortcut-engine failed");
            ExitCode::FAILURE
        }
    }
}

/// Print every shadowed binding; fails when there is at least one.
fn check() -> anyhow::Result<ExitCode> {
    let conflicts = SHORTCUTS.get().find_conflicts();
    let mut stdout = io::stdout().lock();
    for conflict in &conflicts {
        warn!(
            winner = %conflict.winner_id,
            loser = %conflict.loser_id,
            pattern = %conflict.pattern,
            "Unreachable binding"
        );
        writeln!(
            stdout,
            "{:?} {}: '{}' is shadowed by '{}'",
            conflict.kind, conflict.pattern, conflict.loser_id, conflict.winner_id
        )?;
    }

    if conflicts.is_empty() {
        writeln!(stdout, "{} commands, no conflicts", SHORTCUTS.get().len())?;
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn run(config: &Config) -> anyhow::Result<ExitCode> {
    let platform = config.label_platform(Platform::current());
    let session = SessionState::default();
    let dispatcher =
        Dispatcher::new(SHORTCUTS.get(), &session).with_policy(SuspensionPolicy::from_config(config));

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<StdinCommand>(trimmed) {
            Ok(command) => {
                info!(event_type = "stdin_command", command = ?command, "Received command");
                handle_command(command, &dispatcher, &session, platform)
            }
            Err(e) => {
                warn!(error = %e, line = trimmed, "Failed to parse stdin command");
                serde_json::json!({ "error": format!("invalid command: {}", e) })
            }
        };

        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }

    info!(event_type = "app_lifecycle", action = "stopped", "stdin closed");
    Ok(ExitCode::SUCCESS)
}
