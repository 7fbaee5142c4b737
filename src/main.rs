//! CLI entry point for servcon.
//!
//! Wires the console core to a minimal built-in dispatcher. A real deployment
//! replaces `dispatch` with the server's command processor and keeps a clone
//! of the renderer handle as its log sink.

mod cli;

use clap::Parser;
use servcon::build_info;
use servcon::config::{load_config, Config};
use servcon::console::{
    stop_channel, HistoryBuffer, LineEditor, LogFile, OutputRenderer, Session, StopHandle,
    StopReason,
};
use servcon::error::ConsoleError;
use std::io::{self, Write};

fn main() {
    let args = cli::Args::parse();
    match run(args) {
        Ok(StopReason::Stopped) => {}
        Ok(StopReason::FatalError) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(args: cli::Args) -> Result<StopReason, ConsoleError> {
    let mut config = load_config(args.config.as_deref())?;
    if args.no_color {
        config.console.colours = false;
    }
    if let Some(path) = args.log_file {
        config.log.file = path;
    }

    // A log file we cannot open degrades to terminal-only output.
    let log = match LogFile::open(&config.log.file) {
        Ok(log) => Some(log),
        Err(err) => {
            eprintln!(
                "warning: cannot open log file {}: {err}",
                config.log.file.display()
            );
            None
        }
    };

    let mut history = HistoryBuffer::new(config.console.history_capacity);
    if let Some(path) = &config.console.history_file {
        if let Err(err) = history.load_file(path) {
            eprintln!("warning: cannot load history {}: {err}", path.display());
        }
    }

    let renderer = OutputRenderer::new(
        io::stdout(),
        config.console.char_limit,
        config.console.colours,
        log,
    );
    let (stop, stop_rx) = stop_channel();
    let mut session = Session::new(LineEditor::new(history), renderer.clone(), stop_rx);

    renderer.info(&build_info::startup_metadata_line())?;
    renderer.info("&7Type &Fhelp&7 for commands; &Fstop&7 closes the console.")?;

    let reason = session.run(|line| dispatch(line, &renderer, &stop))?;

    save_history(&config, &session);
    Ok(reason)
}

/// Minimal built-in command processor.
///
/// The console core never interprets lines; this stands in for the external
/// server until one is attached.
fn dispatch<W: Write>(line: &str, renderer: &OutputRenderer<W>, stop: &StopHandle) {
    let written = match line.trim() {
        "" => Ok(()),
        "stop" | "exit" => {
            let written = renderer.info("Server stopped - closing console");
            stop.stop(StopReason::Stopped);
            written
        }
        "help" => renderer.info("&FCommands:&S help, stop"),
        other => renderer.warn(&format!("&CUnknown command: &F{other}")),
    };
    // A broken terminal surfaces on the loop's next write; nothing to do here.
    let _ = written;
}

fn save_history<W: Write>(config: &Config, session: &Session<W>) {
    let Some(path) = &config.console.history_file else {
        return;
    };
    if let Err(err) = session.history().save_file(path) {
        eprintln!("warning: cannot save history {}: {err}", path.display());
    }
}
