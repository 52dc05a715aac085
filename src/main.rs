//! noughts -- a tic-tac-toe engine speaking a line-oriented protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to adjust.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use noughts::engine::Engine;
use noughts::protocol::parser::{parse_command, Command};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = line?;

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };
        debug!(?cmd, "received");

        match cmd {
            Command::Oxo => engine.handle_oxo(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetThreads(threads) => engine.set_threads(threads),
            Command::NewGame => engine.new_game(),
            Command::Position { board, moves } => {
                if let Err(e) = engine.set_position(&board, &moves) {
                    warn!(error = %e, "position rejected");
                }
            }
            Command::Play { mv } => {
                if let Err(e) = engine.play(mv) {
                    warn!(error = %e, "move rejected");
                    writeln!(out, "illegal {}", mv)?;
                    out.flush()?;
                }
            }
            Command::Display => engine.handle_display(&mut out)?,
            Command::Go => engine.handle_go(&mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        warn!(error = %e, "i/o failure, shutting down");
        std::process::exit(1);
    }
}
