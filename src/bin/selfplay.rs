//! Self-play game generation CLI.
//!
//! Plays tic-tac-toe games between the engine and an opponent and outputs
//! the game records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N          Number of games to play (default: 10)
//!   --opponent NAME    Opponent: random or optimal (default: random)
//!   --threads N        Number of parallel threads (default: 4)
//!   --seed N           Random seed, 0 for entropy (default: 0)
//!   --output FILE      Output file path (default: stdout)
//!   --quiet            Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing::info;
use tracing_subscriber::EnvFilter;

use noughts::selfplay::{self, Opponent, SelfPlayConfig};

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

/// Parses the value following a flag, exiting with usage on failure.
fn flag_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = flag_value(&args, i, "--games");
            }
            "--opponent" => {
                i += 1;
                let name: String = flag_value(&args, i, "--opponent");
                config.opponent = match Opponent::from_name(&name) {
                    Some(o) => o,
                    None => {
                        eprintln!("unknown opponent: {}", name);
                        print_usage();
                        process::exit(1);
                    }
                };
            }
            "--threads" => {
                i += 1;
                config.threads = flag_value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = flag_value(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    init_tracing(config.quiet);
    info!(
        games = config.num_games,
        opponent = ?config.opponent,
        threads = config.threads,
        seed = config.seed,
        "starting self-play"
    );

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            eprintln!("failed to start worker pool: {}", e);
            process::exit(1);
        }
    };
    info!(
        "Completed {} games in {:.2}s",
        games.len(),
        start.elapsed().as_secs_f64()
    );

    if !config.quiet {
        eprintln!("{}", selfplay::summarize(&games));
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => selfplay::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }
    if let Some(path) = output_path {
        info!("Wrote {} games to {}", games.len(), path);
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N          Number of games to play (default: 10)");
    eprintln!("  --opponent NAME    Opponent: random or optimal (default: random)");
    eprintln!("  --threads N        Number of parallel threads (default: 4)");
    eprintln!("  --seed N           Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE      Output file path (default: stdout)");
    eprintln!("  --quiet            Suppress progress and summary output");
    eprintln!("  --help             Show this help");
}
