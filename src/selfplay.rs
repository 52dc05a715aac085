//! Self-play game generation.
//!
//! Plays complete games between the engine and an opponent, alternating the
//! side the engine takes, and records moves and outcomes. Used to check that
//! the engine never loses and to produce JSONL game logs.

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::{apply_move, current_player, initial_state, Move, Player};
use crate::eval::{is_terminal, utility, winner};
use crate::movegen::random_move;
use crate::protocol::notation::encode_board;
use crate::search::best_move;

/// Who the engine plays against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    /// The engine itself.
    Optimal,
    /// Uniformly random legal moves.
    Random,
}

impl Opponent {
    /// Parses an opponent from its lowercase name.
    pub fn from_name(name: &str) -> Option<Opponent> {
        match name {
            "optimal" => Some(Opponent::Optimal),
            "random" => Some(Opponent::Random),
            _ => None,
        }
    }
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Opponent policy.
    pub opponent: Opponent,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            opponent: Opponent::Random,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// The side the engine played.
    pub engine_side: Player,
    pub opponent: Opponent,
    /// Moves in play order, X first.
    pub moves: Vec<Move>,
    /// Notation of the final position.
    pub final_board: String,
    pub winner: Option<Player>,
    /// Outcome from X's perspective, or None if the game stopped before a
    /// terminal position.
    pub utility: Option<i32>,
}

impl GameRecord {
    /// True if the engine's opponent won.
    pub fn engine_lost(&self) -> bool {
        matches!(self.winner, Some(w) if w != self.engine_side)
    }

    /// Short human-readable outcome.
    pub fn outcome(&self) -> String {
        match self.winner {
            Some(w) if w == self.engine_side => format!("engine ({:?}) wins", w),
            Some(w) => format!("opponent ({:?}) wins", w),
            None => "draw".to_string(),
        }
    }
}

/// Plays a single game. The engine takes X in even games and O in odd ones.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut impl Rng) -> GameRecord {
    let engine_side = if game_id % 2 == 0 { Player::X } else { Player::O };
    let mut board = initial_state();
    let mut moves = Vec::new();

    while !is_terminal(&board) {
        let side = current_player(&board);
        let chosen = if side == engine_side || config.opponent == Opponent::Optimal {
            best_move(&board)
        } else {
            random_move(&board, rng)
        };
        let Some(mv) = chosen else {
            break;
        };
        match apply_move(&board, mv) {
            Ok(next) => board = next,
            Err(e) => {
                warn!(game_id, error = %e, "self-play produced an invalid move");
                break;
            }
        }
        moves.push(mv);
    }

    let final_utility = utility(&board);
    if final_utility.is_none() {
        warn!(game_id, moves = moves.len(), "self-play game ended before a terminal position");
    }

    GameRecord {
        game_id,
        engine_side,
        opponent: config.opponent,
        moves,
        final_board: encode_board(&board),
        winner: winner(&board),
        utility: final_utility,
    }
}

fn seeded_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(
    config: &SelfPlayConfig,
) -> Result<Vec<GameRecord>, rayon::ThreadPoolBuildError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// In parallel mode games arrive in completion order, not by id.
pub fn run_self_play_with_callback<F>(
    config: &SelfPlayConfig,
    on_game: F,
) -> Result<(), rayon::ThreadPoolBuildError>
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game);
        Ok(())
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = seeded_rng(config.seed, i);
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            info!(
                "Game {}/{}: {} after {} moves ({:.1}ms)",
                i + 1,
                config.num_games,
                game.outcome(),
                game.moves.len(),
                game_start.elapsed().as_secs_f64() * 1000.0,
            );
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(
    config: &SelfPlayConfig,
    mut on_game: F,
) -> Result<(), rayon::ThreadPoolBuildError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let (tx, rx) = mpsc::channel::<GameRecord>();
    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = seeded_rng(config_clone.seed, i);
                    let game_start = Instant::now();
                    let game = play_game(&config_clone, i, &mut rng);
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        info!(
                            "Game {}/{}: {} after {} moves ({:.1}ms)",
                            n,
                            config_clone.num_games,
                            game.outcome(),
                            game.moves.len(),
                            game_start.elapsed().as_secs_f64() * 1000.0,
                        );
                    }
                    let _ = tx.send(game);
                });
        });
    });

    // Receive completed games on the calling thread and pass to callback.
    for game in rx {
        on_game(game);
    }

    if let Err(panic) = handle.join() {
        std::panic::resume_unwind(panic);
    }
    Ok(())
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results from the engine's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    pub engine_wins: usize,
    pub engine_losses: usize,
    pub draws: usize,
}

/// Tallies wins, losses and draws over a set of games.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    for game in games {
        match game.winner {
            None => summary.draws += 1,
            Some(w) if w == game.engine_side => summary.engine_wins += 1,
            Some(_) => summary.engine_losses += 1,
        }
    }
    summary
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Self-Play Summary ===")?;
        writeln!(f, "Games: {}", self.games)?;
        writeln!(f, "Engine wins: {}", self.engine_wins)?;
        writeln!(f, "Engine losses: {}", self.engine_losses)?;
        write!(f, "Draws: {}", self.draws)
    }
}
