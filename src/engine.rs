//! Engine state management.
//!
//! Holds the current board position and thread count between protocol
//! commands, and runs the search for the `go` command.

use std::io::{self, Write};
use std::time::Instant;

use tracing::warn;

use crate::board::{apply_move, current_player, initial_state, Board, InvalidMove, Move};
use crate::eval::{status, winning_line, GameStatus};
use crate::protocol::notation::{encode_board, format_move, parse_board, NotationError};
use crate::protocol::parser::THREADS_OPTION;
use crate::search::{search, search_with_threads, SearchResult};

/// Default number of search threads.
const DEFAULT_THREADS: usize = 1;

/// Upper bound on search threads: one per root move is all that can be used.
const MAX_THREADS: usize = 9;

/// Errors raised while updating the engine position.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("failed to parse board: {0}")]
    Notation(#[from] NotationError),

    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub position: Board,
    threads: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new engine on the empty board.
    pub fn new() -> Self {
        Engine {
            position: initial_state(),
            threads: DEFAULT_THREADS,
        }
    }

    /// Resets the position for a new game. The thread count is kept.
    pub fn new_game(&mut self) {
        self.position = initial_state();
    }

    /// Sets the position from notation followed by a list of moves.
    ///
    /// On error the previous position is left untouched.
    pub fn set_position(&mut self, board: &str, moves: &[Move]) -> Result<(), EngineError> {
        let mut position = parse_board(board)?;
        for &mv in moves {
            position = apply_move(&position, mv)?;
        }
        self.position = position;
        Ok(())
    }

    /// Applies one move to the current position.
    pub fn play(&mut self, mv: Move) -> Result<(), InvalidMove> {
        self.position = apply_move(&self.position, mv)?;
        Ok(())
    }

    /// Sets the search thread count, clamped to `1..=9`.
    pub fn set_threads(&mut self, threads: usize) {
        let clamped = threads.clamp(1, MAX_THREADS);
        if clamped != threads {
            warn!(requested = threads, using = clamped, "Threads out of range");
        }
        self.threads = clamped;
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Handles the handshake: writes id, options, protocol_version, and oxook.
    pub fn handle_oxo<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name noughts")?;
        writeln!(out, "id author noughts")?;
        writeln!(
            out,
            "option name {} type spin default {} min 1 max {}",
            THREADS_OPTION, DEFAULT_THREADS, MAX_THREADS
        )?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "oxook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `d` command: board notation, side to move, and status.
    ///
    /// A won position also gets a `line` with the three winning cells.
    pub fn handle_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let board = &self.position;
        write!(out, "{}", board)?;
        writeln!(out, "board {}", encode_board(board))?;
        writeln!(out, "tomove {}", current_player(board).notation_char())?;
        match status(board) {
            GameStatus::Ongoing => writeln!(out, "status ongoing")?,
            GameStatus::Draw => writeln!(out, "status draw")?,
            GameStatus::Won(p) => writeln!(out, "status winner {}", p.notation_char())?,
        }
        if let Some([a, b, c]) = winning_line(board) {
            writeln!(out, "line {} {} {}", a, b, c)?;
        }
        out.flush()
    }

    /// Runs the search on the current position with the configured threads.
    pub fn think(&self) -> SearchResult {
        match search_with_threads(&self.position, self.threads()) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "failed to build search pool, searching on one thread");
                search(&self.position)
            }
        }
    }

    /// Handles the `go` command: an `info` line followed by `bestmove`.
    pub fn handle_go<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let start = Instant::now();
        let result = self.think();
        let elapsed_ms = start.elapsed().as_millis();

        writeln!(
            out,
            "info nodes {} score {} time {}",
            result.nodes, result.value, elapsed_ms
        )?;
        writeln!(out, "bestmove {}", format_move(result.best_move))?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Player};

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    fn output_of(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_starts_empty() {
        let engine = Engine::new();
        assert_eq!(engine.position, initial_state());
        assert_eq!(engine.threads(), 1);
    }

    #[test]
    fn set_position_with_moves() {
        let mut engine = Engine::new();
        engine.set_position("startpos", &[mv(1, 1), mv(0, 0)]).unwrap();
        assert_eq!(engine.position.get(mv(1, 1)), Cell::X);
        assert_eq!(engine.position.get(mv(0, 0)), Cell::O);
        assert_eq!(current_player(&engine.position), Player::X);
    }

    #[test]
    fn set_position_invalid_keeps_previous() {
        let mut engine = Engine::new();
        engine.play(mv(1, 1)).unwrap();
        let before = engine.position;

        let err = engine.set_position("garbage", &[]).unwrap_err();
        assert!(matches!(err, EngineError::Notation(_)));
        assert_eq!(engine.position, before);

        let err = engine.set_position("startpos", &[mv(0, 0), mv(0, 0)]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidMove(_)));
        assert_eq!(engine.position, before);
    }

    #[test]
    fn play_rejects_occupied_cell() {
        let mut engine = Engine::new();
        engine.play(mv(2, 2)).unwrap();
        let before = engine.position;
        assert!(engine.play(mv(2, 2)).is_err());
        assert_eq!(engine.position, before);
    }

    #[test]
    fn new_game_resets_position_keeps_threads() {
        let mut engine = Engine::new();
        engine.set_threads(4);
        engine.play(mv(0, 0)).unwrap();
        engine.new_game();
        assert_eq!(engine.position, initial_state());
        assert_eq!(engine.threads(), 4);
    }

    #[test]
    fn threads_option_is_clamped() {
        let mut engine = Engine::new();
        engine.set_threads(64);
        assert_eq!(engine.threads(), 9);
        engine.set_threads(0);
        assert_eq!(engine.threads(), 1);
        engine.set_threads(3);
        assert_eq!(engine.threads(), 3);
    }

    #[test]
    fn handle_go_finds_winning_move() {
        let mut engine = Engine::new();
        engine.set_position("XX./OO./...", &[]).unwrap();
        let text = output_of(|out| engine.handle_go(out));
        assert!(text.lines().any(|l| l.starts_with("info nodes ") && l.contains("score 1")));
        assert!(text.lines().any(|l| l == "bestmove 0,2"), "output: {}", text);
    }

    #[test]
    fn handle_go_parallel_matches_sequential() {
        let mut engine = Engine::new();
        engine.set_position("X../.O./...", &[]).unwrap();
        let seq = output_of(|out| engine.handle_go(out));
        engine.set_threads(4);
        let par = output_of(|out| engine.handle_go(out));
        let best = |s: &str| s.lines().find(|l| l.starts_with("bestmove")).map(str::to_string);
        assert_eq!(best(&seq), best(&par));
    }

    #[test]
    fn handle_go_on_finished_game_reports_none() {
        let mut engine = Engine::new();
        engine.set_position("XXX/OO./...", &[]).unwrap();
        let text = output_of(|out| engine.handle_go(out));
        assert!(text.lines().any(|l| l == "bestmove none"));
    }

    #[test]
    fn handle_oxo_outputs_handshake() {
        let engine = Engine::new();
        let text = output_of(|out| engine.handle_oxo(out));
        assert!(text.contains("id name noughts"));
        assert!(text.contains("option name Threads type spin"));
        assert!(text.contains("protocol_version 1"));
        assert_eq!(text.lines().last(), Some("oxook"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        assert_eq!(output_of(|out| engine.handle_isready(out)).trim(), "readyok");
    }

    #[test]
    fn handle_display_reports_status() {
        let mut engine = Engine::new();
        engine.set_position("XXX/OO./...", &[]).unwrap();
        let text = output_of(|out| engine.handle_display(out));
        assert!(text.lines().any(|l| l == "board XXX/OO./..."));
        assert!(text.lines().any(|l| l == "tomove O"));
        assert!(text.lines().any(|l| l == "status winner X"));
        assert!(text.lines().any(|l| l == "line 0,0 0,1 0,2"));
    }

    #[test]
    fn handle_display_has_no_line_without_a_winner() {
        let mut engine = Engine::new();
        engine.set_position("XOX/XOO/OXX", &[]).unwrap();
        let text = output_of(|out| engine.handle_display(out));
        assert!(text.lines().any(|l| l == "status draw"));
        assert!(!text.lines().any(|l| l.starts_with("line ")));

        engine.new_game();
        let text = output_of(|out| engine.handle_display(out));
        assert!(text.lines().any(|l| l == "tomove X"));
        assert!(text.lines().any(|l| l == "status ongoing"));
        assert!(!text.lines().any(|l| l.starts_with("line ")));
    }
}
