//! Board and move notation.
//!
//! A board is written as a single token: three rows separated by `/`, each of
//! three characters from `X`, `O` and `.` (empty), top row first. The literal
//! `startpos` stands for the empty board.
//!
//! Example: `XO./.X./..O`
//!
//! Moves are written `<row>,<col>` with zero-based coordinates, e.g. `1,1`
//! for the centre. `none` stands for the absence of a move.

use crate::board::{initial_state, Board, Cell, Move, BOARD_SIZE, CELL_COUNT};

/// Token naming the empty starting board.
pub const STARTPOS: &str = "startpos";

/// Token written when there is no move to report.
pub const NO_MOVE: &str = "none";

/// Errors that can occur when parsing board or move notation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("expected 3 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {len} cells, expected 3")]
    WrongRowLength { row: usize, len: usize },

    #[error("invalid cell character: '{0}'")]
    InvalidCell(char),

    #[error("unreachable mark counts: {x} X and {o} O")]
    UnbalancedMarks { x: usize, o: usize },

    #[error("invalid move: '{0}'")]
    InvalidMove(String),
}

/// Parses a board from notation (or `startpos`).
///
/// Rejects boards whose mark counts could not arise from alternating play
/// starting with X.
pub fn parse_board(s: &str) -> Result<Board, NotationError> {
    let s = s.trim();
    if s == STARTPOS {
        return Ok(initial_state());
    }

    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != BOARD_SIZE {
        return Err(NotationError::WrongRowCount(rows.len()));
    }

    let mut cells = [Cell::Empty; CELL_COUNT];
    for (r, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != BOARD_SIZE {
            return Err(NotationError::WrongRowLength { row: r, len });
        }
        for (c, ch) in row.chars().enumerate() {
            cells[r * BOARD_SIZE + c] =
                Cell::from_notation_char(ch).ok_or(NotationError::InvalidCell(ch))?;
        }
    }

    let board = Board::from_cells(cells);
    if !board.is_balanced() {
        return Err(NotationError::UnbalancedMarks {
            x: board.count(Cell::X),
            o: board.count(Cell::O),
        });
    }
    Ok(board)
}

/// Encodes a board as notation.
pub fn encode_board(board: &Board) -> String {
    let mut out = String::with_capacity(CELL_COUNT + BOARD_SIZE - 1);
    for (i, row) in board.cells().chunks(BOARD_SIZE).enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.extend(row.iter().map(|c| c.notation_char()));
    }
    out
}

/// Parses a `<row>,<col>` move token.
pub fn parse_move(s: &str) -> Result<Move, NotationError> {
    let invalid = || NotationError::InvalidMove(s.to_string());
    let (row, col) = s.trim().split_once(',').ok_or_else(invalid)?;
    let row: usize = row.trim().parse().map_err(|_| invalid())?;
    let col: usize = col.trim().parse().map_err(|_| invalid())?;
    Move::new(row, col).ok_or_else(invalid)
}

/// Formats an optional move, writing `none` when absent.
pub fn format_move(mv: Option<Move>) -> String {
    match mv {
        Some(mv) => mv.to_string(),
        None => NO_MOVE.to_string(),
    }
}
