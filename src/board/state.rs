//! Board representation and the transition function.
//!
//! A `Board` is a plain `Copy` value: nine cells in row-major order. Every
//! transition produces a fresh board, so sibling search branches never share
//! state.

use std::fmt;

use super::cell::{Cell, Player};
use super::moves::{Move, BOARD_SIZE, CELL_COUNT};

/// Returned by [`apply_move`] when the target cell is already marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid move {mv}: cell is occupied by {occupant:?}")]
pub struct InvalidMove {
    pub mv: Move,
    pub occupant: Player,
}

/// A 3x3 tic-tac-toe position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Builds a board from row-major cells without checking mark counts.
    pub const fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Board { cells }
    }

    /// Returns the cell at a coordinate.
    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.index()]
    }

    /// Returns a copy with `mv` set to `cell`, whatever it held before.
    ///
    /// Callers holding a move from `legal_moves` use this in place of
    /// [`apply_move`], since the target is known to be empty.
    pub(crate) fn with_cell(mut self, mv: Move, cell: Cell) -> Board {
        self.cells[mv.index()] = cell;
        self
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Number of cells holding the given mark.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn empty_count(&self) -> usize {
        self.count(Cell::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Whether the mark counts are consistent with alternating play from X.
    pub fn is_balanced(&self) -> bool {
        let x = self.count(Cell::X);
        let o = self.count(Cell::O);
        x == o || x == o + 1
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(BOARD_SIZE) {
            for cell in row {
                write!(f, "{} ", cell.notation_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Returns the starting position: an empty board with X to move.
pub const fn initial_state() -> Board {
    Board::empty()
}

/// Returns the player whose turn it is.
///
/// X moves whenever the mark counts are equal; O moves when X has one more.
pub fn current_player(board: &Board) -> Player {
    if board.count(Cell::X) > board.count(Cell::O) {
        Player::O
    } else {
        Player::X
    }
}

/// Returns the board after the player to move marks `mv`.
///
/// The input board is left untouched.
pub fn apply_move(board: &Board, mv: Move) -> Result<Board, InvalidMove> {
    if let Some(occupant) = board.get(mv).owner() {
        return Err(InvalidMove { mv, occupant });
    }
    Ok(board.with_cell(mv, current_player(board).mark()))
}
