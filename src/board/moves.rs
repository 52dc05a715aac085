//! Move coordinates.
//!
//! A move names a single cell by zero-indexed row and column. Moves order
//! row-major, which fixes the enumeration order used by the search.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Returned when a deserialized move names a cell off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("move {row},{col} is off the board")]
pub struct OffBoard {
    pub row: usize,
    pub col: usize,
}

/// A cell coordinate `(row, col)`, each in `0..3`.
///
/// Deserialization goes through [`Move::new`], so a decoded move is always
/// on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawMove")]
pub struct Move {
    row: u8,
    col: u8,
}

/// Wire shape of a move before the range check.
#[derive(Deserialize)]
struct RawMove {
    row: usize,
    col: usize,
}

impl TryFrom<RawMove> for Move {
    type Error = OffBoard;

    fn try_from(raw: RawMove) -> Result<Self, Self::Error> {
        Move::new(raw.row, raw.col).ok_or(OffBoard {
            row: raw.row,
            col: raw.col,
        })
    }
}

impl Move {
    /// Creates a move, or None if either coordinate is off the board.
    pub fn new(row: usize, col: usize) -> Option<Move> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Move {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Creates a move from a row-major cell index in `0..9`.
    pub fn from_index(idx: usize) -> Option<Move> {
        if idx < CELL_COUNT {
            Move::new(idx / BOARD_SIZE, idx % BOARD_SIZE)
        } else {
            None
        }
    }

    pub const fn row(self) -> usize {
        self.row as usize
    }

    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index of the target cell.
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }
}

/// Every cell coordinate in row-major order.
pub fn all_moves() -> impl Iterator<Item = Move> {
    (0..CELL_COUNT).filter_map(Move::from_index)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_off_board() {
        assert!(Move::new(2, 2).is_some());
        assert!(Move::new(3, 0).is_none());
        assert!(Move::new(0, 3).is_none());
    }

    #[test]
    fn index_matches_row_major() {
        let mv = Move::new(1, 2).unwrap();
        assert_eq!(mv.index(), 5);
        assert_eq!(Move::from_index(5), Some(mv));
        assert_eq!(Move::from_index(9), None);
    }

    #[test]
    fn ordering_is_row_major() {
        let moves: Vec<Move> = all_moves().collect();
        assert_eq!(moves.len(), CELL_COUNT);
        assert!(moves.windows(2).all(|w| w[0] < w[1]));
        assert!(Move::new(0, 2).unwrap() < Move::new(1, 0).unwrap());
    }

    #[test]
    fn deserialize_accepts_on_board_moves() {
        let mv: Move = serde_json::from_str(r#"{"row":2,"col":1}"#).unwrap();
        assert_eq!(mv, Move::new(2, 1).unwrap());
        assert_eq!(serde_json::to_string(&mv).unwrap(), r#"{"row":2,"col":1}"#);
    }

    #[test]
    fn deserialize_rejects_off_board_moves() {
        assert!(serde_json::from_str::<Move>(r#"{"row":3,"col":0}"#).is_err());
        assert!(serde_json::from_str::<Move>(r#"{"row":0,"col":3}"#).is_err());
        let err = serde_json::from_str::<Move>(r#"{"row":7,"col":7}"#).unwrap_err();
        assert!(err.to_string().contains("7,7 is off the board"));
        assert!(serde_json::from_str::<Move>(r#"{"row":-1,"col":0}"#).is_err());
    }

    #[test]
    fn display_is_row_comma_col() {
        assert_eq!(Move::new(2, 0).unwrap().to_string(), "2,0");
    }
}
