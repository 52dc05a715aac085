//! Players and cell marks.
//!
//! A cell is either empty or holds the mark of one of the two players.
//! X always moves first on an empty board.

use serde::{Deserialize, Serialize};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the mark this player places.
    pub const fn mark(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Returns the single-character notation for this player.
    pub const fn notation_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    /// Parses a player from its notation character (case-insensitive).
    pub fn from_notation_char(c: char) -> Option<Player> {
        match c {
            'X' | 'x' => Some(Player::X),
            'O' | 'o' => Some(Player::O),
            _ => None,
        }
    }
}

/// The contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// Returns the player owning this mark, or None for an empty cell.
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the notation character: `X`, `O`, or `.` for empty.
    pub const fn notation_char(self) -> char {
        match self.owner() {
            Some(player) => player.notation_char(),
            None => '.',
        }
    }

    /// Parses a cell from its notation character.
    pub fn from_notation_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            other => Player::from_notation_char(other).map(Player::mark),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involution() {
        for p in [Player::X, Player::O] {
            assert_ne!(p.opponent(), p);
            assert_eq!(p.opponent().opponent(), p);
        }
    }

    #[test]
    fn mark_and_owner_agree() {
        for p in [Player::X, Player::O] {
            assert_eq!(p.mark().owner(), Some(p));
        }
        assert_eq!(Cell::Empty.owner(), None);
    }

    #[test]
    fn cell_notation_roundtrip() {
        for c in [Cell::Empty, Cell::X, Cell::O] {
            assert_eq!(Cell::from_notation_char(c.notation_char()), Some(c));
        }
        assert_eq!(Cell::from_notation_char('x'), Some(Cell::X));
        assert_eq!(Cell::from_notation_char('-'), None);
    }

    #[test]
    fn player_notation_matches_mark() {
        for p in [Player::X, Player::O] {
            assert_eq!(p.notation_char(), p.mark().notation_char());
            assert_eq!(Player::from_notation_char(p.notation_char()), Some(p));
        }
        assert_eq!(Player::from_notation_char('.'), None);
    }
}
