//! Terminal-state evaluation.
//!
//! Detects three-in-a-row winners, the game-over condition, and the signed
//! outcome of a finished game from X's perspective.
//!
//! Lines are scanned rows first, then columns, then the two diagonals; the
//! first fully claimed line decides the winner.

use crate::board::{Board, Move, Player};

/// Utility of a game won by X.
pub const X_WIN: i32 = 1;
/// Utility of a game won by O.
pub const O_WIN: i32 = -1;
/// Utility of a drawn game.
pub const DRAW: i32 = 0;

/// Row-major cell indices of every winning line, in scan order.
pub const LINES: [[usize; 3]; 8] = [
    // rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Where a position stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Won(Player),
    Draw,
}

/// Returns the owner of a fully claimed line, if any.
fn line_owner(board: &Board, line: &[usize; 3]) -> Option<Player> {
    let cells = board.cells();
    let owner = cells[line[0]].owner()?;
    if cells[line[1]].owner() == Some(owner) && cells[line[2]].owner() == Some(owner) {
        Some(owner)
    } else {
        None
    }
}

/// Returns the player holding a complete line, if any.
pub fn winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|line| line_owner(board, line))
}

/// Returns the cells of the first winning line, if any.
pub fn winning_line(board: &Board) -> Option<[Move; 3]> {
    let line = LINES.iter().find(|line| line_owner(board, line).is_some())?;
    Some([
        Move::from_index(line[0])?,
        Move::from_index(line[1])?,
        Move::from_index(line[2])?,
    ])
}

/// True once someone has won or no empty cells remain.
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || board.is_full()
}

/// Classifies the position as ongoing, won, or drawn.
pub fn status(board: &Board) -> GameStatus {
    match winner(board) {
        Some(p) => GameStatus::Won(p),
        None if board.is_full() => GameStatus::Draw,
        None => GameStatus::Ongoing,
    }
}

/// Returns the outcome of a finished game: +1 X won, -1 O won, 0 draw.
///
/// Returns None while the game is still in progress.
pub fn utility(board: &Board) -> Option<i32> {
    match status(board) {
        GameStatus::Won(Player::X) => Some(X_WIN),
        GameStatus::Won(Player::O) => Some(O_WIN),
        GameStatus::Draw => Some(DRAW),
        GameStatus::Ongoing => None,
    }
}
