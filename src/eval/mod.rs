//! Position evaluation.
//!
//! Only finished games are scored; there is no heuristic for positions in
//! progress because the search always reaches terminal states.

pub(crate) mod terminal;

pub use terminal::{
    is_terminal, status, utility, winner, winning_line, GameStatus, DRAW, LINES, O_WIN, X_WIN,
};
