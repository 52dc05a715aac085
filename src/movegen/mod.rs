//! Legal move generation.
//!
//! A move is legal exactly when its target cell is empty. The set iterates
//! row-major, which is the order the search considers candidates in.

use std::collections::BTreeSet;

use rand::Rng;

use crate::board::{all_moves, Board, Move};

/// Returns every empty cell on the board.
///
/// Empty on a full board. Winning lines are not considered here; callers
/// that care check `is_terminal` first.
pub fn legal_moves(board: &Board) -> BTreeSet<Move> {
    all_moves().filter(|mv| board.get(*mv).is_empty()).collect()
}

/// Picks a uniformly random legal move, or None on a full board.
pub fn random_move(board: &Board, rng: &mut impl Rng) -> Option<Move> {
    let legal: Vec<Move> = legal_moves(board).into_iter().collect();
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}
