//! Minimax search with alpha-beta pruning.
//!
//! X maximizes and O minimizes the utility of the terminal position reached.
//! The search always runs to terminal states; the tree is at most nine plies
//! deep.
//!
//! Candidates are tried in row-major order and a later move only replaces the
//! running best when it is strictly better, so among equally valued moves the
//! first one wins.

use tracing::debug;

use crate::board::{current_player, Board, Move, Player};
use crate::eval::utility;
use crate::movegen::legal_moves;

/// Lower bound standing in for negative infinity.
pub(crate) const NEG_INF: i32 = i32::MIN;
/// Upper bound standing in for positive infinity.
pub(crate) const POS_INF: i32 = i32::MAX;

/// Result of a search: the chosen move and its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// None when the position is already terminal.
    pub best_move: Option<Move>,
    /// Minimax value from X's perspective: +1, 0 or -1.
    pub value: i32,
    /// Number of positions visited.
    pub nodes: u64,
}

/// Recursive alpha-beta worker. Counts visited nodes.
#[derive(Debug, Default)]
pub(crate) struct Searcher {
    pub(crate) nodes: u64,
}

impl Searcher {
    /// Returns the value of `board` and the move achieving it.
    ///
    /// Dispatches on the side to move: X takes the maximum over children, O
    /// the minimum. Bounds are passed by value so sibling branches never see
    /// each other's updates.
    pub(crate) fn alpha_beta(
        &mut self,
        board: &Board,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Move>) {
        self.nodes += 1;

        if let Some(value) = utility(board) {
            return (value, None);
        }

        let side = current_player(board);
        let mut best_value = match side {
            Player::X => NEG_INF,
            Player::O => POS_INF,
        };
        let mut best_move = None;

        for mv in legal_moves(board) {
            let child = board.with_cell(mv, side.mark());
            let (value, _) = self.alpha_beta(&child, alpha, beta);

            match side {
                Player::X => {
                    if value > best_value {
                        best_value = value;
                        best_move = Some(mv);
                    }
                    alpha = alpha.max(best_value);
                    if alpha >= beta {
                        break;
                    }
                }
                Player::O => {
                    if value < best_value {
                        best_value = value;
                        best_move = Some(mv);
                    }
                    beta = beta.min(best_value);
                    if beta <= alpha {
                        break;
                    }
                }
            }
        }

        (best_value, best_move)
    }
}

/// Searches the position to the end and returns the optimal move for the
/// player to move, together with its value.
pub fn search(board: &Board) -> SearchResult {
    let mut searcher = Searcher::default();
    let (value, best_move) = searcher.alpha_beta(board, NEG_INF, POS_INF);
    debug!(
        nodes = searcher.nodes,
        value,
        best_move = ?best_move,
        "search complete"
    );
    SearchResult {
        best_move,
        value,
        nodes: searcher.nodes,
    }
}

/// Returns the optimal move for the player to move, or None on a terminal
/// board.
///
/// When several moves are equally good the first in row-major order is
/// returned; any of them is optimal.
pub fn best_move(board: &Board) -> Option<Move> {
    search(board).best_move
}
