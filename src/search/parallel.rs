//! Root-parallel search.
//!
//! Each first-level candidate is searched on its own board copy with a full
//! window, so no bounds are shared between threads. The move is then chosen
//! in row-major order with the same strict comparison as the sequential
//! search, which makes both return the same move and value.

use rayon::prelude::*;
use tracing::debug;

use crate::board::{current_player, Board, Move, Player};
use crate::eval::is_terminal;
use crate::movegen::legal_moves;

use super::minimax::{search, SearchResult, Searcher, NEG_INF, POS_INF};

/// Searches each root move on the current rayon pool and combines them.
pub fn search_parallel(board: &Board) -> SearchResult {
    if is_terminal(board) {
        return search(board);
    }
    let side = current_player(board);
    let candidates: Vec<Move> = legal_moves(board).into_iter().collect();

    // Indexed map + collect keeps row-major order for the tie-break below.
    let scored: Vec<(Move, i32, u64)> = candidates
        .into_par_iter()
        .map(|mv| {
            let child = board.with_cell(mv, side.mark());
            let mut searcher = Searcher::default();
            let (value, _) = searcher.alpha_beta(&child, NEG_INF, POS_INF);
            (mv, value, searcher.nodes)
        })
        .collect();

    let mut best_value = match side {
        Player::X => NEG_INF,
        Player::O => POS_INF,
    };
    let mut best_move = None;
    let mut nodes = 1;
    for (mv, value, child_nodes) in scored {
        nodes += child_nodes;
        let better = match side {
            Player::X => value > best_value,
            Player::O => value < best_value,
        };
        if better {
            best_value = value;
            best_move = Some(mv);
        }
    }

    debug!(nodes, value = best_value, best_move = ?best_move, "parallel search complete");
    SearchResult {
        best_move,
        value: best_value,
        nodes,
    }
}

/// Searches with a dedicated pool of `threads` workers.
///
/// One thread (or zero) runs the plain sequential search instead.
pub fn search_with_threads(
    board: &Board,
    threads: usize,
) -> Result<SearchResult, rayon::ThreadPoolBuildError> {
    if threads <= 1 {
        return Ok(search(board));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    Ok(pool.install(|| search_parallel(board)))
}
