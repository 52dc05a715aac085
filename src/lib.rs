//! noughts: an exhaustive tic-tac-toe engine.
//!
//! Exposes the board representation, move generation, terminal evaluation
//! and alpha-beta search as plain functions over a `Copy` board value, plus
//! the protocol, engine and self-play layers used by the binaries.
//!
//! ```
//! use noughts::{apply_move, best_move, initial_state, is_terminal, utility};
//!
//! let mut board = initial_state();
//! while !is_terminal(&board) {
//!     let mv = best_move(&board).unwrap();
//!     board = apply_move(&board, mv).unwrap();
//! }
//! assert_eq!(utility(&board), Some(0));
//! ```

pub mod board;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod selfplay;

pub use board::{
    apply_move, current_player, initial_state, Board, Cell, InvalidMove, Move, Player,
};
pub use eval::{is_terminal, utility, winner};
pub use movegen::legal_moves;
pub use search::{best_move, search, search_parallel, SearchResult};
