//! Search and planning.
//!
//! Exhaustive minimax with alpha-beta pruning, plus an optional root-parallel
//! variant that returns the same result using a rayon pool.

pub mod minimax;
pub mod parallel;

pub use minimax::{best_move, search, SearchResult};
pub use parallel::{search_parallel, search_with_threads};
