//! Board representation and game-state types.
//!
//! Contains cells and players, move coordinates, the board value itself,
//! turn inference, and the transition function.

pub mod cell;
pub mod moves;
pub mod state;

pub use cell::{Cell, Player};
pub use moves::{all_moves, Move, BOARD_SIZE, CELL_COUNT};
pub use state::{apply_move, current_player, initial_state, Board, InvalidMove};
