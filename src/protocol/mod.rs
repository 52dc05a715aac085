//! Engine protocol handling.
//!
//! Board and move notation, plus the command parser for the line-oriented
//! engine protocol spoken over stdin/stdout.

pub mod notation;
pub mod parser;

pub use notation::{
    encode_board, format_move, parse_board, parse_move, NotationError, NO_MOVE, STARTPOS,
};
pub use parser::{parse_command, Command, THREADS_OPTION};
