//! Engine command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

use tracing::warn;

use crate::board::Move;

use super::notation::parse_move;

/// Name of the search thread option, the only option the engine exposes.
pub const THREADS_OPTION: &str = "Threads";

/// A parsed controller-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; engine replies with id, options and `oxook`.
    Oxo,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set the search thread count: `setoption name Threads value <n>`.
    SetThreads(usize),

    /// Reset to the empty board.
    NewGame,

    /// Set the position: `position startpos|<board> [moves <m>...]`.
    Position { board: String, moves: Vec<Move> },

    /// Apply a single move to the current position.
    Play { mv: Move },

    /// Print the current position and status.
    Display,

    /// Search the current position and report the best move.
    Go,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "oxo" => Some(Command::Oxo),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "d" => Some(Command::Display),
        "go" => Some(Command::Go),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "play" => parse_play(&tokens),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name Threads value <n>`.
///
/// Option names match case-insensitively. Unknown options and values that
/// are not a thread count are logged and dropped.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    match tokens {
        [_, "name", name, "value", value] if name.eq_ignore_ascii_case(THREADS_OPTION) => {
            match value.parse::<usize>() {
                Ok(threads) => Some(Command::SetThreads(threads)),
                Err(e) => {
                    warn!(value = *value, error = %e, "Threads value is not a count");
                    None
                }
            }
        }
        [_, "name", name, ..] if name.eq_ignore_ascii_case(THREADS_OPTION) => {
            warn!("malformed setoption: expected 'setoption name Threads value <n>'");
            None
        }
        [_, "name", name, ..] => {
            warn!(option = *name, "unknown option");
            None
        }
        _ => {
            warn!("malformed setoption: expected 'setoption name <id> value <x>'");
            None
        }
    }
}

/// Parses `position startpos|<board> [moves <m>...]`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed position: expected 'position startpos|<board> [moves <m>...]'");
        return None;
    }
    let board = tokens[1].to_string();

    let mut moves = Vec::new();
    match tokens.get(2) {
        None => {}
        Some(&"moves") => {
            for token in &tokens[3..] {
                match parse_move(token) {
                    Ok(mv) => moves.push(mv),
                    Err(e) => {
                        warn!(error = %e, "malformed position move list");
                        return None;
                    }
                }
            }
        }
        Some(other) => {
            warn!(token = *other, "malformed position: expected 'moves'");
            return None;
        }
    }

    Some(Command::Position { board, moves })
}

/// Parses `play <row>,<col>`.
fn parse_play(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!("malformed play: expected 'play <row>,<col>'");
        return None;
    }
    match parse_move(tokens[1]) {
        Ok(mv) => Some(Command::Play { mv }),
        Err(e) => {
            warn!(error = %e, "malformed play");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("oxo"), Some(Command::Oxo));
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("d"), Some(Command::Display));
        assert_eq!(parse_command("go"), Some(Command::Go));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_threads() {
        assert_eq!(
            parse_command("setoption name Threads value 4"),
            Some(Command::SetThreads(4))
        );
        assert_eq!(
            parse_command("setoption name threads value 64"),
            Some(Command::SetThreads(64))
        );
    }

    #[test]
    fn parse_setoption_threads_needs_a_count() {
        assert_eq!(parse_command("setoption name Threads"), None);
        assert_eq!(parse_command("setoption name Threads value"), None);
        assert_eq!(parse_command("setoption name Threads value many"), None);
        assert_eq!(parse_command("setoption name Threads value -1"), None);
        assert_eq!(parse_command("setoption name Threads value 2 3"), None);
    }

    #[test]
    fn parse_setoption_unknown_or_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption foo"), None);
        assert_eq!(parse_command("setoption name Hash value 16"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_position_startpos() {
        assert_eq!(
            parse_command("position startpos"),
            Some(Command::Position {
                board: "startpos".to_string(),
                moves: Vec::new(),
            })
        );
    }

    #[test]
    fn parse_position_with_moves() {
        assert_eq!(
            parse_command("position XO./.../... moves 1,1 2,2"),
            Some(Command::Position {
                board: "XO./.../...".to_string(),
                moves: vec![mv(1, 1), mv(2, 2)],
            })
        );
    }

    #[test]
    fn parse_position_malformed_returns_none() {
        assert_eq!(parse_command("position"), None);
        assert_eq!(parse_command("position startpos 1,1"), None);
        assert_eq!(parse_command("position startpos moves 9,9"), None);
    }

    #[test]
    fn parse_play_command() {
        assert_eq!(parse_command("play 0,2"), Some(Command::Play { mv: mv(0, 2) }));
        assert_eq!(parse_command("play"), None);
        assert_eq!(parse_command("play 0,3"), None);
        assert_eq!(parse_command("play 0,1 1,1"), None);
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_command("  oxo  "), Some(Command::Oxo));
        assert_eq!(parse_command("  isready  "), Some(Command::IsReady));
    }
}
