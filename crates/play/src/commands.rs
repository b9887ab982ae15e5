//! Parsing of the line-based command language.

use game_core::{parse_coordinates, PieceKind, Square};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
    /// Answer to a pending promotion (`q`, `r`, `b`, `n`)
    Promote(PieceKind),
    Moves(Square),
    Undo,
    Resign,
    New,
    Board,
    Pause,
    Resume,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("usage: moves <square>")]
    MissingSquare,
    #[error("{0:?} is not a square")]
    BadSquare(String),
    #[error("unknown command {0:?} (type `help`)")]
    Unknown(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(CommandError::Empty);
    };
    let head = head.to_ascii_lowercase();

    let cmd = match head.as_str() {
        "undo" => Command::Undo,
        "resign" => Command::Resign,
        "new" => Command::New,
        "board" => Command::Board,
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "moves" => {
            let arg = parts.next().ok_or(CommandError::MissingSquare)?;
            let sq = arg
                .parse()
                .map_err(|_| CommandError::BadSquare(arg.to_string()))?;
            Command::Moves(sq)
        }
        "q" | "r" | "b" | "n" => {
            let kind = head
                .chars()
                .next()
                .and_then(PieceKind::from_letter)
                .ok_or_else(|| CommandError::Unknown(head.clone()))?;
            Command::Promote(kind)
        }
        _ => match parse_coordinates(&head) {
            Some((from, to, promotion)) => Command::Move {
                from,
                to,
                promotion,
            },
            None => return Err(CommandError::Unknown(head)),
        },
    };
    Ok(cmd)
}

pub const HELP: &str = "\
commands:
  e2e4, e7e8q     move (append q/r/b/n to promote)
  q | r | b | n   choose the piece for a pending promotion
  moves <square>  list legal moves of a piece
  undo            take back your last move
  resign          give up the game
  new             start over
  pause, resume   stop or restart the clocks
  board           show the board
  quit            leave";

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
