//! Rules core for turn-based board games.
//!
//! Chess is the main ruleset: board model, pseudo-legal move generation, the
//! check-safe legality filter and make/unmake. Checkers shares the board
//! primitives and plugs into the same [`Ruleset`] seam so one search engine
//! can play both.

pub mod board;
pub mod checkers;
pub mod error;
pub mod legality;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod ruleset;
pub mod types;

pub use board::*;
pub use checkers::{Checker, CheckersBoard, CheckersMove};
pub use error::{CoreError, CoreResult};
pub use legality::*;
pub use movegen::{pseudo_moves_for, pseudo_moves_from};
pub use notation::*;
pub use perft::{divide, perft};
pub use ruleset::{Outcome, Ruleset};
pub use types::*;
