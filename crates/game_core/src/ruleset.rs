//! The seam between a board game's rules and anything that searches it.
//!
//! Search and game-flow code is written against [`Ruleset`]; chess
//! ([`Position`]) and checkers ([`crate::checkers::CheckersBoard`]) plug in
//! their own move generation and termination rules.

use std::fmt;

use crate::board::{Position, Undo};
use crate::legality::legal_moves_into;
use crate::types::{Color, Move};

/// Result for the side to move once it has no legal move left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The side to move has lost (checkmate in chess, blocked in checkers).
    Loss,
    /// Nobody wins (stalemate).
    Draw,
}

pub trait Ruleset: Clone + Send + 'static {
    type Move: Copy + PartialEq + fmt::Debug + Send + 'static;
    type Undo;

    fn side_to_move(&self) -> Color;

    /// Replace the contents of `out` with every legal move for the side to move.
    fn legal_moves_into(&mut self, out: &mut Vec<Self::Move>);

    fn any_legal_move(&mut self) -> bool {
        let mut moves = Vec::new();
        self.legal_moves_into(&mut moves);
        !moves.is_empty()
    }

    fn make_move(&mut self, mv: Self::Move) -> Self::Undo;
    fn unmake_move(&mut self, mv: Self::Move, undo: Self::Undo);

    fn is_capture(&self, mv: &Self::Move) -> bool;

    /// Whether `color` is currently in check. Games without check say no.
    fn king_in_check(&self, _color: Color) -> bool {
        false
    }

    /// How a position without legal moves ends for the side to move.
    fn stuck_outcome(&self) -> Outcome;

    /// `None` while the side to move can still play.
    fn outcome(&mut self) -> Option<Outcome> {
        if self.any_legal_move() {
            None
        } else {
            Some(self.stuck_outcome())
        }
    }
}

impl Ruleset for Position {
    type Move = Move;
    type Undo = Undo;

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn legal_moves_into(&mut self, out: &mut Vec<Move>) {
        legal_moves_into(self, out);
    }

    fn any_legal_move(&mut self) -> bool {
        self.has_legal_move(self.side_to_move)
    }

    fn make_move(&mut self, mv: Move) -> Undo {
        Position::make_move(self, mv)
    }

    fn unmake_move(&mut self, mv: Move, undo: Undo) {
        Position::unmake_move(self, mv, undo)
    }

    fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    fn king_in_check(&self, color: Color) -> bool {
        self.in_check(color)
    }

    fn stuck_outcome(&self) -> Outcome {
        if self.in_check(self.side_to_move) {
            Outcome::Loss
        } else {
            Outcome::Draw
        }
    }
}
