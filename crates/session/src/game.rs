//! The game state machine.
//!
//! [`GameState`] owns the position, the move counter and the undo history,
//! and is the only place moves are committed. Every request either succeeds
//! or returns a [`Rejection`] with the state left exactly as it was.

use game_core::{
    legal_moves, legal_moves_from, move_notation, Color, CoreResult, Move, PieceKind, Position,
    Square,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Rejection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "lowercase")]
pub enum TerminationReason {
    Checkmate { winner: Color },
    Stalemate,
    Resignation { winner: Color },
    Timeout { winner: Color },
    /// Internal consistency fault: the board lost a king.
    Corrupted,
}

impl TerminationReason {
    pub fn winner(self) -> Option<Color> {
        match self {
            TerminationReason::Checkmate { winner }
            | TerminationReason::Resignation { winner }
            | TerminationReason::Timeout { winner } => Some(winner),
            TerminationReason::Stalemate | TerminationReason::Corrupted => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    Terminated(TerminationReason),
}

/// Outcome of a move request for the side that moves next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    Continue,
    Check,
    Checkmate,
    Stalemate,
    /// The move needs a promotion piece; nothing was applied.
    PromotionPending,
}

/// A committed move with its notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub notation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub status: MoveStatus,
    /// None while a promotion is pending
    pub applied: Option<MoveRecord>,
    /// Board after the request
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    position: Position,
    move_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    position: Position,
    move_count: u32,
    history: Vec<Snapshot>,
    records: Vec<MoveRecord>,
    phase: Phase,
    pending: Option<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard start position, waiting for [`GameState::start`].
    pub fn new() -> Self {
        Self {
            position: Position::startpos(),
            move_count: 0,
            history: Vec::new(),
            records: Vec::new(),
            phase: Phase::NotStarted,
            pending: None,
        }
    }

    /// A running game from the standard start position.
    pub fn started() -> Self {
        let mut game = Self::new();
        game.phase = Phase::InProgress;
        game
    }

    /// A running game from an arbitrary position, which must have one king
    /// per side. A position that is already mate or stalemate starts
    /// terminated.
    pub fn from_position(position: Position) -> CoreResult<Self> {
        position.validate()?;
        let mut game = Self {
            position,
            phase: Phase::InProgress,
            ..Self::new()
        };
        game.classify();
        Ok(game)
    }

    pub fn from_fen(fen: &str) -> CoreResult<Self> {
        Self::from_position(Position::from_fen(fen)?)
    }

    pub fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            self.phase = Phase::InProgress;
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn move_count(&self) -> u32 {
        self.move_count
    }
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }
    pub fn pending_promotion(&self) -> Option<Move> {
        self.pending
    }
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Terminated(_))
    }
    pub fn in_check(&self) -> bool {
        self.position.in_check(self.side_to_move())
    }

    /// Legal moves of the piece on `from`. Empty unless the game is running
    /// and the piece belongs to the side to move.
    pub fn legal_moves(&self, from: Square) -> Vec<Move> {
        let ours = self
            .position
            .piece_at(from)
            .is_some_and(|pc| pc.color == self.side_to_move());
        if self.phase != Phase::InProgress || !ours {
            return Vec::new();
        }
        legal_moves_from(&self.position, from)
    }

    fn ensure_playable(&self) -> Result<(), Rejection> {
        match self.phase {
            Phase::NotStarted => Err(Rejection::NotStarted),
            Phase::Terminated(_) => Err(Rejection::GameOver),
            Phase::InProgress if self.pending.is_some() => Err(Rejection::PromotionPending),
            Phase::InProgress => Ok(()),
        }
    }

    /// Human move entry. A pawn reaching the last rank without `promotion`
    /// suspends the move until [`GameState::complete_promotion`].
    pub fn submit_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveReport, Rejection> {
        self.ensure_playable()?;
        let piece = self.position.piece_at(from).ok_or(Rejection::EmptySquare)?;
        if piece.color != self.side_to_move() {
            return Err(Rejection::NotYourPiece);
        }

        let candidates: Vec<Move> = legal_moves_from(&self.position, from)
            .into_iter()
            .filter(|m| m.to == to)
            .collect();
        let first = *candidates.first().ok_or(Rejection::IllegalMove)?;

        if first.promotion.is_none() {
            if promotion.is_some() {
                return Err(Rejection::InvalidPromotion);
            }
            return self.commit(first);
        }
        match promotion {
            None => {
                self.pending = Some(Move {
                    promotion: None,
                    ..first
                });
                Ok(MoveReport {
                    status: MoveStatus::PromotionPending,
                    applied: None,
                    position: self.position.clone(),
                })
            }
            Some(kind) => {
                let mv = candidates
                    .into_iter()
                    .find(|m| m.promotion == Some(kind))
                    .ok_or(Rejection::InvalidPromotion)?;
                self.commit(mv)
            }
        }
    }

    /// Finish a suspended promotion. An invalid piece keeps it pending.
    pub fn complete_promotion(&mut self, kind: PieceKind) -> Result<MoveReport, Rejection> {
        let pending = self.pending.ok_or(Rejection::NoPendingPromotion)?;
        if !kind.is_promotion_target() {
            return Err(Rejection::InvalidPromotion);
        }
        self.pending = None;
        self.commit(Move {
            promotion: Some(kind),
            ..pending
        })
    }

    /// Apply a fully specified move, as produced by the generator or engine.
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveReport, Rejection> {
        self.ensure_playable()?;
        if !legal_moves(&self.position).contains(&mv) {
            return Err(Rejection::IllegalMove);
        }
        self.commit(mv)
    }

    fn commit(&mut self, mv: Move) -> Result<MoveReport, Rejection> {
        let notation = move_notation(&mv);
        self.history.push(Snapshot {
            position: self.position.clone(),
            move_count: self.move_count,
        });
        self.position.make_move(mv);
        self.move_count += 1;

        if let Err(err) = self.position.validate() {
            warn!(%err, fen = %self.position.to_fen(), "aborting corrupted game");
            self.phase = Phase::Terminated(TerminationReason::Corrupted);
            return Err(Rejection::Corrupted);
        }

        let record = MoveRecord { mv, notation };
        self.records.push(record.clone());
        let status = self.classify();
        debug!(
            notation = %record.notation,
            ?status,
            ply = self.move_count,
            "move applied"
        );

        Ok(MoveReport {
            status,
            applied: Some(record),
            position: self.position.clone(),
        })
    }

    /// Check, mate and stalemate for the side now on move.
    fn classify(&mut self) -> MoveStatus {
        let stm = self.side_to_move();
        let in_check = self.position.in_check(stm);
        if self.position.has_legal_move(stm) {
            return if in_check {
                MoveStatus::Check
            } else {
                MoveStatus::Continue
            };
        }
        if in_check {
            self.terminate(TerminationReason::Checkmate { winner: stm.other() });
            MoveStatus::Checkmate
        } else {
            self.terminate(TerminationReason::Stalemate);
            MoveStatus::Stalemate
        }
    }

    fn terminate(&mut self, reason: TerminationReason) {
        self.pending = None;
        self.phase = Phase::Terminated(reason);
        info!(?reason, moves = self.move_count, "game over");
    }

    /// Take back the last move. Returns the undone record, or None when
    /// there was nothing to undo.
    pub fn undo(&mut self) -> Result<Option<MoveRecord>, Rejection> {
        self.ensure_playable()?;
        let Some(snapshot) = self.history.pop() else {
            return Ok(None);
        };
        self.position = snapshot.position;
        self.move_count = snapshot.move_count;
        Ok(self.records.pop())
    }

    pub fn resign(&mut self, color: Color) -> Result<TerminationReason, Rejection> {
        self.end_by(TerminationReason::Resignation {
            winner: color.other(),
        })
    }

    /// `color` ran out of time.
    pub fn flag_timeout(&mut self, color: Color) -> Result<TerminationReason, Rejection> {
        self.end_by(TerminationReason::Timeout {
            winner: color.other(),
        })
    }

    fn end_by(&mut self, reason: TerminationReason) -> Result<TerminationReason, Rejection> {
        match self.phase {
            Phase::NotStarted => Err(Rejection::NotStarted),
            Phase::Terminated(_) => Err(Rejection::GameOver),
            Phase::InProgress => {
                self.terminate(reason);
                Ok(reason)
            }
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
