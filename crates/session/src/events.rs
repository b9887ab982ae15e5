//! Observer callbacks for front-ends.

use game_core::{Color, Move};

use crate::game::{GameState, MoveReport, MoveStatus, Phase, TerminationReason};

/// Receives game events. All methods default to doing nothing.
///
/// Callbacks run on the thread that caused the event, after the session
/// lock has been released, so they may call back into the session.
pub trait GameObserver: Send + Sync {
    fn on_check(&self, _color: Color) {}
    fn on_game_over(&self, _winner: Option<Color>, _reason: TerminationReason) {}
    fn on_move_applied(&self, _mv: &Move, _notation: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    MoveApplied { mv: Move, notation: String },
    Check(Color),
    GameOver { winner: Option<Color>, reason: TerminationReason },
}

impl GameEvent {
    pub fn dispatch(&self, observer: &dyn GameObserver) {
        match self {
            GameEvent::MoveApplied { mv, notation } => observer.on_move_applied(mv, notation),
            GameEvent::Check(color) => observer.on_check(*color),
            GameEvent::GameOver { winner, reason } => observer.on_game_over(*winner, *reason),
        }
    }

    pub(crate) fn game_over(reason: TerminationReason) -> Self {
        GameEvent::GameOver {
            winner: reason.winner(),
            reason,
        }
    }

    /// Events implied by a move request that went through.
    pub(crate) fn from_report(report: &MoveReport, game: &GameState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if let Some(record) = &report.applied {
            events.push(GameEvent::MoveApplied {
                mv: record.mv,
                notation: record.notation.clone(),
            });
        }
        match (report.status, game.phase()) {
            (MoveStatus::Check, _) => events.push(GameEvent::Check(game.side_to_move())),
            (MoveStatus::Checkmate | MoveStatus::Stalemate, Phase::Terminated(reason)) => {
                events.push(GameEvent::game_over(reason))
            }
            _ => {}
        }
        events
    }
}
