//! Error types for board setup and consistency checks.

use thiserror::Error;

use crate::types::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// FEN string could not be parsed
    #[error("Invalid FEN: {reason}")]
    InvalidFen { reason: String },

    /// Square name outside a1..h8
    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    /// A board without exactly one king per side. Unreachable through legal
    /// play; seeing it means the position is corrupted.
    #[error("Board has {count} {color} kings (expected exactly one)")]
    KingCount { color: Color, count: usize },
}

impl CoreError {
    pub(crate) fn fen(reason: impl Into<String>) -> Self {
        CoreError::InvalidFen {
            reason: reason.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
