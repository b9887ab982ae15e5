//! Error types for the session layer.

use thiserror::Error;

/// Why a request was refused. A rejected request never changes the game.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("no piece on the origin square")]
    EmptySquare,
    #[error("that piece belongs to the side not on move")]
    NotYourPiece,
    #[error("move is not legal in this position")]
    IllegalMove,
    #[error("the engine is thinking")]
    EngineThinking,
    #[error("it is the engine's turn")]
    EngineToMove,
    #[error("the side to move is played by a human")]
    HumanToMove,
    #[error("the game is over")]
    GameOver,
    #[error("no game has been started")]
    NotStarted,
    #[error("game is paused")]
    Paused,
    #[error("a promotion piece must be chosen first")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPendingPromotion,
    #[error("pawns promote to queen, rook, bishop or knight")]
    InvalidPromotion,
    #[error("the engine found no move")]
    NoMove,
    #[error("search was cancelled")]
    Cancelled,
    #[error("board is corrupted; game aborted")]
    Corrupted,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
