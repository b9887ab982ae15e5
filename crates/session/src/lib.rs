//! Game sessions: the state machine that commits moves, the clocks, and the
//! async façade front-ends talk to.

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod session;

pub use clock::{ChessClock, TimeSettings};
pub use config::GameConfig;
pub use error::{ConfigError, Rejection};
pub use events::{GameEvent, GameObserver};
pub use game::{GameState, MoveRecord, MoveReport, MoveStatus, Phase, TerminationReason};
pub use session::{EngineFactory, GameSession};
