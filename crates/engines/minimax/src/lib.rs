//! Minimax Engine
//!
//! Alpha-beta search over any [`game_core::Ruleset`] that can be statically
//! evaluated. Chess and checkers both plug in through [`Evaluate`].

mod difficulty;
mod eval;
mod limits;
mod search;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use eval::{pst_value, Evaluate, CHECK_BONUS, PIECE_VALUES};
pub use limits::{SearchLimits, TimeControl};
pub use search::{choose_move, choose_move_with_jitter, SearchOutcome, MATE_SCORE};

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<M> {
    /// The best move found (None if no legal moves)
    pub best_move: Option<M>,
    /// Evaluation score from the side to move's perspective
    pub score: i32,
    /// Search depth requested
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the search was stopped early
    pub stopped: bool,
}

/// Something that picks moves for a game.
///
/// Generic over the ruleset so the same session code can drive chess and
/// checkers opponents.
pub trait Engine<R: Evaluate>: Send {
    fn search(&mut self, pos: &R, limits: SearchLimits) -> SearchResult<R::Move>;

    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}

/// Minimax engine with alpha-beta pruning and optional root jitter.
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    /// Maximum random perturbation of root scores (0 = deterministic)
    jitter: i32,
    rng: StdRng,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::with_jitter(0, None)
    }

    /// Engine that perturbs root scores by up to `jitter` points. A seed makes
    /// the choice reproducible.
    pub fn with_jitter(jitter: i32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            jitter: jitter.max(0),
            rng,
            nodes: 0,
        }
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Evaluate> Engine<R> for MinimaxEngine {
    fn search(&mut self, pos: &R, limits: SearchLimits) -> SearchResult<R::Move> {
        limits.start();
        let outcome = choose_move_with_jitter(
            pos,
            limits.depth,
            &limits.time_control,
            self.jitter,
            &mut self.rng,
        );
        self.nodes = outcome.nodes;

        debug!(
            depth = limits.depth,
            nodes = outcome.nodes,
            stopped = outcome.stopped,
            elapsed_ms = limits.time_control.elapsed().as_millis() as u64,
            "search finished"
        );

        SearchResult {
            best_move: outcome.best.map(|(mv, _)| mv),
            score: outcome.best.map(|(_, s)| s).unwrap_or(0),
            depth: limits.depth,
            nodes: outcome.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
