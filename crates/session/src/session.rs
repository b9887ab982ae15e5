//! The session façade: one shared game, any number of front-end handles.
//!
//! A [`GameSession`] is a cheap cloneable handle. The game lives behind a
//! mutex that is never held across an `.await` or while observers run. The
//! engine searches on tokio's blocking pool; while it does, the session is
//! "thinking" and human moves and undo are refused.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use game_core::{Color, Move, PieceKind, Position, Square};
use minimax_engine::{Difficulty, Engine, MinimaxEngine, TimeControl};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::{ChessClock, TimeSettings};
use crate::config::GameConfig;
use crate::error::Rejection;
use crate::events::{GameEvent, GameObserver};
use crate::game::{GameState, MoveRecord, MoveReport, Phase, TerminationReason};

/// Builds the engine for one search from the current settings.
pub type EngineFactory = Arc<dyn Fn(&GameConfig) -> Box<dyn Engine<Position>> + Send + Sync>;

type Observers = RwLock<Vec<Arc<dyn GameObserver>>>;

struct InFlight {
    id: u64,
    time_control: TimeControl,
}

struct Inner {
    game: GameState,
    config: GameConfig,
    clock: ChessClock,
    search: Option<InFlight>,
    next_search_id: u64,
    paused: bool,
}

impl Inner {
    fn cancel_search(&mut self) {
        if let Some(search) = self.search.take() {
            search.time_control.stop();
            debug!(id = search.id, "search cancelled");
        }
    }

    /// Refusals that apply to a human acting on the board.
    fn check_human_turn(&self) -> Result<(), Rejection> {
        if self.search.is_some() {
            return Err(Rejection::EngineThinking);
        }
        if self.paused {
            return Err(Rejection::Paused);
        }
        if self.game.phase() == Phase::InProgress
            && self.config.engine_plays(self.game.side_to_move())
        {
            return Err(Rejection::EngineToMove);
        }
        Ok(())
    }

    fn after_move(&mut self, report: &MoveReport) -> Vec<GameEvent> {
        if report.applied.is_some() {
            self.clock.stop_and_increment();
            if self.game.is_over() {
                self.clock.stop();
            } else {
                self.clock.start(self.game.side_to_move());
            }
        }
        GameEvent::from_report(report, &self.game)
    }

    fn tick(&mut self) -> Option<TerminationReason> {
        if self.paused || self.game.phase() != Phase::InProgress {
            return None;
        }
        let color = self.clock.flagged()?;
        let reason = self.game.flag_timeout(color).ok()?;
        self.cancel_search();
        self.clock.stop();
        info!(%color, "flag fell");
        Some(reason)
    }
}

/// Owns the in-flight marker of one AI request. If the request future is
/// dropped while the search runs, the search is stopped and the session
/// stops thinking.
struct SearchGuard<'a> {
    inner: &'a Mutex<Inner>,
    id: u64,
    armed: bool,
}

impl SearchGuard<'_> {
    /// The request is past its last await point and handles the result.
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for SearchGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = lock(self.inner);
        if inner.search.as_ref().is_some_and(|s| s.id == self.id) {
            warn!(id = self.id, "AI request dropped mid-search");
            inner.cancel_search();
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

fn emit(observers: &Observers, events: Vec<GameEvent>) {
    if events.is_empty() {
        return;
    }
    let observers = observers
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    for event in &events {
        for observer in &observers {
            event.dispatch(observer.as_ref());
        }
    }
}

#[derive(Clone)]
pub struct GameSession {
    inner: Arc<Mutex<Inner>>,
    observers: Arc<Observers>,
    engine_factory: EngineFactory,
}

impl GameSession {
    /// A session with the minimax engine. No game runs until
    /// [`GameSession::new_game`].
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(config, |config: &GameConfig| -> Box<dyn Engine<Position>> {
            Box::new(MinimaxEngine::with_jitter(config.jitter, config.seed))
        })
    }

    pub fn with_engine<F>(config: GameConfig, factory: F) -> Self
    where
        F: Fn(&GameConfig) -> Box<dyn Engine<Position>> + Send + Sync + 'static,
    {
        let clock = ChessClock::new(config.time_settings());
        Self {
            inner: Arc::new(Mutex::new(Inner {
                game: GameState::new(),
                config,
                clock,
                search: None,
                next_search_id: 0,
                paused: false,
            })),
            observers: Arc::new(RwLock::new(Vec::new())),
            engine_factory: Arc::new(factory),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }

    pub fn add_observer(&self, observer: Arc<dyn GameObserver>) {
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    /// Start a fresh game, cancelling any search in flight.
    pub fn new_game(&self, config: GameConfig) -> GameState {
        let settings = config.time_settings();
        self.new_game_with_clock(config, settings)
    }

    /// Like [`GameSession::new_game`] with explicit clock settings.
    pub fn new_game_with_clock(&self, config: GameConfig, settings: TimeSettings) -> GameState {
        let mut inner = self.lock();
        inner.cancel_search();
        info!(
            time = %settings,
            ai = config.ai_enabled,
            ai_color = %config.ai_color,
            difficulty = %config.difficulty,
            "new game"
        );
        inner.game = GameState::started();
        inner.clock = ChessClock::new(settings);
        inner.clock.start(Color::White);
        inner.paused = false;
        inner.config = config;
        inner.game.clone()
    }

    /// New game with the current settings.
    pub fn restart(&self) -> GameState {
        let config = self.config();
        self.new_game(config)
    }

    pub fn state(&self) -> GameState {
        self.lock().game.clone()
    }

    pub fn config(&self) -> GameConfig {
        self.lock().config.clone()
    }

    pub fn is_thinking(&self) -> bool {
        self.lock().search.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    /// True when the game runs and the engine owns the next move.
    pub fn engine_to_move(&self) -> bool {
        let inner = self.lock();
        inner.game.phase() == Phase::InProgress
            && inner.game.pending_promotion().is_none()
            && inner.config.engine_plays(inner.game.side_to_move())
    }

    pub fn remaining_time(&self, color: Color) -> Duration {
        self.lock().clock.remaining_time(color)
    }

    pub fn legal_moves(&self, from: Square) -> Vec<Move> {
        self.lock().game.legal_moves(from)
    }

    pub fn submit_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveReport, Rejection> {
        let (report, events) = {
            let mut inner = self.lock();
            inner.check_human_turn()?;
            let report = inner.game.submit_move(from, to, promotion)?;
            let events = inner.after_move(&report);
            (report, events)
        };
        emit(&self.observers, events);
        Ok(report)
    }

    pub fn complete_promotion(&self, kind: PieceKind) -> Result<MoveReport, Rejection> {
        let (report, events) = {
            let mut inner = self.lock();
            inner.check_human_turn()?;
            let report = inner.game.complete_promotion(kind)?;
            let events = inner.after_move(&report);
            (report, events)
        };
        emit(&self.observers, events);
        Ok(report)
    }

    /// Let the engine pick and play a move for the side to move.
    ///
    /// Only allowed while the engine owns the side to move. The search runs
    /// on the blocking pool. If the game was reset, ended or the search was
    /// cancelled in the meantime, the result is dropped and
    /// `Rejection::Cancelled` is returned. Dropping the returned future
    /// cancels the search.
    pub async fn request_ai_move(&self, difficulty: Difficulty) -> Result<MoveReport, Rejection> {
        let (id, position, limits, mut engine) = {
            let mut inner = self.lock();
            if inner.search.is_some() {
                return Err(Rejection::EngineThinking);
            }
            if inner.paused {
                return Err(Rejection::Paused);
            }
            match inner.game.phase() {
                Phase::NotStarted => return Err(Rejection::NotStarted),
                Phase::Terminated(_) => return Err(Rejection::GameOver),
                Phase::InProgress => {}
            }
            if inner.game.pending_promotion().is_some() {
                return Err(Rejection::PromotionPending);
            }
            if !inner.config.engine_plays(inner.game.side_to_move()) {
                return Err(Rejection::HumanToMove);
            }

            let limits = difficulty.limits();
            let id = inner.next_search_id;
            inner.next_search_id += 1;
            inner.search = Some(InFlight {
                id,
                time_control: limits.time_control.clone(),
            });
            let engine = (self.engine_factory)(&inner.config);
            (id, inner.game.position().clone(), limits, engine)
        };
        debug!(id, %difficulty, "search started");

        let mut guard = SearchGuard {
            inner: &self.inner,
            id,
            armed: true,
        };
        let joined = tokio::task::spawn_blocking(move || engine.search(&position, limits)).await;
        guard.disarm();

        let (report, events) = {
            let mut inner = self.lock();
            let ours = inner.search.as_ref().is_some_and(|s| s.id == id);
            let live = inner
                .search
                .as_ref()
                .is_some_and(|s| s.id == id && !s.time_control.is_stopped());
            if ours {
                inner.search = None;
            }
            if !live {
                warn!(id, "discarding result of a cancelled search");
                return Err(Rejection::Cancelled);
            }

            let result = match joined {
                Ok(result) => result,
                Err(err) => {
                    warn!(%err, "search task failed");
                    return Err(Rejection::Cancelled);
                }
            };
            let mv = result.best_move.ok_or(Rejection::NoMove)?;
            let report = inner.game.apply_move(mv)?;
            let events = inner.after_move(&report);
            (report, events)
        };
        emit(&self.observers, events);
        Ok(report)
    }

    /// Play engine moves for as long as the engine is on move.
    pub async fn play_engine_turns(&self) -> Result<Vec<MoveReport>, Rejection> {
        let mut reports = Vec::new();
        while self.engine_to_move() {
            let difficulty = self.config().difficulty;
            reports.push(self.request_ai_move(difficulty).await?);
        }
        Ok(reports)
    }

    /// Abort the search in flight, if any. Its result will be discarded.
    pub fn cancel_search(&self) {
        self.lock().cancel_search();
    }

    pub fn undo(&self) -> Result<Option<MoveRecord>, Rejection> {
        let mut inner = self.lock();
        if inner.search.is_some() {
            return Err(Rejection::EngineThinking);
        }
        let record = inner.game.undo()?;
        if record.is_some() {
            let stm = inner.game.side_to_move();
            inner.clock.start(stm);
        }
        Ok(record)
    }

    pub fn resign(&self, color: Color) -> Result<TerminationReason, Rejection> {
        let reason = {
            let mut inner = self.lock();
            let reason = inner.game.resign(color)?;
            inner.cancel_search();
            inner.clock.stop();
            info!(%color, "resigned");
            reason
        };
        emit(&self.observers, vec![GameEvent::game_over(reason)]);
        Ok(reason)
    }

    /// Freeze the clocks. Moves are refused until [`GameSession::resume`].
    pub fn pause(&self) -> bool {
        let mut inner = self.lock();
        if inner.paused || inner.game.phase() != Phase::InProgress {
            return false;
        }
        inner.paused = true;
        inner.clock.pause();
        true
    }

    pub fn resume(&self) -> bool {
        let mut inner = self.lock();
        if !inner.paused {
            return false;
        }
        inner.paused = false;
        inner.clock.resume();
        true
    }

    /// Check the clocks once; ends the game on a fallen flag.
    pub fn tick(&self) -> Option<TerminationReason> {
        let fired = self.lock().tick();
        if let Some(reason) = fired {
            emit(&self.observers, vec![GameEvent::game_over(reason)]);
        }
        fired
    }

    /// Run [`GameSession::tick`] every `period` on the tokio runtime. The
    /// task ends once every session handle is dropped; abort the handle to
    /// stop it earlier.
    pub fn spawn_clock(&self, period: Duration) -> JoinHandle<()> {
        let inner = Arc::downgrade(&self.inner);
        let observers = Arc::clone(&self.observers);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                let fired = lock(&inner).tick();
                if let Some(reason) = fired {
                    emit(&observers, vec![GameEvent::game_over(reason)]);
                }
            }
        })
    }
}
