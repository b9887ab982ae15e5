//! Minimax search with alpha-beta pruning.
//!
//! The tree is walked with explicit maximizing and minimizing plies from the
//! point of view of the side to move at the root. Positions are changed in
//! place through make/unmake, so the caller's position is only ever read.

use std::cmp::Reverse;

use game_core::{Color, Outcome};
use rand::Rng;

use crate::eval::Evaluate;
use crate::limits::TimeControl;

/// Score of a side that is checkmated (or blocked) right now.
pub const MATE_SCORE: i32 = 100_000;
const INFINITY: i32 = i32::MAX / 2;

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<M> {
    /// Best move found with its score. None when the side to move has no
    /// legal move, or for a depth 0 search, which only scores the position.
    pub best: Option<(M, i32)>,
    /// Nodes visited
    pub nodes: u64,
    /// True if the search was stopped before it finished
    pub stopped: bool,
}

struct Ctx<'a> {
    perspective: Color,
    nodes: u64,
    stopped: bool,
    tc: &'a TimeControl,
}

impl Ctx<'_> {
    fn poll(&mut self) -> bool {
        self.nodes += 1;
        if self.tc.is_stopped()
            || (self.tc.should_check_time(self.nodes) && self.tc.check_time())
        {
            self.stopped = true;
        }
        self.stopped
    }
}

/// Pick a move for the side to move, searching `depth` plies. Depth 0 picks
/// nothing.
pub fn choose_move<R: Evaluate>(pos: &R, depth: u8, tc: &TimeControl) -> SearchOutcome<R::Move> {
    search_root(pos, depth, tc, None::<fn() -> i32>)
}

/// Like [`choose_move`] but each root score is perturbed by up to `jitter`
/// points so equal-looking moves vary between games.
pub fn choose_move_with_jitter<R: Evaluate, G: Rng>(
    pos: &R,
    depth: u8,
    tc: &TimeControl,
    jitter: i32,
    rng: &mut G,
) -> SearchOutcome<R::Move> {
    if jitter <= 0 {
        return choose_move(pos, depth, tc);
    }
    search_root(pos, depth, tc, Some(|| rng.gen_range(-jitter..=jitter)))
}

fn search_root<R: Evaluate, F: FnMut() -> i32>(
    pos: &R,
    depth: u8,
    tc: &TimeControl,
    mut noise: Option<F>,
) -> SearchOutcome<R::Move> {
    let mut tmp = pos.clone();
    let mut moves = Vec::with_capacity(64);
    tmp.legal_moves_into(&mut moves);
    if depth == 0 || moves.is_empty() {
        return SearchOutcome {
            best: None,
            nodes: 0,
            stopped: false,
        };
    }
    order_moves(&tmp, &mut moves);

    let mut ctx = Ctx {
        perspective: tmp.side_to_move(),
        nodes: 0,
        stopped: false,
        tc,
    };

    let mut best: Option<(R::Move, i32)> = None;
    let mut alpha = -INFINITY;

    for &mv in &moves {
        let undo = tmp.make_move(mv);
        // Noisy root scores must be exact, so only a plain search narrows
        // the window here.
        let window = if noise.is_none() { alpha } else { -INFINITY };
        let score = minimax(&mut tmp, depth.saturating_sub(1), window, INFINITY, false, 1, &mut ctx);
        tmp.unmake_move(mv, undo);

        if ctx.stopped {
            break;
        }

        let score = score + noise.as_mut().map_or(0, |f| f());
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((mv, score));
            alpha = alpha.max(score);
        }
    }

    // Interrupted before any root move finished: fall back to the first
    // ordered move with its static score.
    let best = best.unwrap_or_else(|| {
        let mv = moves[0];
        let undo = tmp.make_move(mv);
        let score = tmp.evaluate(ctx.perspective);
        tmp.unmake_move(mv, undo);
        (mv, score)
    });

    SearchOutcome {
        best: Some(best),
        nodes: ctx.nodes,
        stopped: ctx.stopped,
    }
}

fn minimax<R: Evaluate>(
    pos: &mut R,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    ply: i32,
    ctx: &mut Ctx<'_>,
) -> i32 {
    if ctx.poll() {
        return 0;
    }

    if depth == 0 {
        return static_score(pos, ply, ctx);
    }

    let mut moves = Vec::with_capacity(64);
    pos.legal_moves_into(&mut moves);
    if moves.is_empty() {
        return terminal_score(pos, ply, ctx.perspective);
    }
    order_moves(pos, &mut moves);

    let mut best = if maximizing { -INFINITY } else { INFINITY };
    for mv in moves {
        let undo = pos.make_move(mv);
        let score = minimax(pos, depth - 1, alpha, beta, !maximizing, ply + 1, ctx);
        pos.unmake_move(mv, undo);

        if ctx.stopped {
            return best;
        }

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Leaf score: the terminal score if the side to move is stuck, otherwise
/// the static evaluation.
fn static_score<R: Evaluate>(pos: &mut R, ply: i32, ctx: &Ctx<'_>) -> i32 {
    if pos.any_legal_move() {
        pos.evaluate(ctx.perspective)
    } else {
        terminal_score(pos, ply, ctx.perspective)
    }
}

/// Score of a position without legal moves. Mates found closer to the root
/// score higher so the engine takes the quickest one.
fn terminal_score<R: Evaluate>(pos: &R, ply: i32, perspective: Color) -> i32 {
    match pos.stuck_outcome() {
        Outcome::Draw => 0,
        Outcome::Loss if pos.side_to_move() == perspective => -(MATE_SCORE - ply),
        Outcome::Loss => MATE_SCORE - ply,
    }
}

/// Captures first (by the ruleset's ordering key); stable, so generator
/// order breaks ties.
fn order_moves<R: Evaluate>(pos: &R, moves: &mut [R::Move]) {
    moves.sort_by_key(|mv| Reverse(pos.order_key(mv)));
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
