//! Static evaluation.
//!
//! Scores are centipawn-like integers from the point of view of a chosen
//! colour: positive is good for that colour, negative for the opponent.

use game_core::{CheckersBoard, CheckersMove, Color, Move, PieceKind, Position, Ruleset, Square};

/// What the search needs from a game beyond its rules.
pub trait Evaluate: Ruleset {
    /// Static score of the position for `perspective`.
    fn evaluate(&self, perspective: Color) -> i32;

    /// Ordering key, higher is searched first. Captures must rank above
    /// quiet moves.
    fn order_key(&self, mv: &Self::Move) -> i32;
}

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Bonus for the side giving check, charged against the side in check.
pub const CHECK_BONUS: i32 = 50;

// Piece-square tables as seen from White, rank 8 on the first row.
#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_PST: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

fn pst(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_PST,
        PieceKind::Knight => &KNIGHT_PST,
        PieceKind::Bishop => &BISHOP_PST,
        PieceKind::Rook => &ROOK_PST,
        PieceKind::Queen => &QUEEN_PST,
        PieceKind::King => &KING_PST,
    }
}

/// Positional bonus for a piece of `color` on `sq`; Black reads the table
/// mirrored vertically.
pub fn pst_value(kind: PieceKind, color: Color, sq: Square) -> i32 {
    let row = match color {
        Color::White => 7 - sq.rank(),
        Color::Black => sq.rank(),
    };
    pst(kind)[row as usize * 8 + sq.file() as usize]
}

fn signed(score_for_white: i32, perspective: Color) -> i32 {
    match perspective {
        Color::White => score_for_white,
        Color::Black => -score_for_white,
    }
}

impl Evaluate for Position {
    fn evaluate(&self, perspective: Color) -> i32 {
        let mut score = 0i32;
        for (sq, pc) in self.pieces() {
            let value = PIECE_VALUES[pc.kind.idx()] + pst_value(pc.kind, pc.color, sq);
            score += signed(value, pc.color);
        }
        if self.king_in_check(Color::Black) {
            score += CHECK_BONUS;
        }
        if self.king_in_check(Color::White) {
            score -= CHECK_BONUS;
        }
        signed(score, perspective)
    }

    /// MVV-LVA for captures, then promotions, then quiet moves.
    fn order_key(&self, mv: &Move) -> i32 {
        let mut key = 0;
        if let Some(victim) = mv.captured {
            key += 10_000 + PIECE_VALUES[victim.kind.idx()] * 10 - PIECE_VALUES[mv.piece.kind.idx()];
        }
        if let Some(kind) = mv.promotion {
            key += PIECE_VALUES[kind.idx()];
        }
        key
    }
}

pub const MAN_VALUE: i32 = 100;
pub const KING_VALUE: i32 = 160;
/// Per row a man has advanced towards its crowning row.
pub const ADVANCE_BONUS: i32 = 5;

impl Evaluate for CheckersBoard {
    fn evaluate(&self, perspective: Color) -> i32 {
        let mut score = 0i32;
        for (sq, pc) in self.pieces() {
            let value = if pc.crowned {
                KING_VALUE
            } else {
                let advanced = (sq.rank() - pc.color.home_rank()).abs() as i32;
                MAN_VALUE + ADVANCE_BONUS * advanced
            };
            score += signed(value, pc.color);
        }
        signed(score, perspective)
    }

    fn order_key(&self, mv: &CheckersMove) -> i32 {
        let mut key = mv.capture_count() as i32 * 1_000;
        if mv.crowns {
            key += KING_VALUE - MAN_VALUE;
        }
        key
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
