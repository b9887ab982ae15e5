//! Attack detection and the legality filter.
//!
//! A pseudo-legal move is legal when, after playing it on the position, the
//! mover's king is not attacked. Check, checkmate and stalemate are answered
//! from the same primitives and never modify the position they are asked about.

use crate::board::Position;
use crate::movegen::{
    DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, pseudo_moves_for, pseudo_moves_from,
};
use crate::types::*;

impl Position {
    /// Whether any piece of colour `by` attacks `target`, using the same
    /// geometry as move generation (sliders need a clear path).
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let attacker_at = |sq: Option<Square>, kinds: &[PieceKind]| {
            sq.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn of `by` attacks diagonally forward, so look one rank behind
        let back = -by.forward();
        if attacker_at(target.offset(-1, back), &[PieceKind::Pawn])
            || attacker_at(target.offset(1, back), &[PieceKind::Pawn])
        {
            return true;
        }

        if KNIGHT_DELTAS
            .iter()
            .any(|&(df, dr)| attacker_at(target.offset(df, dr), &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_DELTAS
            .iter()
            .any(|&(df, dr)| attacker_at(target.offset(df, dr), &[PieceKind::King]))
        {
            return true;
        }

        self.ray_hits(target, by, &DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen])
            || self.ray_hits(target, by, &ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen])
    }

    fn ray_hits(&self, target: Square, by: Color, dirs: &[(i8, i8)], kinds: &[PieceKind]) -> bool {
        for &(df, dr) in dirs {
            let mut cur = target;
            while let Some(sq) = cur.offset(df, dr) {
                if let Some(pc) = self.piece_at(sq) {
                    if pc.color == by && kinds.contains(&pc.kind) {
                        return true;
                    }
                    break;
                }
                cur = sq;
            }
        }
        false
    }

    /// True when `c`'s king is attacked on the current board.
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// Play `mv`, test the mover's king, take it back.
    pub fn is_legal(&mut self, mv: Move) -> bool {
        let undo = self.make_move(mv);
        let legal = !self.in_check(mv.piece.color);
        self.unmake_move(mv, undo);
        legal
    }

    pub fn has_legal_move(&self, c: Color) -> bool {
        let mut tmp = self.clone();
        let mut moves = Vec::with_capacity(64);
        pseudo_moves_for(&tmp, c, &mut moves);
        moves.into_iter().any(|mv| tmp.is_legal(mv))
    }

    pub fn is_checkmate(&self, c: Color) -> bool {
        self.in_check(c) && !self.has_legal_move(c)
    }

    pub fn is_stalemate(&self, c: Color) -> bool {
        !self.in_check(c) && !self.has_legal_move(c)
    }
}

/// Generate all legal moves for the side to move.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves for the side to move into the provided buffer,
/// reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    let mover = pos.side_to_move;
    pseudo_moves_for(pos, mover, out);
    out.retain(|&mv| pos.is_legal(mv));
}

/// Legal moves for every piece of `color`, whether or not it is their turn.
pub fn legal_moves_for(pos: &Position, color: Color) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    pseudo_moves_for(&tmp, color, &mut out);
    out.retain(|&mv| tmp.is_legal(mv));
    out
}

/// Legal moves of the piece on `from`; empty if the square is empty.
pub fn legal_moves_from(pos: &Position, from: Square) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(28);
    pseudo_moves_from(&tmp, from, &mut out);
    out.retain(|&mv| tmp.is_legal(mv));
    out
}

#[cfg(test)]
#[path = "legality_tests.rs"]
mod legality_tests;
