//! Pseudo-legal move generation.
//!
//! Moves produced here obey each piece's geometry and path blocking but may
//! leave the mover's own king attacked; [`crate::legality`] filters those out.

use crate::board::{Position, castle_squares, king_home, rook_home};
use crate::types::*;

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// All pseudo-legal moves for `color`, appended to `out`.
pub fn pseudo_moves_for(pos: &Position, color: Color, out: &mut Vec<Move>) {
    for (sq, pc) in pos.pieces() {
        if pc.color == color {
            gen_piece(pos, sq, pc, out);
        }
    }
}

/// Pseudo-legal moves of the piece standing on `from` (nothing if empty).
pub fn pseudo_moves_from(pos: &Position, from: Square, out: &mut Vec<Move>) {
    if let Some(pc) = pos.piece_at(from) {
        gen_piece(pos, from, pc, out);
    }
}

fn gen_piece(pos: &Position, sq: Square, pc: Piece, out: &mut Vec<Move>) {
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, sq, pc, out),
        PieceKind::Knight => gen_steps(pos, sq, pc, &KNIGHT_DELTAS, out),
        PieceKind::Bishop => gen_slider(pos, sq, pc, &DIAGONALS, out),
        PieceKind::Rook => gen_slider(pos, sq, pc, &ORTHOGONALS, out),
        PieceKind::Queen => {
            gen_slider(pos, sq, pc, &DIAGONALS, out);
            gen_slider(pos, sq, pc, &ORTHOGONALS, out);
        }
        PieceKind::King => {
            gen_steps(pos, sq, pc, &KING_DELTAS, out);
            gen_castle(pos, sq, pc, out);
        }
    }
}

fn push_pawn_move(mv: Move, out: &mut Vec<Move>) {
    if mv.to.rank() == mv.piece.color.other().home_rank() {
        for kind in PieceKind::PROMOTIONS {
            out.push(Move {
                promotion: Some(kind),
                ..mv
            });
        }
    } else {
        out.push(mv);
    }
}

fn gen_pawn(pos: &Position, from: Square, pc: Piece, out: &mut Vec<Move>) {
    let dir = pc.color.forward();
    let start_rank = pc.color.home_rank() + dir;

    // forward 1, then 2 from the start rank through an empty square
    if let Some(to) = from.offset(0, dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(Move::new(from, to, pc, None), out);

        if from.rank() == start_rank
            && let Some(to2) = from.offset(0, 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2, pc, None));
        }
    }

    // captures + en passant; the target only belongs to the side to move
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != pc.color => {
                push_pawn_move(Move::new(from, to, pc, Some(target)), out);
            }
            None if pos.en_passant == Some(to) && pos.side_to_move == pc.color => {
                let mut mv = Move::new(from, to, pc, None);
                mv.en_passant = true;
                mv.captured = pos.piece_at(mv.capture_square());
                if mv.captured.is_some_and(|c| c.color != pc.color) {
                    out.push(mv);
                }
            }
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: Square, pc: Piece, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc, None)),
                Some(target) if target.color != pc.color => {
                    out.push(Move::new(from, to, pc, Some(target)))
                }
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, pc: Piece, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc, None)),
                Some(target) if target.color != pc.color => {
                    out.push(Move::new(from, to, pc, Some(target)));
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

/// Castling candidates. The destination square itself is left to the
/// legality filter like any other king move.
fn gen_castle(pos: &Position, from: Square, pc: Piece, out: &mut Vec<Move>) {
    let color = pc.color;
    if from != king_home(color) || pos.in_check(color) {
        return;
    }
    let enemy = color.other();

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if !pos.castling.allows(color, side) {
            continue;
        }
        let rook_sq = rook_home(color, side);
        if pos.piece_at(rook_sq) != Some(Piece::new(color, PieceKind::Rook)) {
            continue;
        }

        let (king_to, _, rook_to) = castle_squares(color, side);
        let (lo, hi) = if rook_sq.file() < from.file() {
            (rook_sq.file() + 1, from.file())
        } else {
            (from.file() + 1, rook_sq.file())
        };
        let path_clear = (lo..hi).all(|f| {
            Square::new(f, from.rank()).is_some_and(|sq| pos.piece_at(sq).is_none())
        });
        // The square the king passes over is the rook's landing square
        if path_clear && !pos.is_square_attacked(rook_to, enemy) {
            let mut mv = Move::new(from, king_to, pc, None);
            mv.castle = Some(side);
            out.push(mv);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
