//! Move notation in and out.
//!
//! Output is coordinate notation: origin, `x` for captures, destination and
//! `=Q` style promotion suffix (`e7xf8=Q`); castling prints as `O-O` / `O-O-O`.
//! Input accepts the compact form `e2e4` / `e7e8q`.

use crate::board::Position;
use crate::legality::legal_moves;
use crate::types::*;

pub fn move_notation(mv: &Move) -> String {
    match mv.castle {
        Some(CastleSide::Kingside) => return "O-O".to_string(),
        Some(CastleSide::Queenside) => return "O-O-O".to_string(),
        None => {}
    }

    let mut s = mv.from.to_string();
    if mv.is_capture() {
        s.push('x');
    }
    s.push_str(&mv.to.to_string());
    if let Some(kind) = mv.promotion {
        s.push('=');
        s.push(kind.letter());
    }
    s
}

/// Split `e7e8q` into origin, destination and optional promotion kind.
pub fn parse_coordinates(txt: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    let txt = txt.trim();
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = txt[0..2].parse().ok()?;
    let to = txt[2..4].parse().ok()?;
    let promo = match txt[4..].chars().next() {
        Some(ch) => Some(PieceKind::from_letter(ch).filter(|k| k.is_promotion_target())?),
        None => None,
    };
    Some((from, to, promo))
}

/// Resolve coordinate text against the legal moves of the side to move, so
/// castling and en passant flags come from the generator.
pub fn parse_coordinate_move(pos: &Position, txt: &str) -> Option<Move> {
    let (from, to, promo) = parse_coordinates(txt)?;
    legal_moves(pos).into_iter().find(|m| {
        m.from == from && m.to == to && (m.promotion.is_none() || m.promotion == promo)
    })
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
