use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::*;

/// Castling permissions for one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastleFlags {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastleFlags {
    pub const BOTH: CastleFlags = CastleFlags {
        kingside: true,
        queenside: true,
    };
}

/// Castling permissions for both sides, indexed by [`Color::idx`].
///
/// During forward play a flag only ever goes from `true` to `false`; only
/// [`Position::unmake_move`] (and state rollback above it) turns one back on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    flags: [CastleFlags; 2],
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        flags: [CastleFlags::BOTH, CastleFlags::BOTH],
    };
    pub const NONE: CastlingRights = CastlingRights {
        flags: [
            CastleFlags {
                kingside: false,
                queenside: false,
            },
            CastleFlags {
                kingside: false,
                queenside: false,
            },
        ],
    };

    pub fn get(&self, color: Color) -> CastleFlags {
        self.flags[color.idx()]
    }

    pub fn allows(&self, color: Color, side: CastleSide) -> bool {
        let flags = self.get(color);
        match side {
            CastleSide::Kingside => flags.kingside,
            CastleSide::Queenside => flags.queenside,
        }
    }

    pub fn set(&mut self, color: Color, side: CastleSide, allowed: bool) {
        let flags = &mut self.flags[color.idx()];
        match side {
            CastleSide::Kingside => flags.kingside = allowed,
            CastleSide::Queenside => flags.queenside = allowed,
        }
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.set(color, side, false);
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.flags[color.idx()] = CastleFlags::default();
    }
}

/// Home square of the rook used for castling on `side`.
pub fn rook_home(color: Color, side: CastleSide) -> Square {
    let rank = color.home_rank() as u8;
    match side {
        CastleSide::Kingside => Square::at(7, rank),
        CastleSide::Queenside => Square::at(0, rank),
    }
}

pub fn king_home(color: Color) -> Square {
    Square::at(4, color.home_rank() as u8)
}

/// King destination and rook (from, to) for a castle.
pub fn castle_squares(color: Color, side: CastleSide) -> (Square, Square, Square) {
    let rank = color.home_rank() as u8;
    match side {
        CastleSide::Kingside => (Square::at(6, rank), Square::at(7, rank), Square::at(5, rank)),
        CastleSide::Queenside => (Square::at(2, rank), Square::at(0, rank), Square::at(3, rank)),
    }
}

/// A chess position: board, side to move, castling rights and en passant target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square passed over by a pawn that just advanced two ranks.
    pub en_passant: Option<Square>,
}

/// Delta needed to take back one [`Position::make_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undo {
    pub captured: Option<(Square, Piece)>,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub side_to_move: Color,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
        }
    }

    pub fn startpos() -> Self {
        let mut p = Position {
            castling: CastlingRights::ALL,
            ..Position::empty()
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            let f = f as u8;
            p.set_piece(Square::at(f, 1), Some(Piece::new(Color::White, PieceKind::Pawn)));
            p.set_piece(Square::at(f, 6), Some(Piece::new(Color::Black, PieceKind::Pawn)));
            p.set_piece(Square::at(f, 0), Some(Piece::new(Color::White, kind)));
            p.set_piece(Square::at(f, 7), Some(Piece::new(Color::Black, kind)));
        }
        p
    }

    /// Parse Forsyth-Edwards Notation. The clock fields are optional and ignored.
    pub fn from_fen(fen: &str) -> CoreResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(CoreError::fen("expected at least 4 fields"));
        }

        let mut pos = Position::empty();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(CoreError::fen("board section must have 8 ranks"));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_letter(ch)
                        .ok_or_else(|| CoreError::fen(format!("invalid piece char {ch:?}")))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let sq = Square::new(file, rank)
                        .ok_or_else(|| CoreError::fen(format!("rank {} overflows", rank + 1)))?;
                    pos.set_piece(sq, Some(Piece::new(color, kind)));
                    file += 1;
                }
                if file > 8 {
                    return Err(CoreError::fen(format!("too many files in rank {}", rank + 1)));
                }
            }
            if file != 8 {
                return Err(CoreError::fen(format!("not enough files in rank {}", rank + 1)));
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(CoreError::fen(format!("invalid side to move {other:?}"))),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (color, side) = match c {
                    'K' => (Color::White, CastleSide::Kingside),
                    'Q' => (Color::White, CastleSide::Queenside),
                    'k' => (Color::Black, CastleSide::Kingside),
                    'q' => (Color::Black, CastleSide::Queenside),
                    _ => return Err(CoreError::fen(format!("invalid castling char {c:?}"))),
                };
                pos.castling.set(color, side, true);
            }
        }

        pos.en_passant = match parts[3] {
            "-" => None,
            ep => Some(
                ep.parse()
                    .map_err(|_| CoreError::fen(format!("invalid en passant square {ep:?}")))?,
            ),
        };

        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::at(file, rank)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let before = out.len();
        for (color, side, ch) in [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ] {
            if self.castling.allows(color, side) {
                out.push(ch);
            }
        }
        if out.len() == before {
            out.push('-');
        }

        match self.en_passant {
            Some(ep) => out.push_str(&format!(" {ep}")),
            None => out.push_str(" -"),
        }
        out.push_str(" 0 1");
        out
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq.index()] = pc;
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Check the one-king-per-side invariant.
    pub fn validate(&self) -> CoreResult<()> {
        for color in Color::ALL {
            let count = self
                .pieces()
                .filter(|(_, pc)| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(CoreError::KingCount { color, count });
            }
        }
        Ok(())
    }

    /// Play a generated move on the board.
    ///
    /// Handles en passant removal, the castling rook, promotion (a pawn
    /// reaching the last rank without a chosen kind becomes a queen), rights
    /// and en passant bookkeeping, and flips the side to move.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = mv.piece;
        let color = moved.color;
        let undo = Undo {
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            side_to_move: self.side_to_move,
        };

        let cap_sq = mv.capture_square();
        let captured = self.piece_at(cap_sq).filter(|pc| pc.color != color);
        if mv.en_passant {
            self.set_piece(cap_sq, None);
        }

        self.set_piece(mv.from, None);
        let placed = if moved.kind == PieceKind::Pawn && mv.to.rank() == color.other().home_rank() {
            Piece::new(color, mv.promotion.unwrap_or(PieceKind::Queen))
        } else {
            moved
        };
        self.set_piece(mv.to, Some(placed));

        if let Some(side) = mv.castle {
            let (_, rook_from, rook_to) = castle_squares(color, side);
            let rook = self.piece_at(rook_from);
            self.set_piece(rook_from, None);
            self.set_piece(rook_to, rook);
        }

        // Rights: king moves clear both, rook leaving or captured on home clears one
        if moved.kind == PieceKind::King {
            self.castling.revoke_all(color);
        }
        for side in [CastleSide::Kingside, CastleSide::Queenside] {
            if moved.kind == PieceKind::Rook && mv.from == rook_home(color, side) {
                self.castling.revoke(color, side);
            }
            if let Some(cp) = captured
                && cp.kind == PieceKind::Rook
                && cap_sq == rook_home(cp.color, side)
            {
                self.castling.revoke(cp.color, side);
            }
        }

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (mv.to.rank() - mv.from.rank()).abs() == 2 {
            self.en_passant = Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2);
        }

        self.side_to_move = color.other();

        Undo {
            captured: captured.map(|pc| (cap_sq, pc)),
            ..undo
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = undo.side_to_move;
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;

        if let Some(side) = mv.castle {
            let (_, rook_from, rook_to) = castle_squares(mv.piece.color, side);
            let rook = self.piece_at(rook_to);
            self.set_piece(rook_to, None);
            self.set_piece(rook_from, rook);
        }

        // The original piece goes back, which also reverts a promotion
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(mv.piece));

        if let Some((sq, pc)) = undo.captured {
            self.set_piece(sq, Some(pc));
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let ch = self
                    .piece_at(Square::at(file, rank))
                    .map(Piece::fen_char)
                    .unwrap_or('.');
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
