//! Checkers (English draughts) on the same 8x8 board.
//!
//! Pieces live on the dark squares (a1 is dark). Men step diagonally forward
//! and capture forward; crowned kings step and capture in all four diagonal
//! directions. Capturing is compulsory, and a capture must be continued while
//! another jump is available. A man that lands on the far row is crowned and
//! its turn ends there. A side left without moves loses.

use std::fmt;

use crate::ruleset::{Outcome, Ruleset};
use crate::types::{Color, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checker {
    pub color: Color,
    pub crowned: bool,
}

impl Checker {
    pub const fn man(color: Color) -> Self {
        Self {
            color,
            crowned: false,
        }
    }
    pub const fn king(color: Color) -> Self {
        Self {
            color,
            crowned: true,
        }
    }

    fn directions(self) -> &'static [(i8, i8)] {
        const UP: [(i8, i8); 2] = [(-1, 1), (1, 1)];
        const DOWN: [(i8, i8); 2] = [(-1, -1), (1, -1)];
        const ALL: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];
        match (self.crowned, self.color) {
            (true, _) => &ALL,
            (false, Color::White) => &UP,
            (false, Color::Black) => &DOWN,
        }
    }
}

/// A complete turn: a single step or a whole jump chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CheckersMove {
    pub from: Square,
    pub to: Square,
    /// Bit set (by square index) of every piece jumped in the chain.
    pub captured: u64,
    /// The moving man is crowned on arrival.
    pub crowns: bool,
}

impl CheckersMove {
    pub fn capture_count(&self) -> u32 {
        self.captured.count_ones()
    }

    pub fn captured_squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(|sq| self.captured & (1u64 << sq.index()) != 0)
    }
}

impl fmt::Display for CheckersMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.captured != 0 { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.from, self.to)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckersUndo {
    moved: Checker,
    captured: Vec<(Square, Checker)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CheckersBoard {
    cells: [Option<Checker>; 64],
    side_to_move: Color,
}

pub fn is_dark(sq: Square) -> bool {
    (sq.file() + sq.rank()) % 2 == 0
}

impl Default for CheckersBoard {
    fn default() -> Self {
        Self::startpos()
    }
}

impl CheckersBoard {
    pub fn empty(side_to_move: Color) -> Self {
        Self {
            cells: [None; 64],
            side_to_move,
        }
    }

    /// Twelve men each on the three nearest rows of dark squares; Black opens.
    pub fn startpos() -> Self {
        let mut board = Self::empty(Color::Black);
        for sq in Square::all().filter(|&sq| is_dark(sq)) {
            match sq.rank() {
                0..=2 => board.set(sq, Some(Checker::man(Color::White))),
                5..=7 => board.set(sq, Some(Checker::man(Color::Black))),
                _ => {}
            }
        }
        board
    }

    pub fn with_pieces(side_to_move: Color, pieces: &[(Square, Checker)]) -> Self {
        let mut board = Self::empty(side_to_move);
        for &(sq, pc) in pieces {
            board.set(sq, Some(pc));
        }
        board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn piece_at(&self, sq: Square) -> Option<Checker> {
        self.cells[sq.index()]
    }

    pub fn set(&mut self, sq: Square, pc: Option<Checker>) {
        self.cells[sq.index()] = pc;
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Checker)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    fn crowns_on(pc: Checker, sq: Square) -> bool {
        !pc.crowned && sq.rank() == pc.color.other().home_rank()
    }

    /// All moves for the side to move; jumps only, if any jump exists.
    pub fn legal_moves(&self) -> Vec<CheckersMove> {
        let mut captures = Vec::new();
        let mut steps = Vec::new();
        for (sq, pc) in self.pieces() {
            if pc.color != self.side_to_move {
                continue;
            }
            self.jump_chains(sq, sq, pc, 0, &mut captures);
            if captures.is_empty() {
                self.steps_from(sq, pc, &mut steps);
            }
        }
        if captures.is_empty() { steps } else { captures }
    }

    fn steps_from(&self, from: Square, pc: Checker, out: &mut Vec<CheckersMove>) {
        for &(df, dr) in pc.directions() {
            if let Some(to) = from.offset(df, dr)
                && self.piece_at(to).is_none()
            {
                out.push(CheckersMove {
                    from,
                    to,
                    captured: 0,
                    crowns: Self::crowns_on(pc, to),
                });
            }
        }
    }

    /// Depth-first walk of every maximal jump chain starting at `origin`.
    /// Jumped pieces stay on the board until the move is made, so none can be
    /// jumped twice.
    fn jump_chains(
        &self,
        origin: Square,
        cur: Square,
        pc: Checker,
        captured: u64,
        out: &mut Vec<CheckersMove>,
    ) {
        let mut extended = false;
        for &(df, dr) in pc.directions() {
            let (Some(over), Some(land)) = (cur.offset(df, dr), cur.offset(2 * df, 2 * dr)) else {
                continue;
            };
            let bit = 1u64 << over.index();
            let jumps_enemy = self
                .piece_at(over)
                .is_some_and(|victim| victim.color != pc.color && captured & bit == 0);
            let lands_free = self.piece_at(land).is_none() || land == origin;
            if !jumps_enemy || !lands_free {
                continue;
            }

            extended = true;
            if Self::crowns_on(pc, land) {
                push_unique(
                    out,
                    CheckersMove {
                        from: origin,
                        to: land,
                        captured: captured | bit,
                        crowns: true,
                    },
                );
            } else {
                self.jump_chains(origin, land, pc, captured | bit, out);
            }
        }

        if !extended && captured != 0 {
            push_unique(
                out,
                CheckersMove {
                    from: origin,
                    to: cur,
                    captured,
                    crowns: false,
                },
            );
        }
    }

    pub fn apply(&mut self, mv: CheckersMove) -> CheckersUndo {
        let moved = self.piece_at(mv.from).unwrap_or(Checker::man(self.side_to_move));
        let captured: Vec<(Square, Checker)> = mv
            .captured_squares()
            .filter_map(|sq| self.piece_at(sq).map(|pc| (sq, pc)))
            .collect();
        for &(sq, _) in &captured {
            self.set(sq, None);
        }
        self.set(mv.from, None);
        self.set(
            mv.to,
            Some(Checker {
                crowned: moved.crowned || mv.crowns,
                ..moved
            }),
        );
        self.side_to_move = self.side_to_move.other();
        CheckersUndo { moved, captured }
    }

    pub fn revert(&mut self, mv: CheckersMove, undo: CheckersUndo) {
        self.side_to_move = self.side_to_move.other();
        self.set(mv.to, None);
        self.set(mv.from, Some(undo.moved));
        for (sq, pc) in undo.captured {
            self.set(sq, Some(pc));
        }
    }
}

fn push_unique(out: &mut Vec<CheckersMove>, mv: CheckersMove) {
    if !out.contains(&mv) {
        out.push(mv);
    }
}

impl Ruleset for CheckersBoard {
    type Move = CheckersMove;
    type Undo = CheckersUndo;

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn legal_moves_into(&mut self, out: &mut Vec<CheckersMove>) {
        out.clear();
        out.extend(self.legal_moves());
    }

    fn make_move(&mut self, mv: CheckersMove) -> CheckersUndo {
        self.apply(mv)
    }

    fn unmake_move(&mut self, mv: CheckersMove, undo: CheckersUndo) {
        self.revert(mv, undo)
    }

    fn is_capture(&self, mv: &CheckersMove) -> bool {
        mv.captured != 0
    }

    fn stuck_outcome(&self) -> Outcome {
        Outcome::Loss
    }
}

impl fmt::Display for CheckersBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8i8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8i8 {
                let ch = match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(Checker { color: Color::White, crowned: false }) => 'w',
                    Some(Checker { color: Color::White, crowned: true }) => 'W',
                    Some(Checker { color: Color::Black, crowned: false }) => 'b',
                    Some(Checker { color: Color::Black, crowned: true }) => 'B',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "checkers_tests.rs"]
mod checkers_tests;
