//! End-to-end rule scenarios played through the public API.

use game_core::{
    CastleSide, Color, PieceKind, Position, Ruleset, Outcome, legal_moves, parse_coordinate_move,
};

fn play(pos: &mut Position, moves: &[&str]) {
    for txt in moves {
        let mv = parse_coordinate_move(pos, txt)
            .unwrap_or_else(|| panic!("{txt} should be legal in {}", pos.to_fen()));
        pos.make_move(mv);
    }
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut pos = Position::startpos();
    play(&mut pos, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(pos.en_passant, Some("d6".parse().unwrap()));

    let ep = parse_coordinate_move(&pos, "e5d6").unwrap();
    assert!(ep.en_passant);
    pos.make_move(ep);
    assert_eq!(pos.piece_at("d5".parse().unwrap()), None);
    assert_eq!(
        pos.piece_at("d6".parse().unwrap()).map(|pc| pc.kind),
        Some(PieceKind::Pawn)
    );
}

#[test]
fn en_passant_expires_after_one_turn() {
    let mut pos = Position::startpos();
    play(&mut pos, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert!(parse_coordinate_move(&pos, "e5d6").is_none());
}

#[test]
fn moved_king_never_castles_again() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut pos, &["e1f1", "e8d8", "f1e1", "d8e8"]);
    assert!(!pos.castling.allows(Color::White, CastleSide::Kingside));
    assert!(!pos.castling.allows(Color::Black, CastleSide::Queenside));
    assert!(legal_moves(&pos).iter().all(|m| m.castle.is_none()));
}

#[test]
fn fools_mate_ends_the_game() {
    let mut pos = Position::startpos();
    play(&mut pos, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(pos.is_checkmate(Color::White));
    assert_eq!(pos.outcome(), Some(Outcome::Loss));
}

#[test]
fn stalemate_is_a_draw() {
    let mut pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(pos.outcome(), Some(Outcome::Draw));
}
