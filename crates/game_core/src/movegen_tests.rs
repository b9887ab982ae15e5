use super::*;
use crate::legality::legal_moves;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn from(pos: &Position, square: &str) -> Vec<Move> {
    let mut out = Vec::new();
    pseudo_moves_from(pos, sq(square), &mut out);
    out
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
}

#[test]
fn test_blocked_pawn_has_no_pushes() {
    let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - -").unwrap();
    assert!(from(&pos, "e2").is_empty());
}

#[test]
fn test_knight_in_corner() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/N3K3 w - -").unwrap();
    let mut targets: Vec<String> = from(&pos, "a1").iter().map(|m| m.to.to_string()).collect();
    targets.sort();
    assert_eq!(targets, ["b3", "c2"]);
}

#[test]
fn test_slider_stops_at_own_piece_and_after_capture() {
    let pos = Position::from_fen("4k3/8/8/8/8/P7/8/R2nK3 w - -").unwrap();
    let moves = from(&pos, "a1");
    assert_eq!(moves.len(), 4); // a2, b1, c1, xd1
    let captures: Vec<&Move> = moves.iter().filter(|m| m.is_capture()).collect();
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].to, sq("d1"));
    assert_eq!(
        captures[0].captured,
        Some(Piece::new(Color::Black, PieceKind::Knight))
    );
}

#[test]
fn test_en_passant_candidate() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let moves = from(&pos, "e5");
    assert_eq!(moves.len(), 2);
    let ep = moves.iter().find(|m| m.en_passant).unwrap();
    assert_eq!(ep.to, sq("d6"));
    assert_eq!(ep.capture_square(), sq("d5"));
    assert_eq!(ep.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
}

#[test]
fn test_promotions_expand_to_four_kinds() {
    let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - -").unwrap();
    let kinds: Vec<Option<PieceKind>> = from(&pos, "a7").iter().map(|m| m.promotion).collect();
    assert_eq!(kinds.len(), 4);
    for kind in PieceKind::PROMOTIONS {
        assert!(kinds.contains(&Some(kind)));
    }
}

#[test]
fn test_castle_available_on_clear_path() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let castles: Vec<Move> = from(&pos, "e1").into_iter().filter(|m| m.castle.is_some()).collect();
    assert_eq!(castles.len(), 1);
    assert_eq!(castles[0].to, sq("g1"));
}

#[test]
fn test_no_castle_through_attacked_square() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/5r2/4K2R w K - 0 1").unwrap();
    assert!(from(&pos, "e1").iter().all(|m| m.castle.is_none()));
}

#[test]
fn test_no_castle_out_of_check() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/4r3/4K2R w K - 0 1").unwrap();
    assert!(from(&pos, "e1").iter().all(|m| m.castle.is_none()));
}

#[test]
fn test_no_castle_without_right_or_with_blocker() {
    let no_right = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    assert!(from(&no_right, "e1").iter().all(|m| m.castle.is_none()));

    let blocked = Position::from_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").unwrap();
    assert!(from(&blocked, "e1").iter().all(|m| m.castle.is_none()));
}
