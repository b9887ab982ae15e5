use super::*;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_in_check_detection() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
    assert!(pos.in_check(Color::White));
    assert!(!pos.in_check(Color::Black));
}

#[test]
fn test_pawn_attacks_point_forward() {
    let pos = Position::from_fen("4k3/8/8/8/8/3p4/8/4K3 w - - 0 1").unwrap();
    // A black pawn on d3 hits c2 and e2, not the squares behind it
    assert!(pos.is_square_attacked(sq("e2"), Color::Black));
    assert!(pos.is_square_attacked(sq("c2"), Color::Black));
    assert!(!pos.is_square_attacked(sq("e4"), Color::Black));
    assert!(!pos.is_square_attacked(sq("d2"), Color::Black));
}

#[test]
fn test_sliders_are_blocked() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K2r w - - 0 1").unwrap();
    assert!(pos.in_check(Color::White));
    let blocked = Position::from_fen("4k3/8/8/8/8/8/8/4KB1r w - - 0 1").unwrap();
    assert!(!blocked.in_check(Color::White));
}

#[test]
fn test_pinned_piece_cannot_move() {
    let pos = Position::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves_from(&pos, sq("e2")).is_empty());
}

#[test]
fn test_must_answer_check() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/4r3/R3K3 w - - 0 1").unwrap();
    for mv in legal_moves(&pos) {
        let mut next = pos.clone();
        next.make_move(mv);
        assert!(!next.in_check(Color::White), "{mv:?} leaves the king attacked");
    }
    // The rook on a1 can't help, only the king moves
    assert!(legal_moves_from(&pos, sq("a1")).is_empty());
}

#[test]
fn test_back_rank_mate() {
    let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert!(pos.in_check(Color::Black));
    assert!(pos.is_checkmate(Color::Black));
    assert!(!pos.is_stalemate(Color::Black));
    assert!(legal_moves(&pos).is_empty());
    for (from, _) in pos.pieces().filter(|(_, pc)| pc.color == Color::Black) {
        assert!(legal_moves_from(&pos, from).is_empty());
    }
}

#[test]
fn test_stalemate() {
    let pos = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();
    assert!(!pos.in_check(Color::Black));
    assert!(pos.is_stalemate(Color::Black));
    assert!(!pos.is_checkmate(Color::Black));
    assert!(legal_moves(&pos).is_empty());
}

#[test]
fn test_queries_do_not_mutate() {
    let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    let before = pos.clone();
    let _ = pos.is_checkmate(Color::Black);
    let _ = legal_moves_for(&pos, Color::White);
    let _ = legal_moves_from(&pos, sq("g8"));
    assert_eq!(pos, before);
}

#[test]
fn test_moves_for_side_not_on_move() {
    let pos = Position::startpos();
    assert_eq!(legal_moves_for(&pos, Color::Black).len(), 20);
    assert_eq!(pos.side_to_move, Color::White);
}

#[test]
fn test_walk_keeps_invariants() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let mut pos = Position::from_fen(fen).unwrap();
        for ply in 0..40usize {
            let moves = legal_moves(&pos);
            if moves.is_empty() {
                break;
            }
            for &mv in &moves {
                let before = pos.clone();
                let undo = pos.make_move(mv);
                assert!(!pos.in_check(mv.piece.color), "{fen}: {mv:?} is illegal");
                assert!(pos.validate().is_ok());
                pos.unmake_move(mv, undo);
                assert_eq!(pos, before, "{fen}: unmake of {mv:?} differs");
            }
            let pick = moves[(ply * 7 + 3) % moves.len()];
            pos.make_move(pick);
        }
    }
}
