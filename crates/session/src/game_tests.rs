use super::*;
use game_core::CoreError;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn play(game: &mut GameState, moves: &[&str]) -> MoveStatus {
    let mut status = MoveStatus::Continue;
    for txt in moves {
        status = game
            .submit_move(sq(&txt[0..2]), sq(&txt[2..4]), None)
            .unwrap_or_else(|r| panic!("{txt} rejected: {r}"))
            .status;
    }
    status
}

fn assert_round_trip(fen: &str, from: &str, to: &str, promotion: Option<PieceKind>) {
    let mut game = GameState::from_fen(fen).unwrap();
    let before = game.clone();
    let report = game.submit_move(sq(from), sq(to), promotion).unwrap();
    assert!(report.applied.is_some());
    assert_ne!(game, before);

    let undone = game.undo().unwrap().unwrap();
    assert_eq!(undone.mv.from, sq(from));
    assert_eq!(game, before, "{fen}: {from}{to}");
}

#[test]
fn test_not_started_rejects_moves() {
    let mut game = GameState::new();
    assert_eq!(game.submit_move(sq("e2"), sq("e4"), None), Err(Rejection::NotStarted));
    assert!(game.legal_moves(sq("e2")).is_empty());
    game.start();
    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.legal_moves(sq("e2")).len(), 2);
}

#[test]
fn test_simple_move() {
    let mut game = GameState::started();
    let report = game.submit_move(sq("e2"), sq("e4"), None).unwrap();
    assert_eq!(report.status, MoveStatus::Continue);
    assert_eq!(report.applied.unwrap().notation, "e2e4");
    assert_eq!(game.move_count(), 1);
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.position().en_passant, Some(sq("e3")));
    assert_eq!(&report.position, game.position());
}

#[test]
fn test_invalid_requests_leave_state_alone() {
    let mut game = GameState::started();
    let before = game.clone();
    assert_eq!(game.submit_move(sq("e3"), sq("e4"), None), Err(Rejection::EmptySquare));
    assert_eq!(game.submit_move(sq("e7"), sq("e5"), None), Err(Rejection::NotYourPiece));
    assert_eq!(game.submit_move(sq("e2"), sq("e5"), None), Err(Rejection::IllegalMove));
    assert_eq!(game.submit_move(sq("e1"), sq("e2"), None), Err(Rejection::IllegalMove));
    assert_eq!(game, before);
}

#[test]
fn test_legal_moves_only_for_side_to_move() {
    let game = GameState::started();
    assert_eq!(game.legal_moves(sq("g1")).len(), 2);
    assert!(game.legal_moves(sq("g8")).is_empty());
    assert!(game.legal_moves(sq("e4")).is_empty());
}

#[test]
fn test_undo_round_trips() {
    // ordinary
    assert_round_trip("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", "g1", "f3", None);
    // capture of a castling rook
    assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "a1", "a8", None);
    // en passant
    assert_round_trip("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5", "d6", None);
    // castling both ways
    assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1", "g1", None);
    assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8", "c8", None);
    // promotion given up front
    assert_round_trip("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7", "a8", Some(PieceKind::Knight));
}

#[test]
fn test_en_passant_capture_removes_passed_pawn() {
    let mut game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let report = game.submit_move(sq("e5"), sq("d6"), None).unwrap();
    let record = report.applied.unwrap();
    assert!(record.mv.en_passant);
    assert_eq!(record.notation, "e5xd6");
    assert_eq!(game.position().piece_at(sq("d5")), None);
    assert_eq!(game.position().piece_at(sq("d6")).map(|p| p.color), Some(Color::White));
}

#[test]
fn test_undo_restores_castling_rights() {
    let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut game, &["h1g1", "e8d8"]);
    let rights = game.position().castling;
    assert!(!rights.allows(Color::White, game_core::CastleSide::Kingside));
    assert!(!rights.allows(Color::Black, game_core::CastleSide::Queenside));

    game.undo().unwrap();
    game.undo().unwrap();
    assert_eq!(game.position().castling, game_core::CastlingRights::ALL);
}

#[test]
fn test_promotion_is_two_phase() {
    let mut game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let before_position = game.position().clone();

    let report = game.submit_move(sq("a7"), sq("a8"), None).unwrap();
    assert_eq!(report.status, MoveStatus::PromotionPending);
    assert!(report.applied.is_none());
    assert_eq!(game.position(), &before_position);
    assert_eq!(game.move_count(), 0);
    assert!(game.pending_promotion().is_some());

    // Nothing else goes through while the choice is open
    assert_eq!(game.submit_move(sq("e1"), sq("d1"), None), Err(Rejection::PromotionPending));
    assert_eq!(game.undo(), Err(Rejection::PromotionPending));
    assert_eq!(game.complete_promotion(PieceKind::King), Err(Rejection::InvalidPromotion));
    assert!(game.pending_promotion().is_some());

    let report = game.complete_promotion(PieceKind::Queen).unwrap();
    assert_eq!(report.status, MoveStatus::Check);
    assert_eq!(report.applied.unwrap().notation, "a7a8=Q");
    assert_eq!(
        game.position().piece_at(sq("a8")).map(|p| p.kind),
        Some(PieceKind::Queen)
    );
    assert_eq!(game.pending_promotion(), None);
    assert_eq!(game.complete_promotion(PieceKind::Queen), Err(Rejection::NoPendingPromotion));
}

#[test]
fn test_promotion_piece_on_plain_move_is_rejected() {
    let mut game = GameState::started();
    let before = game.clone();
    assert_eq!(
        game.submit_move(sq("e2"), sq("e4"), Some(PieceKind::Queen)),
        Err(Rejection::InvalidPromotion)
    );
    assert_eq!(game, before);
}

#[test]
fn test_check_status() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    assert_eq!(play(&mut game, &["a1a8"]), MoveStatus::Check);
    assert!(game.in_check());
    assert_eq!(game.phase(), Phase::InProgress);
}

#[test]
fn test_checkmate_terminates() {
    let mut game = GameState::started();
    let status = play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(status, MoveStatus::Checkmate);
    assert_eq!(
        game.phase(),
        Phase::Terminated(TerminationReason::Checkmate {
            winner: Color::Black
        })
    );
    assert_eq!(game.records().last().unwrap().notation, "d8h4");

    let before = game.clone();
    assert_eq!(game.submit_move(sq("e1"), sq("f2"), None), Err(Rejection::GameOver));
    assert_eq!(game.undo(), Err(Rejection::GameOver));
    assert_eq!(game.resign(Color::White), Err(Rejection::GameOver));
    assert_eq!(game, before);
}

#[test]
fn test_stalemate_terminates() {
    let mut game = GameState::from_fen("k7/8/2Q5/8/8/8/8/1K6 w - - 0 1").unwrap();
    assert_eq!(play(&mut game, &["c6b6"]), MoveStatus::Stalemate);
    assert_eq!(game.phase(), Phase::Terminated(TerminationReason::Stalemate));
    assert_eq!(TerminationReason::Stalemate.winner(), None);
}

#[test]
fn test_undo_on_fresh_game_is_noop() {
    let mut game = GameState::started();
    let before = game.clone();
    assert_eq!(game.undo(), Ok(None));
    assert_eq!(game, before);
}

#[test]
fn test_resign_and_timeout() {
    let mut game = GameState::started();
    assert_eq!(
        game.resign(Color::White),
        Ok(TerminationReason::Resignation {
            winner: Color::Black
        })
    );
    assert!(game.is_over());

    let mut game = GameState::started();
    let reason = game.flag_timeout(Color::Black).unwrap();
    assert_eq!(reason.winner(), Some(Color::White));
    assert_eq!(game.flag_timeout(Color::White), Err(Rejection::GameOver));
}

#[test]
fn test_apply_move_checks_legality() {
    let mut game = GameState::started();
    // A rook lift that is fine on an open board but blocked at the start
    let other = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let foreign = legal_moves(&other).into_iter().find(|m| m.from == sq("a1")).unwrap();
    assert_eq!(game.apply_move(foreign), Err(Rejection::IllegalMove));

    let mv = legal_moves(game.position())[0];
    assert!(game.apply_move(mv).is_ok());
}

#[test]
fn test_positions_need_both_kings() {
    assert!(matches!(
        GameState::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
        Err(CoreError::KingCount { .. })
    ));
    // Already mated on arrival
    let game = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert!(game.is_over());
}
