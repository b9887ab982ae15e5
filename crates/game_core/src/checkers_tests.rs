use super::*;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_startpos_layout() {
    let board = CheckersBoard::startpos();
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.pieces().filter(|(_, pc)| pc.color == Color::White).count(), 12);
    assert_eq!(board.pieces().filter(|(_, pc)| pc.color == Color::Black).count(), 12);
    assert!(board.pieces().all(|(sq, _)| is_dark(sq)));
    assert_eq!(board.legal_moves().len(), 7);
}

#[test]
fn test_capture_is_compulsory() {
    let board = CheckersBoard::with_pieces(
        Color::White,
        &[
            (sq("c3"), Checker::man(Color::White)),
            (sq("a1"), Checker::man(Color::White)),
            (sq("d4"), Checker::man(Color::Black)),
        ],
    );
    let moves = board.legal_moves();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to, sq("e5"));
    assert_eq!(moves[0].captured_squares().collect::<Vec<_>>(), [sq("d4")]);
    assert_eq!(moves[0].to_string(), "c3xe5");
}

#[test]
fn test_multi_jump_is_one_move() {
    let board = CheckersBoard::with_pieces(
        Color::White,
        &[
            (sq("a1"), Checker::man(Color::White)),
            (sq("b2"), Checker::man(Color::Black)),
            (sq("d4"), Checker::man(Color::Black)),
        ],
    );
    let moves = board.legal_moves();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].from, sq("a1"));
    assert_eq!(moves[0].to, sq("e5"));
    assert_eq!(moves[0].capture_count(), 2);
}

#[test]
fn test_crowning_ends_the_chain() {
    let board = CheckersBoard::with_pieces(
        Color::White,
        &[
            (sq("b6"), Checker::man(Color::White)),
            (sq("c7"), Checker::man(Color::Black)),
            (sq("e7"), Checker::man(Color::Black)),
        ],
    );
    let moves = board.legal_moves();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].to, sq("d8"));
    assert!(moves[0].crowns);
    assert_eq!(moves[0].capture_count(), 1);

    let mut next = board.clone();
    next.apply(moves[0]);
    assert_eq!(next.piece_at(sq("d8")), Some(Checker::king(Color::White)));
    assert_eq!(next.piece_at(sq("e7")), Some(Checker::man(Color::Black)));
}

#[test]
fn test_men_only_move_forward() {
    let board = CheckersBoard::with_pieces(Color::Black, &[(sq("d4"), Checker::man(Color::Black))]);
    let mut targets: Vec<String> = board.legal_moves().iter().map(|m| m.to.to_string()).collect();
    targets.sort();
    assert_eq!(targets, ["c3", "e3"]);

    let king = CheckersBoard::with_pieces(Color::Black, &[(sq("d4"), Checker::king(Color::Black))]);
    assert_eq!(king.legal_moves().len(), 4);
}

#[test]
fn test_apply_and_revert() {
    let original = CheckersBoard::with_pieces(
        Color::White,
        &[
            (sq("a1"), Checker::man(Color::White)),
            (sq("b2"), Checker::man(Color::Black)),
            (sq("d4"), Checker::king(Color::Black)),
        ],
    );
    let mut board = original.clone();
    let mv = board.legal_moves()[0];
    let undo = board.apply(mv);
    assert_eq!(board.pieces().count(), 1);
    assert_eq!(board.side_to_move(), Color::Black);
    board.revert(mv, undo);
    assert_eq!(board, original);
}

#[test]
fn test_side_without_moves_loses() {
    let mut board = CheckersBoard::with_pieces(Color::Black, &[(sq("a1"), Checker::man(Color::White))]);
    assert_eq!(board.outcome(), Some(Outcome::Loss));

    // Blocked in the corner also counts
    let mut blocked = CheckersBoard::with_pieces(
        Color::White,
        &[
            (sq("a1"), Checker::man(Color::White)),
            (sq("b2"), Checker::man(Color::Black)),
            (sq("c3"), Checker::man(Color::Black)),
        ],
    );
    assert_eq!(blocked.outcome(), Some(Outcome::Loss));
    assert_eq!(CheckersBoard::startpos().outcome(), None);
}
