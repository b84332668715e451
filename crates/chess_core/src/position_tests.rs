use super::*;

const CASTLING_FEN: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

#[test]
fn test_startpos_has_twenty_moves() {
    let pos = Position::startpos();
    assert_eq!(pos.legal_moves().len(), 20);
    assert_eq!(pos.legal_move_count(), 20);
    assert_eq!(pos.side_to_move(), Color::White);
}

#[test]
fn test_moves_scoped_to_square() {
    let pos = Position::startpos();
    assert_eq!(pos.legal_moves_from(Square::G1).len(), 2);
    assert_eq!(pos.legal_moves_from(Square::E2).len(), 2);
    assert!(pos.legal_moves_from(Square::E4).is_empty());
    assert!(pos.legal_moves_from(Square::E7).is_empty(), "black pieces cannot move on white's turn");
}

#[test]
fn test_fen_round_trip() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let pos = Position::from_fen(fen).unwrap();
    assert_eq!(pos.to_fen(), fen);
}

#[test]
fn test_invalid_fen_is_rejected() {
    let err = Position::from_fen("not a fen").unwrap_err();
    assert!(matches!(err, RulesError::InvalidFen { .. }));
}

#[test]
fn test_illegal_move_leaves_position_untouched() {
    let mut pos = Position::startpos();
    let before = pos.to_fen();
    let mv = Move {
        from: Square::E2,
        to: Square::E5,
        promotion: None,
    };

    let err = pos.play(mv).unwrap_err();
    assert!(matches!(err, RulesError::IllegalMove(_)));
    assert_eq!(pos.to_fen(), before);
}

#[test]
fn test_after_does_not_mutate() {
    let pos = Position::startpos();
    let mv = pos.parse_move("e2e4").unwrap();
    let next = pos.after(mv).unwrap();

    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(next.side_to_move(), Color::Black);
    assert_eq!(next.piece_at(Square::E4), Some((Color::White, Piece::Pawn)));
    assert_eq!(pos.piece_at(Square::E4), None);
}

#[test]
fn test_parse_move_maps_castling() {
    let pos = Position::from_fen(CASTLING_FEN).unwrap();
    let short = pos.parse_move("e1g1").unwrap();
    assert_eq!(short.from, Square::E1);
    assert_eq!(short.to, Square::H1);

    let long = pos.parse_move("e1c1").unwrap();
    assert_eq!(long.to, Square::A1);

    let info = pos.describe(short).unwrap();
    assert!(info.flags.castle);
    assert!(!info.flags.capture);
    assert_eq!(info.captured, None);
    assert_eq!(info.landing_square(), Square::G1);
    assert_eq!(pos.describe(long).unwrap().landing_square(), Square::C1);
}

#[test]
fn test_landing_square_of_plain_move() {
    let pos = Position::startpos();
    let info = pos.describe(pos.parse_move("g1f3").unwrap()).unwrap();
    assert_eq!(info.landing_square(), Square::F3);
}

#[test]
fn test_parse_move_defaults_promotion_to_queen() {
    let pos = Position::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
    let mv = pos.parse_move("a7a8").unwrap();
    assert_eq!(mv.promotion, Some(Piece::Queen));

    let knight = pos.parse_move("a7a8n").unwrap();
    assert_eq!(knight.promotion, Some(Piece::Knight));
}

#[test]
fn test_parse_move_rejects_garbage() {
    let pos = Position::startpos();
    assert!(matches!(pos.parse_move("e2"), Err(RulesError::InvalidMove(_))));
    assert!(matches!(pos.parse_move("z9e4"), Err(RulesError::InvalidMove(_))));
    assert!(matches!(pos.parse_move("e2e5"), Err(RulesError::IllegalMove(_))));
}

#[test]
fn test_parse_move_rejects_non_ascii_text() {
    let pos = Position::startpos();
    for text in ["e2eé", "é2e4", "e2e4é", "ｅ2e4"] {
        assert!(
            matches!(pos.parse_move(text), Err(RulesError::InvalidMove(_))),
            "{text}"
        );
    }
}

#[test]
fn test_en_passant_flags() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let mv = pos.parse_move("e5d6").unwrap();
    let info = pos.describe(mv).unwrap();

    assert!(info.flags.en_passant);
    assert!(info.flags.capture);
    assert_eq!(info.captured, Some(Piece::Pawn));
    assert_eq!(info.san, "exd6");
}

#[test]
fn test_checkmate_detection() {
    // Fool's mate
    let pos =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    assert!(pos.is_check());
    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());
    assert!(pos.is_game_over());
    assert!(pos.legal_moves().is_empty());
}

#[test]
fn test_stalemate_detection() {
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(!pos.is_check());
    assert!(pos.is_stalemate());
    assert!(pos.is_draw());
    assert!(pos.is_game_over());
}

#[test]
fn test_insufficient_material() {
    let bare = Position::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(bare.is_insufficient_material());

    let knight = Position::from_fen("8/8/8/4k3/8/8/8/3NK3 w - - 0 1").unwrap();
    assert!(knight.is_insufficient_material());

    let rook = Position::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 0 1").unwrap();
    assert!(!rook.is_insufficient_material());

    // Both bishops on dark squares (c1 and f8)
    let same_shade = Position::from_fen("5b2/8/8/4k3/8/8/8/2B1K3 w - - 0 1").unwrap();
    assert!(same_shade.is_insufficient_material());
}

#[test]
fn test_fifty_move_rule() {
    let pos = Position::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 100 80").unwrap();
    assert!(pos.is_fifty_move_draw());
    assert!(pos.is_draw());

    let fresh = Position::from_fen("8/8/8/4k3/8/8/8/R3K3 w - - 99 80").unwrap();
    assert!(!fresh.is_fifty_move_draw());
}

#[test]
fn test_verbose_moves_from_square() {
    let pos = Position::startpos();
    let infos = pos.verbose_moves_from(Square::B1);
    let sans: Vec<&str> = infos.iter().map(|i| i.san.as_str()).collect();
    assert_eq!(infos.len(), 2);
    assert!(sans.contains(&"Na3"));
    assert!(sans.contains(&"Nc3"));
    assert!(infos.iter().all(|i| i.piece == Piece::Knight && i.is_quiet()));
}
