use crate::position::Position;

fn san_of(fen: &str, text: &str) -> String {
    let pos = Position::from_fen(fen).unwrap();
    let mv = pos.parse_move(text).unwrap();
    pos.describe(mv).unwrap().san
}

#[test]
fn test_simple_moves() {
    let pos = Position::startpos();
    let e4 = pos.parse_move("e2e4").unwrap();
    let nf3 = pos.parse_move("g1f3").unwrap();
    assert_eq!(pos.describe(e4).unwrap().san, "e4");
    assert_eq!(pos.describe(nf3).unwrap().san, "Nf3");
}

#[test]
fn test_capture_with_mate() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    assert_eq!(san_of(fen, "h5f7"), "Qxf7#");
}

#[test]
fn test_file_disambiguation() {
    let fen = "4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1";
    assert_eq!(san_of(fen, "b1d2"), "Nbd2");
    assert_eq!(san_of(fen, "f1d2"), "Nfd2");
}

#[test]
fn test_rank_disambiguation() {
    let fen = "4k3/8/8/R7/8/8/8/R3K3 w - - 0 1";
    assert_eq!(san_of(fen, "a1a3"), "R1a3");
    assert_eq!(san_of(fen, "a5a3"), "R5a3");
}

#[test]
fn test_promotion_with_check() {
    assert_eq!(san_of("7k/P7/8/8/8/8/8/K7 w - - 0 1", "a7a8q"), "a8=Q+");
}

#[test]
fn test_castling_notation() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    assert_eq!(san_of(fen, "e1g1"), "O-O");
    assert_eq!(san_of(fen, "e1c1"), "O-O-O");
}

#[test]
fn test_coordinate_text_shows_king_step_for_castling() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = pos.parse_move("e1g1").unwrap();
    let info = pos.describe(mv).unwrap();
    assert_eq!(crate::coordinate_text(&info), "e1g1");

    let promo = Position::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
    let mv = promo.parse_move("a7a8").unwrap();
    assert_eq!(crate::coordinate_text(&promo.describe(mv).unwrap()), "a7a8q");
}
