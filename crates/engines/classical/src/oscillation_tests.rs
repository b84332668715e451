use super::*;
use crate::eval::MATE_SCORE;
use chess_core::{Move, Position, Square};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mv(from: Square, to: Square) -> Move {
    Move {
        from,
        to,
        promotion: None,
    }
}

/// Every legal move of `fen`, all scored the same.
fn flat(fen: &str, score: i32) -> Vec<ScoredMove> {
    Position::from_fen(fen)
        .unwrap()
        .verbose_moves()
        .into_iter()
        .map(|info| ScoredMove::exact(info, score))
        .collect()
}

fn find(scored: &[ScoredMove], from: Square, to: Square) -> Option<&ScoredMove> {
    scored.iter().find(|s| s.info.mv == mv(from, to))
}

const ROOK_ON_A4: &str = "4k3/8/8/8/R7/8/8/4K3 w - - 0 1";

#[test]
fn test_reversal_of_last_move_is_excluded() {
    let mut ctx = SearchContext::new();
    ctx.record_own_move(mv(Square::A1, Square::A4));

    let filtered = apply_filter(flat(ROOK_ON_A4, 0), &ctx, &SearchConfig::default());
    assert!(find(&filtered, Square::A4, Square::A1).is_none());
    assert!(find(&filtered, Square::E1, Square::D1).is_some());
}

#[test]
fn test_reversal_kept_when_it_is_the_only_move() {
    let mut ctx = SearchContext::new();
    ctx.record_own_move(mv(Square::A1, Square::A4));

    let only: Vec<ScoredMove> = flat(ROOK_ON_A4, 0)
        .into_iter()
        .filter(|s| s.info.mv == mv(Square::A4, Square::A1))
        .collect();
    let filtered = apply_filter(only, &ctx, &SearchConfig::default());
    assert_eq!(filtered.len(), 1);
}

#[test]
fn test_quiet_moves_of_the_same_piece_are_penalized() {
    let mut ctx = SearchContext::new();
    ctx.record_own_move(mv(Square::A1, Square::A4));
    let config = SearchConfig::default();

    let filtered = apply_filter(flat(ROOK_ON_A4, 0), &ctx, &config);
    assert_eq!(find(&filtered, Square::A4, Square::B4).unwrap().score, -config.shuffle_penalty);
    // Checks are not shuffling
    assert_eq!(find(&filtered, Square::A4, Square::A8).unwrap().score, 0);
    assert_eq!(find(&filtered, Square::A4, Square::E4).unwrap().score, 0);
    // Another piece is untouched
    assert_eq!(find(&filtered, Square::E1, Square::D2).unwrap().score, 0);
}

#[test]
fn test_repeated_keys_are_penalized() {
    let mut ctx = SearchContext::new();
    ctx.record_own_move(mv(Square::E1, Square::E2));
    ctx.record_own_move(mv(Square::E1, Square::E2));
    ctx.record_own_move(mv(Square::H7, Square::H6));
    let config = SearchConfig::default();

    let filtered = apply_filter(flat(ROOK_ON_A4, 0), &ctx, &config);
    assert_eq!(find(&filtered, Square::E1, Square::E2).unwrap().score, -config.repeat_penalty);
    assert_eq!(find(&filtered, Square::E1, Square::F2).unwrap().score, 0);
}

#[test]
fn test_single_repeat_is_not_penalized() {
    let mut ctx = SearchContext::new();
    ctx.record_own_move(mv(Square::E1, Square::E2));
    ctx.record_own_move(mv(Square::H7, Square::H6));

    let filtered = apply_filter(flat(ROOK_ON_A4, 0), &ctx, &SearchConfig::default());
    assert_eq!(find(&filtered, Square::E1, Square::E2).unwrap().score, 0);
}

#[test]
fn test_mating_moves_are_never_touched() {
    let mut ctx = SearchContext::new();
    ctx.record_own_move(mv(Square::A1, Square::A4));
    ctx.record_own_move(mv(Square::A1, Square::A4));

    let filtered = apply_filter(flat(ROOK_ON_A4, MATE_SCORE - 1), &ctx, &SearchConfig::default());
    assert!(filtered.iter().all(|s| s.score == MATE_SCORE - 1));
    assert!(find(&filtered, Square::A4, Square::A1).is_some());
}

#[test]
fn test_empty_context_changes_nothing() {
    let scored = flat(ROOK_ON_A4, 7);
    let filtered = apply_filter(scored.clone(), &SearchContext::new(), &SearchConfig::default());
    assert_eq!(filtered, scored);
}

#[test]
fn test_choose_stays_inside_the_band() {
    let mut scored = flat(ROOK_ON_A4, -500);
    scored[0].score = 100;
    scored[1].score = 95;
    let mut rng = StdRng::seed_from_u64(7);

    let mut top = 0;
    for _ in 0..200 {
        let pick = choose(&scored, 15, &mut rng).unwrap();
        assert!(pick.score >= 95);
        if pick.score == 100 {
            top += 1;
        }
    }
    // Weights 26 against 11
    assert!(top > 100, "best picked {top} times");
}

#[test]
fn test_choose_with_zero_epsilon_is_deterministic() {
    let mut scored = flat(ROOK_ON_A4, 0);
    scored[3].score = 50;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        assert_eq!(choose(&scored, 0, &mut rng).unwrap().info, scored[3].info);
    }
}

#[test]
fn test_choose_on_nothing() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(choose(&[], 15, &mut rng).is_none());
}

#[test]
fn test_castling_counts_from_the_king_square() {
    // After O-O the king stands on g1 while the move is encoded e1h1
    let fen = "4k3/8/8/8/8/8/8/5RK1 w - - 0 1";
    let mut ctx = SearchContext::new();
    ctx.record_own_move_landing(mv(Square::E1, Square::H1), Square::G1);
    let config = SearchConfig::default();

    let filtered = apply_filter(flat(fen, 0), &ctx, &config);
    assert_eq!(find(&filtered, Square::G1, Square::H2).unwrap().score, -config.shuffle_penalty);
    assert_eq!(find(&filtered, Square::F1, Square::F2).unwrap().score, 0);
}

#[test]
fn test_tie_band_keeps_order() {
    let mut scored = flat(ROOK_ON_A4, -100);
    scored[2].score = 10;
    scored[5].score = 0;
    let band = tie_band(&scored, 15);
    assert_eq!(band.len(), 2);
    assert_eq!(band[0].info, scored[2].info);
    assert_eq!(band[1].info, scored[5].info);
    assert!(tie_band(&[], 15).is_empty());
}
