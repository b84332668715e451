use super::*;
use chess_core::{Piece, Square};

const CAPTURES_FEN: &str = "k7/8/8/3q3p/2P5/8/8/4K2R w - - 0 1";

#[test]
fn heuristic_engine_returns_legal_move() {
    let pos = Position::startpos();
    let ctx = SearchContext::new();
    for difficulty in Difficulty::ALL {
        let mut engine = HeuristicEngine::with_seed(difficulty, 7);
        let result = engine.select_move(&pos, &ctx);
        let mv = result.best_move.expect("a move from the start position");
        assert!(pos.legal_moves().contains(&mv));
    }
}

#[test]
fn heuristic_engine_handles_checkmate() {
    let mut engine = HeuristicEngine::with_seed(Difficulty::Hard, 1);
    let pos =
        Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1").unwrap();
    let result = engine.select_move(&pos, &SearchContext::new());
    assert!(result.best_move.is_none());
}

#[test]
fn heuristic_engine_handles_stalemate() {
    let mut engine = HeuristicEngine::with_seed(Difficulty::Medium, 1);
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    let result = engine.select_move(&pos, &SearchContext::new());
    assert!(result.best_move.is_none());
}

#[test]
fn hard_prefers_mate_over_winning_the_queen() {
    // Re8# is available next to Bxb3 winning the queen
    let pos = Position::from_fen("6k1/5ppp/8/8/8/1q6/5PPP/3BR1K1 w - - 0 1").unwrap();
    for seed in 0..10 {
        let mut engine = HeuristicEngine::with_seed(Difficulty::Hard, seed);
        let picked = engine.pick(&pos).unwrap();
        assert_eq!(picked.info.san, "Re8#");
        assert_eq!(picked.tier, 0);
    }
}

#[test]
fn hard_ranks_captures_by_value() {
    let pos = Position::from_fen(CAPTURES_FEN).unwrap();
    let profile = TierProfile::for_difficulty(Difficulty::Hard);
    let ranked = profile.rank_moves(pos.verbose_moves());

    assert_eq!(ranked[0].info.san, "cxd5");
    assert_eq!(ranked[1].info.san, "Rxh5");
    assert!(ranked[0].score > ranked[1].score);
    assert_eq!(ranked[0].tier, ranked[1].tier);
    assert!(ranked[2].tier > ranked[1].tier);
}

#[test]
fn ranking_is_idempotent() {
    let pos = Position::from_fen(CAPTURES_FEN).unwrap();
    let profile = TierProfile::for_difficulty(Difficulty::Hard);
    let once = profile.rank_moves(pos.verbose_moves());
    let again = profile.rank_moves(once.iter().map(|r| r.info.clone()).collect());

    let a: Vec<_> = once.iter().map(|r| r.info.mv).collect();
    let b: Vec<_> = again.iter().map(|r| r.info.mv).collect();
    assert_eq!(a, b);
}

#[test]
fn medium_always_takes_a_forcing_move() {
    let pos = Position::from_fen(CAPTURES_FEN).unwrap();
    for seed in 0..20 {
        let mut engine = HeuristicEngine::with_seed(Difficulty::Medium, seed);
        let picked = engine.pick(&pos).unwrap();
        assert!(picked.info.flags.capture, "seed {seed} picked {}", picked.info.san);
    }
}

#[test]
fn easy_avoids_captures_when_it_can() {
    let pos = Position::from_fen(CAPTURES_FEN).unwrap();
    for seed in 0..20 {
        let mut engine = HeuristicEngine::with_seed(Difficulty::Easy, seed);
        let picked = engine.pick(&pos).unwrap();
        assert!(picked.info.is_quiet(), "seed {seed} picked {}", picked.info.san);
    }
}

#[test]
fn easy_sometimes_plays_weak_pawn_moves() {
    let pos = Position::startpos();
    let mut weak = 0;
    let mut sound = 0;
    for seed in 0..40 {
        let mut engine = HeuristicEngine::with_seed(Difficulty::Easy, seed);
        let picked = engine.pick(&pos).unwrap();
        if features::is_bad(&picked.info) {
            weak += 1;
        } else {
            sound += 1;
        }
    }
    assert!(weak > 0);
    assert!(sound > 0);
}

#[test]
fn promotions_always_choose_the_queen() {
    let pos = Position::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
    for difficulty in Difficulty::ALL {
        for seed in 0..10 {
            let mut engine = HeuristicEngine::with_seed(difficulty, seed);
            let picked = engine.pick(&pos).unwrap();
            if let Some(promo) = picked.info.mv.promotion {
                assert_eq!(promo, Piece::Queen);
            }
        }
    }

    for difficulty in Difficulty::ALL {
        for seed in 0..10 {
            let picked = HeuristicEngine::with_seed(difficulty, seed).pick(&pos).unwrap();
            assert_eq!(picked.info.mv.from, Square::A7, "{difficulty} seed {seed}");
            assert_eq!(picked.info.mv.promotion, Some(Piece::Queen));
        }
    }
}

#[test]
fn easy_promotes_even_when_it_gives_check() {
    // a8=Q+ is a forcing move, which Easy otherwise steers away from
    let pos = Position::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    for seed in 0..20 {
        let picked = HeuristicEngine::with_seed(Difficulty::Easy, seed).pick(&pos).unwrap();
        assert!(picked.info.flags.check);
        assert_eq!(picked.info.mv.promotion, Some(Piece::Queen), "seed {seed}");
    }
}
