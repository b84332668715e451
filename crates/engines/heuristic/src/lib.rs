//! Heuristic Move Picker
//!
//! Picks among legal moves with a fixed priority cascade instead of a search:
//! mate, queen promotion, check, capture (by captured value), a central or
//! developing destination, anything not flagged as weak, then any move.
//!
//! The difficulty levels share the cascade and differ only in which features
//! they look at (queen promotion always comes first), how many of the best moves they sample from, and how often
//! they deliberately play a weak move.

pub mod features;

use chess_core::{Difficulty, Engine, MoveInfo, Position, SearchContext, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

pub use features::{Feature, FeatureKind, RankedMove};

#[cfg(test)]
mod lib_tests;

/// How one difficulty level applies the cascade.
#[derive(Debug, Clone)]
pub struct TierProfile {
    /// Features in priority order
    pub features: Vec<Feature>,
    /// Prefer moves that neither check nor capture when any exist
    pub avoid_forcing: bool,
    /// Sample uniformly among this many of the best tier (None = whole tier)
    pub pick_top: Option<usize>,
    /// Chance of playing a weak move on purpose, when one exists
    pub blunder_chance: f64,
}

impl TierProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                features: vec![
                    Feature::new(FeatureKind::QueenPromotion, 10_000),
                    Feature::new(FeatureKind::NotBad, 1),
                ],
                avoid_forcing: true,
                pick_top: None,
                blunder_chance: 0.3,
            },
            Difficulty::Medium => Self {
                features: vec![
                    Feature::new(FeatureKind::QueenPromotion, 10_000),
                    Feature::new(FeatureKind::Forcing, 100),
                    Feature::new(FeatureKind::NotBad, 1),
                ],
                avoid_forcing: false,
                pick_top: None,
                blunder_chance: 0.0,
            },
            Difficulty::Hard | Difficulty::Expert => Self {
                features: vec![
                    Feature::new(FeatureKind::Mate, 100_000),
                    Feature::new(FeatureKind::QueenPromotion, 10_000),
                    Feature::new(FeatureKind::Check, 2_000),
                    Feature::new(FeatureKind::Capture, 1_000),
                    Feature::new(FeatureKind::Positional, 10),
                    Feature::new(FeatureKind::NotBad, 1),
                ],
                avoid_forcing: false,
                pick_top: Some(3),
                blunder_chance: 0.0,
            },
        }
    }

    /// Rank `moves` against this profile, best first. Ties keep input order.
    pub fn rank_moves(&self, moves: Vec<MoveInfo>) -> Vec<RankedMove> {
        let mut ranked: Vec<RankedMove> = moves
            .into_iter()
            .map(|info| features::rank(&self.features, info))
            .collect();
        ranked.sort_by(|a, b| a.tier.cmp(&b.tier).then(b.score.cmp(&a.score)));
        ranked
    }
}

/// Chooses moves by the priority cascade of a [`TierProfile`].
#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    profile: TierProfile,
    name: String,
    rng: StdRng,
}

impl HeuristicEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }

    /// Deterministic engine, for tests and reproducible games.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: Difficulty, rng: StdRng) -> Self {
        Self {
            profile: TierProfile::for_difficulty(difficulty),
            name: format!("Heuristic ({difficulty})"),
            rng,
        }
    }

    pub fn profile(&self) -> &TierProfile {
        &self.profile
    }

    /// Pick a move for the side to move, or None if there is none.
    pub fn pick(&mut self, pos: &Position) -> Option<RankedMove> {
        let candidates: Vec<MoveInfo> = pos
            .verbose_moves()
            .into_iter()
            .filter(|info| !features::is_under_promotion(info))
            .collect();
        self.pick_from(candidates)
    }

    /// Pick among already-described moves.
    pub fn pick_from(&mut self, mut candidates: Vec<MoveInfo>) -> Option<RankedMove> {
        if candidates.is_empty() {
            return None;
        }

        // Every level promotes when it can, so no blunder then
        let can_promote = candidates.iter().any(features::promotes_to_queen);
        if !can_promote
            && self.profile.blunder_chance > 0.0
            && self.rng.gen_bool(self.profile.blunder_chance)
        {
            let weak: Vec<&MoveInfo> = candidates.iter().filter(|i| features::is_bad(i)).collect();
            if let Some(&info) = weak.choose(&mut self.rng) {
                debug!(san = %info.san, "heuristic plays a weak move on purpose");
                return Some(features::rank(&self.profile.features, info.clone()));
            }
        }

        if self.profile.avoid_forcing && candidates.iter().any(|i| !features::is_forcing(i)) {
            candidates.retain(|i| !features::is_forcing(i) || features::promotes_to_queen(i));
        }

        // Random order first so equal scores are broken randomly by the stable sort
        candidates.shuffle(&mut self.rng);
        let ranked = self.profile.rank_moves(candidates);

        let best_tier = ranked.first()?.tier;
        let tier_len = ranked.iter().take_while(|r| r.tier == best_tier).count();
        let window = self.profile.pick_top.map_or(tier_len, |k| k.min(tier_len));
        let idx = self.rng.gen_range(0..window);
        ranked.into_iter().nth(idx)
    }
}

impl Engine for HeuristicEngine {
    fn select_move(&mut self, pos: &Position, _ctx: &SearchContext) -> SearchResult {
        let nodes = pos.legal_move_count() as u64;
        match self.pick(pos) {
            Some(ranked) => SearchResult {
                best_move: Some(ranked.info.mv),
                score: ranked.score,
                depth: 0,
                nodes,
            },
            None => SearchResult::none(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
