//! Post-search filtering against visibly silly repeated play, and the
//! randomized tie-break among near-best moves.
//!
//! A fixed-depth search with an imperfect evaluation often sees several moves
//! as equal, including the one undoing its previous move. None of this feeds
//! back into the evaluation; it only adjusts root scores after the search.

use chess_core::{MoveInfo, MoveKey, SearchContext};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::trace;

use crate::eval::MATE_THRESHOLD;
use crate::search::SearchConfig;

/// Extra weight given to the best move in the tie band.
pub const TOP_BONUS: i32 = 10;

/// A root move with its search score, from the bot's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub info: MoveInfo,
    pub score: i32,
    /// False when pruning only proved `score` to be an upper bound
    pub exact: bool,
}

impl ScoredMove {
    pub fn exact(info: MoveInfo, score: i32) -> Self {
        Self {
            info,
            score,
            exact: true,
        }
    }
}

/// Applies the anti-oscillation rules to scored root moves.
///
/// - The exact reversal of the bot's previous move is dropped, unless it is
///   the only move.
/// - A move whose squares the bot has already chosen `max_repeats` times or
///   more loses `repeat_penalty`.
/// - A quiet move by the piece that moved last loses `shuffle_penalty`.
///
/// Moves that mate are left alone.
pub fn apply_filter(
    mut scored: Vec<ScoredMove>,
    ctx: &SearchContext,
    config: &SearchConfig,
) -> Vec<ScoredMove> {
    let (Some(last), Some(landing)) = (ctx.last_own_move(), ctx.last_landing()) else {
        return penalize_repeats(scored, ctx, config);
    };

    let reversal = MoveKey {
        from: landing,
        to: last.from,
    };
    if scored.iter().any(|s| s.info.key() != reversal) {
        scored.retain(|s| s.info.key() != reversal || s.score >= MATE_THRESHOLD);
    }

    let mut scored = penalize_repeats(scored, ctx, config);
    for s in scored.iter_mut() {
        if s.score < MATE_THRESHOLD && s.info.mv.from == landing && s.info.is_quiet() {
            trace!(san = %s.info.san, "shuffle penalty");
            s.score -= config.shuffle_penalty;
        }
    }
    scored
}

fn penalize_repeats(
    mut scored: Vec<ScoredMove>,
    ctx: &SearchContext,
    config: &SearchConfig,
) -> Vec<ScoredMove> {
    for s in scored.iter_mut() {
        if s.score < MATE_THRESHOLD && ctx.repetition_count(s.info.key()) >= config.max_repeats {
            trace!(san = %s.info.san, "repeat penalty");
            s.score -= config.repeat_penalty;
        }
    }
    scored
}

/// Moves within `epsilon` of the best score, in their original order.
pub fn tie_band(scored: &[ScoredMove], epsilon: i32) -> Vec<&ScoredMove> {
    let Some(best) = scored.iter().map(|s| s.score).max() else {
        return Vec::new();
    };
    scored.iter().filter(|s| best - s.score <= epsilon.max(0)).collect()
}

/// Picks a move among those within `epsilon` of the best score.
///
/// Closer scores weigh more and the best move gets an extra bonus, so the top
/// move is the most likely but not a certainty.
pub fn choose<R: Rng + ?Sized>(scored: &[ScoredMove], epsilon: i32, rng: &mut R) -> Option<ScoredMove> {
    let epsilon = epsilon.max(0);
    let best = scored.iter().map(|s| s.score).max()?;
    let band = tie_band(scored, epsilon);

    let mut top_given = false;
    let weights: Vec<i32> = band
        .iter()
        .map(|s| {
            let mut w = epsilon + 1 - (best - s.score);
            if s.score == best && !top_given {
                w += TOP_BONUS;
                top_given = true;
            }
            w
        })
        .collect();

    match WeightedIndex::new(&weights) {
        Ok(dist) => Some(band[dist.sample(rng)].clone()),
        Err(_) => band.first().map(|s| (*s).clone()),
    }
}

#[cfg(test)]
#[path = "oscillation_tests.rs"]
mod oscillation_tests;
