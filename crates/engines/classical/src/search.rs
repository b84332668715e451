//! Minimax search with alpha-beta pruning
//!
//! Scores are always from the root side's point of view: levels where that
//! side moves maximize, the others minimize. The position is cloned before
//! every move tried, so the caller's position is never touched.

use chess_core::{Color, Move, Position, RulesError, SearchContext};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::{evaluate_terms, terminal_score};
use crate::ordering::ordered_moves;
use crate::oscillation::{apply_filter, tie_band, ScoredMove};

/// Bound larger than any evaluation, mates included.
pub const INF: i32 = 1_000_000;

/// Tuning knobs of the search driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched after the root move
    pub depth: u8,
    /// Below this many legal moves the priority heuristic picks instead
    pub shortcut_threshold: usize,
    /// Replies explored per node, best ordered first
    pub max_replies: usize,
    /// Root moves this close to the best are candidates for the random pick
    pub tie_epsilon: i32,
    /// Times a move key may be chosen before it is penalized
    pub max_repeats: u32,
    pub repeat_penalty: i32,
    pub shuffle_penalty: i32,
    /// Disable to get the plain minimax scores, for comparison
    pub alpha_beta: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            shortcut_threshold: 4,
            max_replies: 24,
            tie_epsilon: 15,
            max_repeats: 2,
            repeat_penalty: 60,
            shuffle_penalty: 30,
            alpha_beta: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no legal moves in the root position")]
    NoLegalMoves,
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Every root move with its search score, in search order.
#[derive(Debug, Clone)]
pub struct RootScores {
    pub moves: Vec<ScoredMove>,
    pub nodes: u64,
}

impl RootScores {
    pub fn best_score(&self) -> Option<i32> {
        self.moves.iter().map(|s| s.score).max()
    }
}

/// Scores every legal root move for the side to move.
///
/// With pruning on, the root window is kept `tie_epsilon` below the best
/// score so far, so every move that can land in the tie band gets an exact
/// score. Moves scored below the window only get an upper bound, which is
/// still below the band.
pub fn score_root_moves(pos: &Position, config: &SearchConfig) -> Result<RootScores, SearchError> {
    let moves = ordered_moves(pos);
    if moves.is_empty() {
        return Err(SearchError::NoLegalMoves);
    }

    let reference = pos.side_to_move();
    let mut search = Search {
        config,
        reference,
        nodes: 0,
    };

    let mut best = -INF;
    let mut scored = Vec::with_capacity(moves.len());
    for info in moves {
        let child = pos.after(info.mv)?;
        search.nodes += 1;

        let alpha = if config.alpha_beta {
            best.saturating_sub(config.tie_epsilon + 1).max(-INF)
        } else {
            -INF
        };
        let score = search.minimax(&child, config.depth, alpha, INF, 1)?;
        best = best.max(score);
        scored.push(ScoredMove {
            info,
            score,
            // Fail-soft: a score at or below alpha is only an upper bound
            exact: score > alpha,
        });
    }

    Ok(RootScores {
        moves: scored,
        nodes: search.nodes,
    })
}

/// Root moves after the anti-oscillation filter, with every move of the tie
/// band scored exactly.
///
/// Penalties can pull the band below the pruning window of the root search,
/// where scores are only upper bounds. Such moves are searched again with a
/// full window until the band holds exact scores only, so the pick is the same
/// as with pruning off.
pub fn filtered_root_moves(
    pos: &Position,
    ctx: &SearchContext,
    config: &SearchConfig,
) -> Result<RootScores, SearchError> {
    let mut root = score_root_moves(pos, config)?;
    loop {
        let filtered = apply_filter(root.moves.clone(), ctx, config);
        let pending: Vec<Move> = tie_band(&filtered, config.tie_epsilon)
            .into_iter()
            .filter(|s| !s.exact)
            .map(|s| s.info.mv)
            .collect();
        if pending.is_empty() {
            return Ok(RootScores {
                moves: filtered,
                nodes: root.nodes,
            });
        }

        let mut search = Search {
            config,
            reference: pos.side_to_move(),
            nodes: 0,
        };
        for mv in pending {
            let child = pos.after(mv)?;
            let score = search.minimax(&child, config.depth, -INF, INF, 1)?;
            if let Some(entry) = root.moves.iter_mut().find(|s| s.info.mv == mv) {
                entry.score = score;
                entry.exact = true;
            }
        }
        root.nodes += search.nodes;
    }
}

struct Search<'a> {
    config: &'a SearchConfig,
    reference: Color,
    nodes: u64,
}

impl Search<'_> {
    fn minimax(
        &mut self,
        pos: &Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        ply: i32,
    ) -> Result<i32, SearchError> {
        if let Some(score) = terminal_score(pos, self.reference) {
            // Prefer the quickest mate and the slowest loss
            return Ok(match score {
                s if s > 0 => s - ply,
                s if s < 0 => s + ply,
                _ => 0,
            });
        }
        if depth == 0 {
            return Ok(evaluate_terms(pos, self.reference).total());
        }

        let maximizing = pos.side_to_move() == self.reference;
        let mut replies = ordered_moves(pos);
        replies.truncate(self.config.max_replies);

        let mut best = if maximizing { -INF } else { INF };
        for info in replies {
            let child = pos.after(info.mv)?;
            self.nodes += 1;

            let score = self.minimax(&child, depth - 1, alpha, beta, ply + 1)?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.config.alpha_beta && beta <= alpha {
                break;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
