//! Classical Chess Engine
//!
//! Shallow minimax with alpha-beta pruning over a hand-tuned evaluation.
//! This is the expert bot level; the lower levels use the priority heuristic.

pub mod eval;
pub mod ordering;
pub mod oscillation;
pub mod pst;
pub mod search;

use chess_core::{Difficulty, Engine, Position, SearchContext, SearchResult};
use heuristic_engine::HeuristicEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

pub use eval::{evaluate, evaluate_terms, EvalBreakdown, MATE_SCORE};
pub use oscillation::ScoredMove;
pub use search::{filtered_root_moves, score_root_moves, RootScores, SearchConfig, SearchError};

/// Minimax engine with move ordering and anti-oscillation filtering.
///
/// The pipeline for one move:
/// - Few legal moves or a finished game: hand over to the priority heuristic
/// - Score every root move with minimax
/// - Drop reversals and penalize repeated or shuffling moves
/// - Pick randomly among the moves within the tie band, favoring the best
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    config: SearchConfig,
    rng: StdRng,
    /// Used for the shallow-position shortcut
    fallback: HeuristicEngine,
    /// Node counter for statistics
    nodes: u64,
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl ClassicalEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
            fallback: HeuristicEngine::new(Difficulty::Hard),
            nodes: 0,
        }
    }

    /// Deterministic engine, for tests and reproducible games.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            fallback: HeuristicEngine::with_seed(Difficulty::Hard, seed),
            nodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn search(&mut self, pos: &Position, ctx: &SearchContext) -> Result<SearchResult, SearchError> {
        let root = filtered_root_moves(pos, ctx, &self.config)?;
        self.nodes = root.nodes;
        let best = root.best_score();
        let filtered = root.moves;

        let Some(pick) = oscillation::choose(&filtered, self.config.tie_epsilon, &mut self.rng) else {
            warn!("no move survived scoring, playing the first legal move");
            return Ok(first_legal_move(pos));
        };

        debug!(
            mv = %pick.info.san,
            score = pick.score,
            best = ?best,
            candidates = filtered.len(),
            nodes = self.nodes,
            "minimax pick"
        );

        Ok(SearchResult {
            best_move: Some(pick.info.mv),
            score: pick.score,
            depth: self.config.depth,
            nodes: self.nodes,
        })
    }
}

/// Last resort when scoring fails: any legal move beats no move.
fn first_legal_move(pos: &Position) -> SearchResult {
    SearchResult {
        best_move: pos.legal_moves().first().copied(),
        ..SearchResult::default()
    }
}

impl Engine for ClassicalEngine {
    fn select_move(&mut self, pos: &Position, ctx: &SearchContext) -> SearchResult {
        self.nodes = 0;

        let legal = pos.legal_move_count();
        if legal == 0 {
            return SearchResult::none();
        }
        if legal < self.config.shortcut_threshold || pos.is_game_over() {
            debug!(legal, "shallow position, using the priority heuristic");
            return self.fallback.select_move(pos, ctx);
        }

        match self.search(pos, ctx) {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "search failed, playing the first legal move");
                first_legal_move(pos)
            }
        }
    }

    fn name(&self) -> &str {
        "Minimax (expert)"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
        self.fallback.new_game();
    }
}
