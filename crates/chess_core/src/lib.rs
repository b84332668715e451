pub mod context;
pub mod difficulty;
pub mod error;
pub mod notation;
pub mod position;
pub mod types;

// Re-export the rules adapter (not engine-specific)
pub use context::*;
pub use difficulty::Difficulty;
pub use error::RulesError;
pub use notation::{coordinate_text, san};
pub use position::*;
pub use types::*;

// =============================================================================
// Engine trait, implemented by every move selector (heuristic tiers, minimax)
// =============================================================================

/// Result of a move-selection pass
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// The chosen move (None if the game is over)
    pub best_move: Option<Move>,
    /// Score in centipawns from the selecting side's perspective
    pub score: i32,
    /// Depth searched beyond the root move (0 for heuristic selectors)
    pub depth: u8,
    /// Number of positions visited
    pub nodes: u64,
}

impl SearchResult {
    /// A result carrying no move, used when the side to move has none.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Trait that all move selectors implement.
///
/// The game session owns the [`SearchContext`] and passes it into every call,
/// so selectors keep no cross-call state about the game themselves.
pub trait Engine: Send {
    /// Choose a move for the side to move in `pos`.
    ///
    /// # Arguments
    /// * `pos` - The live position; implementations must not assume they may mutate it
    /// * `ctx` - Per-game memory of the moves this side already made
    fn select_move(&mut self, pos: &Position, ctx: &SearchContext) -> SearchResult;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
