//! Per-game memory threaded into every bot move selection.

use std::collections::HashMap;

use crate::types::{Move, MoveKey, Square};

/// What the bot remembers about its own moves during one game.
///
/// Owned by the game session and cleared on a new game. Selectors only read
/// it; the session records a move once it has actually been applied.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    repetitions: HashMap<MoveKey, u32>,
    last_own_move: Option<Move>,
    /// Where the piece of the last own move ended up
    last_landing: Option<Square>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.repetitions.clear();
        self.last_own_move = None;
        self.last_landing = None;
    }

    /// Note that the bot just played `mv`.
    pub fn record_own_move(&mut self, mv: Move) {
        self.record_own_move_landing(mv, mv.to);
    }

    /// Like [`record_own_move`](Self::record_own_move), for moves whose piece
    /// does not end on `mv.to`: castling, encoded as the king taking its rook.
    pub fn record_own_move_landing(&mut self, mv: Move, landing: Square) {
        *self.repetitions.entry(MoveKey::of(mv)).or_insert(0) += 1;
        self.last_own_move = Some(mv);
        self.last_landing = Some(landing);
    }

    /// How many times the bot has already played a move with this key.
    pub fn repetition_count(&self, key: MoveKey) -> u32 {
        self.repetitions.get(&key).copied().unwrap_or(0)
    }

    pub fn last_own_move(&self) -> Option<Move> {
        self.last_own_move
    }

    /// Square the piece of the last own move stands on.
    pub fn last_landing(&self) -> Option<Square> {
        self.last_landing
    }

    pub fn is_empty(&self) -> bool {
        self.repetitions.is_empty() && self.last_own_move.is_none()
    }
}
