//! Game session for the chess bot
//!
//! Holds one game, enforces whose turn it is, paces and plays the bot's
//! replies, and saves and restores the game as a JSON blob.

pub mod config;
pub mod error;
pub mod game;
pub mod persistence;

use chess_core::{Difficulty, Engine};
use classical_engine::{ClassicalEngine, SearchConfig};
use heuristic_engine::HeuristicEngine;

pub use config::{SessionConfig, ThinkingTimes};
pub use error::{SessionError, SessionResult};
pub use game::{GameMode, GameResult, GameSession, MoveRecord, TurnOutcome};
pub use persistence::{
    load_saved_game, save_game, FileStore, MemoryStore, SaveStore, SavedGame, GAME_VERSION,
};

/// The move selector for a difficulty level: minimax for expert, the
/// priority heuristic below that.
pub fn engine_for(difficulty: Difficulty, search: &SearchConfig, seed: Option<u64>) -> Box<dyn Engine> {
    match (difficulty, seed) {
        (Difficulty::Expert, Some(seed)) => Box::new(ClassicalEngine::with_seed(search.clone(), seed)),
        (Difficulty::Expert, None) => Box::new(ClassicalEngine::new(search.clone())),
        (level, Some(seed)) => Box::new(HeuristicEngine::with_seed(level, seed)),
        (level, None) => Box::new(HeuristicEngine::new(level)),
    }
}
