//! Error types for the game session
//!
//! Only player-facing problems surface here. Search failures are handled
//! inside the engines and a bot turn that cannot be played is skipped.

use std::path::PathBuf;

use chess_core::RulesError;
use thiserror::Error;

use crate::game::GameResult;

#[derive(Error, Debug)]
pub enum SessionError {
    /// Unparseable or illegal move, or a bad FEN
    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("the bot is still thinking")]
    BotThinking,

    #[error("the game is over: {0}")]
    GameOver(GameResult),

    #[error("it is the bot's turn")]
    NotYourTurn,

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidSetting(String),

    #[error("invalid saved game: {0}")]
    SaveFormat(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;
