//! Saved game blob
//!
//! One JSON object holds everything needed to resume a game. It is only
//! trusted when its format version matches exactly and it is younger than
//! the freshness window; anything else is thrown away and the caller starts
//! a fresh game.

use std::fs;
use std::path::{Path, PathBuf};

use chess_core::{Color, Difficulty, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};
use crate::game::GameMode;

/// Format tag written into every save. Bump when the layout changes.
pub const GAME_VERSION: &str = "1.0.0";

/// Side to move, written the way FEN writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub fen: String,
    /// SAN of every move played so far
    pub move_history: Vec<String>,
    pub difficulty: Difficulty,
    pub game_mode: GameMode,
    pub current_player: Side,
    /// Save time, as milliseconds since the epoch
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub game_version: String,
}

impl SavedGame {
    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> SessionResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Saved within `max_age` of `now`. A timestamp in the future counts as
    /// fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
        now.signed_duration_since(self.timestamp) <= max_age
    }
}

/// Why a saved blob was not restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discard {
    Unreadable(String),
    VersionMismatch(String),
    Stale,
    InvalidPosition(String),
}

/// Validates a saved blob against the current format and the clock.
pub fn check_saved_game(
    text: &str,
    now: DateTime<Utc>,
    max_age: chrono::Duration,
) -> Result<SavedGame, Discard> {
    let saved = SavedGame::from_json(text).map_err(|e| Discard::Unreadable(e.to_string()))?;
    if saved.game_version != GAME_VERSION {
        return Err(Discard::VersionMismatch(saved.game_version));
    }
    if !saved.is_fresh(now, max_age) {
        return Err(Discard::Stale);
    }
    Position::from_fen(&saved.fen).map_err(|e| Discard::InvalidPosition(e.to_string()))?;
    Ok(saved)
}

/// Where saved games live.
pub trait SaveStore {
    /// The stored blob, or None when nothing is saved.
    fn read(&self) -> SessionResult<Option<String>>;
    fn write(&mut self, blob: &str) -> SessionResult<()>;
    fn clear(&mut self) -> SessionResult<()>;
}

/// A JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> SessionResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&mut self, blob: &str) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        fs::write(&self.path, blob).map_err(|e| self.io_error(e))
    }

    fn clear(&mut self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-memory store, for tests and front ends without a disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> SessionResult<Option<String>> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> SessionResult<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }

    fn clear(&mut self) -> SessionResult<()> {
        self.blob = None;
        Ok(())
    }
}

pub fn save_game(store: &mut dyn SaveStore, saved: &SavedGame) -> SessionResult<()> {
    store.write(&saved.to_json()?)?;
    debug!(moves = saved.move_history.len(), "game saved");
    Ok(())
}

/// Loads the saved game if it can be trusted.
///
/// A blob that fails any check is removed from the store and None is
/// returned, so the caller starts a fresh game. Failures are logged, never
/// returned.
pub fn load_saved_game(
    store: &mut dyn SaveStore,
    now: DateTime<Utc>,
    max_age: chrono::Duration,
) -> Option<SavedGame> {
    let text = match store.read() {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            warn!(%err, "could not read saved game, starting fresh");
            return None;
        }
    };

    match check_saved_game(&text, now, max_age) {
        Ok(saved) => {
            info!(moves = saved.move_history.len(), "restoring saved game");
            Some(saved)
        }
        Err(reason) => {
            info!(?reason, "discarding saved game");
            if let Err(err) = store.clear() {
                warn!(%err, "could not remove discarded save");
            }
            None
        }
    }
}

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod persistence_tests;
