//! Session configuration, read from TOML
//!
//! Every field has a default, so an empty file (or none at all) is a valid
//! configuration:
//!
//! ```toml
//! default_difficulty = "hard"
//! save_path = "chess-save.json"
//! save_max_age_hours = 24
//!
//! [thinking_ms]
//! expert = 1500
//!
//! [search]
//! depth = 2
//! tie_epsilon = 20
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chess_core::Difficulty;
use classical_engine::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Artificial delay before each bot move, per difficulty, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThinkingTimes {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub expert: u64,
}

impl Default for ThinkingTimes {
    fn default() -> Self {
        Self {
            easy: 500,
            medium: 800,
            hard: 1200,
            expert: 2000,
        }
    }
}

impl ThinkingTimes {
    /// No delay at all, for tests and scripted games.
    pub fn instant() -> Self {
        Self {
            easy: 0,
            medium: 0,
            hard: 0,
            expert: 0,
        }
    }
}

const DEFAULT_MAX_AGE_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub default_difficulty: Difficulty,
    pub thinking_ms: ThinkingTimes,
    /// Where the play front end keeps its saved game
    pub save_path: PathBuf,
    /// Saved games older than this are discarded on load
    pub save_max_age_hours: i64,
    /// Search settings for the expert level
    pub search: SearchConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::default(),
            thinking_ms: ThinkingTimes::default(),
            save_path: PathBuf::from("chess-save.json"),
            save_max_age_hours: DEFAULT_MAX_AGE_HOURS,
            search: SearchConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> SessionResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> SessionResult<()> {
        let hours = self.save_max_age_hours;
        if hours < 0 || chrono::Duration::try_hours(hours).is_none() {
            return Err(SessionError::InvalidSetting(format!(
                "save_max_age_hours = {hours} is out of range"
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> SessionResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn thinking_time(&self, difficulty: Difficulty) -> Duration {
        let ms = match difficulty {
            Difficulty::Easy => self.thinking_ms.easy,
            Difficulty::Medium => self.thinking_ms.medium,
            Difficulty::Hard => self.thinking_ms.hard,
            Difficulty::Expert => self.thinking_ms.expert,
        };
        Duration::from_millis(ms)
    }

    /// Freshness window for saved games. Out-of-range values fall back to 24h.
    pub fn save_max_age(&self) -> chrono::Duration {
        chrono::Duration::try_hours(self.save_max_age_hours)
            .filter(|age| *age >= chrono::Duration::zero())
            .unwrap_or_else(|| chrono::Duration::hours(DEFAULT_MAX_AGE_HOURS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.thinking_time(Difficulty::Expert), Duration::from_millis(2000));
        assert_eq!(config.save_max_age(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_partial_tables_keep_other_defaults() {
        let config = SessionConfig::from_toml_str(
            r#"
            default_difficulty = "expert"

            [thinking_ms]
            easy = 100

            [search]
            depth = 1
            alpha_beta = false
            "#,
        )
        .unwrap();
        assert_eq!(config.default_difficulty, Difficulty::Expert);
        assert_eq!(config.thinking_ms.easy, 100);
        assert_eq!(config.thinking_ms.hard, 1200);
        assert_eq!(config.search.depth, 1);
        assert!(!config.search.alpha_beta);
        assert_eq!(config.search.max_replies, SearchConfig::default().max_replies);
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        let err = SessionConfig::from_toml_str("default_difficulty = \"grandmaster\"").unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn test_out_of_range_age_is_rejected() {
        for hours in ["-1", "9223372036854775807"] {
            let err = SessionConfig::from_toml_str(&format!("save_max_age_hours = {hours}"))
                .unwrap_err();
            assert!(matches!(err, SessionError::InvalidSetting(_)), "{hours}");
        }
    }

    #[test]
    fn test_save_max_age_never_panics() {
        let config = SessionConfig {
            save_max_age_hours: i64::MAX,
            ..SessionConfig::default()
        };
        assert_eq!(config.save_max_age(), chrono::Duration::hours(24));

        let config = SessionConfig {
            save_max_age_hours: 48,
            ..SessionConfig::default()
        };
        assert_eq!(config.save_max_age(), chrono::Duration::hours(48));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = SessionConfig::load(Path::new("/nonexistent/chess-bot.toml")).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }
}
