//! Game session: the live game, whose turn it is, and the bot's replies

use std::fmt;
use std::time::Duration;

use chess_core::{
    color_name, coordinate_text, parse_square, square_name, Color, Difficulty, Engine, Move,
    MoveInfo, Position, SearchContext, Square,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::engine_for;
use crate::error::{SessionError, SessionResult};
use crate::persistence::{SavedGame, GAME_VERSION};

/// Who plays the side the human does not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    VsBot,
    /// Two humans share the board; the bot never moves
    TwoPlayer,
}

/// A recorded move with SAN notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub san: String,
}

/// Game result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
    Resigned { winner: Color },
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Checkmate { winner } | GameResult::Resigned { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "in progress"),
            GameResult::Checkmate { winner } => write!(f, "checkmate, {} wins", color_name(*winner)),
            GameResult::Stalemate => write!(f, "draw by stalemate"),
            GameResult::FiftyMoveRule => write!(f, "draw by the fifty-move rule"),
            GameResult::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
            GameResult::InsufficientMaterial => write!(f, "draw by insufficient material"),
            GameResult::Resigned { winner } => write!(f, "resignation, {} wins", color_name(*winner)),
        }
    }
}

/// What happened when the bot was asked to move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved(MoveInfo),
    /// Nothing could be played; the game goes on without a bot reply
    Skipped,
    /// Not the bot's turn, or it is already thinking
    Ignored,
    GameOver(GameResult),
}

/// One game between a human and the bot (or two humans).
///
/// The session owns the position and the bot's [`SearchContext`]; engines
/// only ever see them by reference.
pub struct GameSession {
    position: Position,
    moves: Vec<MoveRecord>,
    /// Position hash history for threefold repetition detection
    position_history: Vec<u64>,
    /// Currently selected square (for click input)
    selected_square: Option<Square>,
    /// Destinations of the selected piece, castling shown as the king's step
    selected_targets: Vec<Square>,
    last_move: Option<MoveInfo>,
    result: GameResult,
    /// Busy gate: set while the bot's turn is in flight
    bot_thinking: bool,
    difficulty: Difficulty,
    mode: GameMode,
    human_color: Color,
    context: SearchContext,
    engine: Box<dyn Engine>,
    config: SessionConfig,
    seed: Option<u64>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("fen", &self.position.to_fen())
            .field("moves", &self.moves.len())
            .field("result", &self.result)
            .field("difficulty", &self.difficulty)
            .field("mode", &self.mode)
            .field("engine", &self.engine.name())
            .field("bot_thinking", &self.bot_thinking)
            .finish()
    }
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::build(config, None)
    }

    /// Session whose engines are seeded, for tests and reproducible games.
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::build(config, Some(seed))
    }

    /// Session driven by a custom move selector. Changing the difficulty
    /// later swaps it for the built-in engine of that level.
    pub fn with_engine(config: SessionConfig, engine: Box<dyn Engine>) -> Self {
        Self {
            engine,
            ..Self::build(config, None)
        }
    }

    fn build(config: SessionConfig, seed: Option<u64>) -> Self {
        let difficulty = config.default_difficulty;
        let position = Position::startpos();
        Self {
            position_history: vec![position.hash()],
            position,
            moves: Vec::new(),
            selected_square: None,
            selected_targets: Vec::new(),
            last_move: None,
            result: GameResult::InProgress,
            bot_thinking: false,
            difficulty,
            mode: GameMode::default(),
            human_color: Color::White,
            context: SearchContext::new(),
            engine: engine_for(difficulty, &config.search, seed),
            config,
            seed,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn human_color(&self) -> Color {
        self.human_color
    }

    pub fn last_move(&self) -> Option<&MoveInfo> {
        self.last_move.as_ref()
    }

    pub fn selected_square(&self) -> Option<Square> {
        self.selected_square
    }

    pub fn selected_targets(&self) -> &[Square] {
        &self.selected_targets
    }

    pub fn is_bot_thinking(&self) -> bool {
        self.bot_thinking
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn thinking_time(&self) -> Duration {
        self.config.thinking_time(self.difficulty)
    }

    // =========================================================================
    // Game setup
    // =========================================================================

    /// Start over from the initial position, keeping difficulty and mode.
    pub fn new_game(&mut self) {
        self.position = Position::startpos();
        self.moves.clear();
        self.position_history = vec![self.position.hash()];
        self.clear_selection();
        self.last_move = None;
        self.result = GameResult::InProgress;
        self.bot_thinking = false;
        self.context.reset();
        self.engine.new_game();
        info!(difficulty = %self.difficulty, mode = ?self.mode, "new game");
    }

    /// Switch the bot's strength. The game in progress continues.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty == self.difficulty {
            return;
        }
        self.difficulty = difficulty;
        self.engine = engine_for(difficulty, &self.config.search, self.seed);
        info!(%difficulty, engine = self.engine.name(), "difficulty changed");
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        info!(?mode, "game mode changed");
    }

    // =========================================================================
    // Human input
    // =========================================================================

    /// The bot is to move in the current game.
    pub fn is_bot_turn(&self) -> bool {
        self.mode == GameMode::VsBot
            && !self.result.is_over()
            && self.position.side_to_move() != self.human_color
    }

    /// Destination squares of the piece on `from`. Castling is shown as the
    /// king's two-square step.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        let mut targets = Vec::new();
        for info in self.position.verbose_moves_from(from) {
            // Promotions repeat the same destination
            if let Some(to) = parse_square(&coordinate_text(&info)[2..4]) {
                if !targets.contains(&to) {
                    targets.push(to);
                }
            }
        }
        targets
    }

    /// Click wiring: selecting one of the mover's pieces shows its targets,
    /// clicking a target then plays the move. Anything else clears the
    /// selection.
    pub fn select_square(&mut self, sq: Square) -> SessionResult<Option<MoveInfo>> {
        self.check_human_may_move()?;

        let stm = self.position.side_to_move();
        if matches!(self.position.piece_at(sq), Some((color, _)) if color == stm) {
            self.selected_square = Some(sq);
            self.selected_targets = self.legal_targets(sq);
            return Ok(None);
        }

        let picked = self.selected_square.filter(|_| self.selected_targets.contains(&sq));
        self.clear_selection();
        match picked {
            Some(from) => {
                let mv = self.position.parse_move(&format!("{}{}", square_name(from), square_name(sq)))?;
                self.play_move(mv).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Play a human move.
    pub fn play_move(&mut self, mv: Move) -> SessionResult<MoveInfo> {
        self.check_human_may_move()?;
        self.apply(mv)
    }

    /// Play a human move given in coordinate notation (`e2e4`, `e7e8q`).
    pub fn play_text(&mut self, text: &str) -> SessionResult<MoveInfo> {
        self.check_human_may_move()?;
        let mv = self.position.parse_move(text)?;
        self.apply(mv)
    }

    /// The side to move gives up.
    pub fn resign(&mut self) -> SessionResult<GameResult> {
        if self.result.is_over() {
            return Err(SessionError::GameOver(self.result));
        }
        let loser = match self.mode {
            GameMode::VsBot => self.human_color,
            GameMode::TwoPlayer => self.position.side_to_move(),
        };
        self.result = GameResult::Resigned { winner: !loser };
        info!(result = %self.result, "game over");
        Ok(self.result)
    }

    fn check_human_may_move(&self) -> SessionResult<()> {
        if self.result.is_over() {
            return Err(SessionError::GameOver(self.result));
        }
        if self.bot_thinking {
            return Err(SessionError::BotThinking);
        }
        if self.is_bot_turn() {
            return Err(SessionError::NotYourTurn);
        }
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selected_square = None;
        self.selected_targets.clear();
    }

    /// Apply a move to the game state. An illegal move changes nothing.
    fn apply(&mut self, mv: Move) -> SessionResult<MoveInfo> {
        let info = self.position.play(mv)?;
        self.moves.push(MoveRecord {
            san: info.san.clone(),
        });
        self.position_history.push(self.position.hash());
        self.last_move = Some(info.clone());
        self.clear_selection();

        self.result = self.detect_result();
        if self.result.is_over() {
            info!(result = %self.result, moves = self.moves.len(), "game over");
        }
        Ok(info)
    }

    /// Check if the position has occurred at least 3 times
    fn is_threefold_repetition(&self) -> bool {
        let current = self.position.hash();
        self.position_history.iter().filter(|&&h| h == current).count() >= 3
    }

    fn detect_result(&self) -> GameResult {
        let pos = &self.position;
        if pos.is_checkmate() {
            GameResult::Checkmate {
                winner: !pos.side_to_move(),
            }
        } else if pos.is_stalemate() {
            GameResult::Stalemate
        } else if pos.is_fifty_move_draw() {
            GameResult::FiftyMoveRule
        } else if self.is_threefold_repetition() {
            GameResult::ThreefoldRepetition
        } else if pos.is_insufficient_material() {
            GameResult::InsufficientMaterial
        } else {
            GameResult::InProgress
        }
    }

    // =========================================================================
    // Bot turns
    // =========================================================================

    /// Claim the bot's turn. Returns the thinking delay, or None when the
    /// bot should not move (not its turn, or a turn already in flight).
    pub fn begin_bot_turn(&mut self) -> Option<Duration> {
        if self.bot_thinking || !self.is_bot_turn() {
            return None;
        }
        self.bot_thinking = true;
        Some(self.thinking_time())
    }

    /// Finish a turn claimed by [`begin_bot_turn`](Self::begin_bot_turn).
    pub fn finish_bot_turn(&mut self) -> TurnOutcome {
        let outcome = self.bot_move_unchecked();
        self.bot_thinking = false;
        outcome
    }

    /// The whole bot turn: busy gate, thinking delay, then the move.
    pub async fn bot_turn(&mut self) -> TurnOutcome {
        if self.result.is_over() {
            return TurnOutcome::GameOver(self.result);
        }
        let Some(delay) = self.begin_bot_turn() else {
            return TurnOutcome::Ignored;
        };
        tokio::time::sleep(delay).await;
        self.finish_bot_turn()
    }

    /// Select and play the bot's move right away, without the delay.
    pub fn bot_move(&mut self) -> TurnOutcome {
        if self.result.is_over() {
            return TurnOutcome::GameOver(self.result);
        }
        if self.bot_thinking || !self.is_bot_turn() {
            return TurnOutcome::Ignored;
        }
        self.bot_move_unchecked()
    }

    fn bot_move_unchecked(&mut self) -> TurnOutcome {
        if self.result.is_over() {
            return TurnOutcome::GameOver(self.result);
        }

        let result = self.engine.select_move(&self.position, &self.context);
        debug!(
            engine = self.engine.name(),
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            "bot selected"
        );

        let played = match result.best_move {
            Some(mv) => self.apply(mv).or_else(|err| {
                warn!(%err, "bot move rejected, trying the first legal move");
                self.play_first_legal()
            }),
            None => self.play_first_legal(),
        };

        match played {
            Ok(info) => {
                self.context.record_own_move_landing(info.mv, info.landing_square());
                TurnOutcome::Moved(info)
            }
            Err(err) => {
                error!(%err, fen = %self.position.to_fen(), "bot could not move, skipping its turn");
                TurnOutcome::Skipped
            }
        }
    }

    fn play_first_legal(&mut self) -> SessionResult<MoveInfo> {
        let mv = self
            .position
            .legal_moves()
            .first()
            .copied()
            .ok_or(SessionError::GameOver(self.result))?;
        self.apply(mv)
    }

    // =========================================================================
    // Save and restore
    // =========================================================================

    pub fn snapshot(&self) -> SavedGame {
        SavedGame {
            fen: self.position.to_fen(),
            move_history: self.moves.iter().map(|m| m.san.clone()).collect(),
            difficulty: self.difficulty,
            game_mode: self.mode,
            current_player: self.position.side_to_move().into(),
            timestamp: Utc::now(),
            game_version: GAME_VERSION.to_string(),
        }
    }

    /// Continue a saved game. On error the session is left as it was.
    ///
    /// Repetition history does not survive a save, so threefold repetition
    /// counts from the restored position.
    pub fn restore(&mut self, saved: &SavedGame) -> SessionResult<()> {
        let position = Position::from_fen(&saved.fen)?;

        self.new_game();
        self.position_history = vec![position.hash()];
        self.position = position;
        self.moves = saved
            .move_history
            .iter()
            .map(|san| MoveRecord { san: san.clone() })
            .collect();
        self.set_difficulty(saved.difficulty);
        self.mode = saved.game_mode;
        self.result = self.detect_result();
        info!(moves = self.moves.len(), difficulty = %self.difficulty, "game restored");
        Ok(())
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
