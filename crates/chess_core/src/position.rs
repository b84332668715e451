//! Position wrapper around the `cozy-chess` rules engine.
//!
//! Everything the bot needs from the rules (legal moves, check and mate
//! detection, draw rules, FEN) goes through [`Position`], so no other crate
//! depends on the library directly.

use cozy_chess::{Board, GameStatus};

use crate::error::RulesError;
use crate::notation;
use crate::types::*;

/// Flags describing what a move does on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub capture: bool,
    pub en_passant: bool,
    pub castle: bool,
    pub promotion: bool,
    pub check: bool,
    pub mate: bool,
}

/// A legal move with everything a UI or a heuristic wants to know about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveInfo {
    pub mv: Move,
    pub color: Color,
    pub piece: Piece,
    /// Piece removed from the board by this move (the pawn for en passant)
    pub captured: Option<Piece>,
    pub flags: MoveFlags,
    /// Standard Algebraic Notation, including `+`/`#`
    pub san: String,
}

impl MoveInfo {
    pub fn key(&self) -> MoveKey {
        MoveKey::of(self.mv)
    }

    pub fn is_quiet(&self) -> bool {
        !self.flags.capture && !self.flags.check
    }

    /// Square the moving piece ends on. Castling is encoded as the king
    /// taking its own rook, so the king's real destination is derived here.
    pub fn landing_square(&self) -> Square {
        if !self.flags.castle {
            return self.mv.to;
        }
        let file = if file_of(self.mv.to) > file_of(self.mv.from) { 6 } else { 2 };
        sq(file, rank_of(self.mv.from)).unwrap_or(self.mv.to)
    }
}

/// Snapshot of a game position. Cloning is cheap (the board is a few
/// bitboards), which is how the search avoids touching the live game.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self {
            board: Board::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let board = Board::from_fen(fen.trim(), false).map_err(|e| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e:?}"),
        })?;
        Ok(Self { board })
    }

    pub fn to_fen(&self) -> String {
        format!("{}", self.board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn fullmove_number(&self) -> u16 {
        self.board.fullmove_number()
    }

    pub fn halfmove_clock(&self) -> u8 {
        self.board.halfmove_clock()
    }

    /// Hash of the position, used for repetition detection.
    pub fn hash(&self) -> u64 {
        self.board.hash()
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let piece = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some((color, piece))
    }

    pub fn pieces(&self, color: Color, piece: Piece) -> BitBoard {
        self.board.colored_pieces(color, piece)
    }

    pub fn king(&self, color: Color) -> Square {
        self.board.king(color)
    }

    pub fn occupied(&self) -> BitBoard {
        self.board.occupied()
    }

    /// Every square attacked by `color`'s pieces, ignoring pins.
    pub fn attacks(&self, color: Color) -> BitBoard {
        let occupied = self.board.occupied();
        let mut attacked = BitBoard::EMPTY;
        for sq in self.board.colors(color) {
            attacked |= match self.board.piece_on(sq) {
                Some(Piece::Pawn) => cozy_chess::get_pawn_attacks(sq, color),
                Some(Piece::Knight) => cozy_chess::get_knight_moves(sq),
                Some(Piece::Bishop) => cozy_chess::get_bishop_moves(sq, occupied),
                Some(Piece::Rook) => cozy_chess::get_rook_moves(sq, occupied),
                Some(Piece::Queen) => {
                    cozy_chess::get_bishop_moves(sq, occupied) | cozy_chess::get_rook_moves(sq, occupied)
                }
                Some(Piece::King) => cozy_chess::get_king_moves(sq),
                None => BitBoard::EMPTY,
            };
        }
        attacked
    }

    // =========================================================================
    // Move generation
    // =========================================================================

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    /// Legal moves of the piece standing on `from` (empty if none).
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        self.board.generate_moves_for(from.bitboard(), |piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    pub fn legal_move_count(&self) -> usize {
        let mut count = 0;
        self.board.generate_moves(|piece_moves| {
            count += piece_moves.len();
            false
        });
        count
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|piece_moves| !piece_moves.is_empty())
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.board.is_legal(mv)
    }

    /// All legal moves with flags and SAN.
    pub fn verbose_moves(&self) -> Vec<MoveInfo> {
        let moves = self.legal_moves();
        moves
            .iter()
            .map(|&mv| self.describe_legal(mv, &moves))
            .collect()
    }

    pub fn verbose_moves_from(&self, from: Square) -> Vec<MoveInfo> {
        let moves = self.legal_moves();
        moves
            .iter()
            .filter(|mv| mv.from == from)
            .map(|&mv| self.describe_legal(mv, &moves))
            .collect()
    }

    /// Describe a move without playing it.
    pub fn describe(&self, mv: Move) -> Result<MoveInfo, RulesError> {
        if !self.board.is_legal(mv) {
            return Err(RulesError::IllegalMove(mv.to_string()));
        }
        let moves = self.legal_moves();
        Ok(self.describe_legal(mv, &moves))
    }

    /// Builds a [`MoveInfo`] for a move known to be legal. `legal` is the full
    /// legal move list, needed for SAN disambiguation.
    fn describe_legal(&self, mv: Move, legal: &[Move]) -> MoveInfo {
        let color = self.side_to_move();
        let piece = self.board.piece_on(mv.from).unwrap_or(Piece::Pawn);

        let castle = piece == Piece::King && self.board.colors(color).has(mv.to);
        let en_passant = piece == Piece::Pawn
            && mv.from.file() != mv.to.file()
            && self.board.piece_on(mv.to).is_none();
        let captured = if castle {
            None
        } else if en_passant {
            Some(Piece::Pawn)
        } else {
            self.board.piece_on(mv.to)
        };

        let mut after = self.board.clone();
        after.play_unchecked(mv);
        let check = !after.checkers().is_empty();
        let mate = check && matches!(after.status(), GameStatus::Won);

        let flags = MoveFlags {
            capture: captured.is_some(),
            en_passant,
            castle,
            promotion: mv.promotion.is_some(),
            check,
            mate,
        };
        let san = notation::san(mv, piece, &flags, legal, &self.board);

        MoveInfo {
            mv,
            color,
            piece,
            captured,
            flags,
            san,
        }
    }

    // =========================================================================
    // Playing moves
    // =========================================================================

    /// Apply a legal move. An illegal move leaves the position untouched.
    pub fn play(&mut self, mv: Move) -> Result<MoveInfo, RulesError> {
        let info = self.describe(mv)?;
        self.board.play_unchecked(mv);
        Ok(info)
    }

    /// The position after `mv`, leaving `self` unchanged.
    pub fn after(&self, mv: Move) -> Result<Position, RulesError> {
        if !self.board.is_legal(mv) {
            return Err(RulesError::IllegalMove(mv.to_string()));
        }
        let mut next = self.clone();
        next.board.play_unchecked(mv);
        Ok(next)
    }

    /// Parse coordinate notation (`e2e4`, `e7e8q`, `e1g1`) into a legal move.
    ///
    /// Castling may be given either as the king's two-square step or as the
    /// king moving onto its rook. A promotion without a suffix becomes a queen.
    pub fn parse_move(&self, text: &str) -> Result<Move, RulesError> {
        let txt = text.trim().to_ascii_lowercase();
        if !txt.is_ascii() || (txt.len() != 4 && txt.len() != 5) {
            return Err(RulesError::InvalidMove(text.to_string()));
        }
        let from = parse_square(&txt[0..2]).ok_or_else(|| RulesError::InvalidMove(text.to_string()))?;
        let mut to = parse_square(&txt[2..4]).ok_or_else(|| RulesError::InvalidMove(text.to_string()))?;
        let promo = match txt.as_bytes().get(4) {
            None => None,
            Some(b'q') => Some(Piece::Queen),
            Some(b'r') => Some(Piece::Rook),
            Some(b'b') => Some(Piece::Bishop),
            Some(b'n') => Some(Piece::Knight),
            Some(_) => return Err(RulesError::InvalidMove(text.to_string())),
        };

        if self.board.piece_on(from) == Some(Piece::King)
            && (file_of(from) - file_of(to)).abs() == 2
        {
            let rook_file = if file_of(to) > file_of(from) { 7 } else { 0 };
            if let Some(rook_sq) = sq(rook_file, rank_of(from)) {
                to = rook_sq;
            }
        }

        let candidates: Vec<Move> = self
            .legal_moves_from(from)
            .into_iter()
            .filter(|m| m.to == to)
            .collect();

        let wanted = match promo {
            Some(p) => Some(p),
            None if candidates.iter().any(|m| m.promotion.is_some()) => Some(Piece::Queen),
            None => None,
        };

        candidates
            .into_iter()
            .find(|m| m.promotion == wanted)
            .ok_or_else(|| RulesError::IllegalMove(text.to_string()))
    }

    // =========================================================================
    // Game state queries
    // =========================================================================

    pub fn is_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100 && self.has_legal_moves()
    }

    /// Neither side can mate: bare kings, a single minor piece, or bishops
    /// that all stand on squares of one color.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = b.pieces(Piece::Knight).len();
        let bishops = b.pieces(Piece::Bishop);
        if knights + bishops.len() <= 1 {
            return true;
        }
        if knights > 0 {
            return false;
        }
        let mut shades = bishops.into_iter().map(|s| (file_of(s) + rank_of(s)) % 2);
        match shades.next() {
            Some(first) => shades.all(|s| s == first),
            None => true,
        }
    }

    /// Draw by stalemate, the fifty-move rule or insufficient material.
    /// Repetition needs game history and is detected by the session.
    pub fn is_draw(&self) -> bool {
        self.is_stalemate() || self.is_fifty_move_draw() || self.is_insufficient_material()
    }

    pub fn is_game_over(&self) -> bool {
        !self.has_legal_moves() || self.is_draw()
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
