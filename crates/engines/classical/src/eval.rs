//! Hand-tuned position evaluation.
//!
//! Every score is from a fixed reference side's point of view (positive is
//! good for `reference`), never from the side to move, so the search can
//! alternate max and min levels over one scale.

use chess_core::{
    piece_value, rank_of, relative_rank, sq, file_of, Color, Piece, Position, Square,
};

use crate::pst;

/// Score of a checkmated side. Mates found by the search are adjusted by
/// their distance from the root, so anything beyond this threshold is a mate.
pub const MATE_SCORE: i32 = 100_000;
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

pub const MOBILITY_WEIGHT: i32 = 1;
pub const KING_SHIELD_BONUS: i32 = 10;
pub const ISOLATED_PAWN_PENALTY: i32 = -15;
pub const DOUBLED_PAWN_PENALTY: i32 = -12;
/// Indexed by the pawn's rank counted from its own side
pub const PASSED_PAWN_BONUS: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 0];
pub const CENTER_OCCUPY_BONUS: i32 = 20;
pub const CENTER_ATTACK_BONUS: i32 = 5;
pub const NEAR_CENTER_OCCUPY_BONUS: i32 = 10;
pub const NEAR_CENTER_ATTACK_BONUS: i32 = 2;
pub const UNDEVELOPED_MINOR_PENALTY: i32 = -15;
pub const UNDEVELOPED_MAJOR_PENALTY: i32 = -5;
pub const CHECK_BONUS: i32 = 30;

/// Development is only scored before this full move.
pub const OPENING_MOVES: u16 = 10;
/// The king switches to its endgame table from this full move on.
pub const ENDGAME_MOVES: u16 = 40;

const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];
const NEAR_CENTER: [Square; 4] = [Square::C3, Square::F3, Square::C6, Square::F6];

/// Starting squares (White's side) of the pieces the development term watches.
const HOME_SQUARES: [(Piece, Square); 7] = [
    (Piece::Knight, Square::B1),
    (Piece::Knight, Square::G1),
    (Piece::Bishop, Square::C1),
    (Piece::Bishop, Square::F1),
    (Piece::Queen, Square::D1),
    (Piece::Rook, Square::A1),
    (Piece::Rook, Square::H1),
];

/// Each evaluation term, already signed for the reference side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub material: i32,
    pub placement: i32,
    pub mobility: i32,
    pub king_safety: i32,
    pub pawn_structure: i32,
    pub center: i32,
    pub development: i32,
    pub check: i32,
}

impl EvalBreakdown {
    pub fn total(&self) -> i32 {
        self.material
            + self.placement
            + self.mobility
            + self.king_safety
            + self.pawn_structure
            + self.center
            + self.development
            + self.check
    }
}

/// Evaluates the position for `reference`.
///
/// Returns `-MATE_SCORE` if `reference` is mated, `MATE_SCORE` if its
/// opponent is, 0 for a drawn end state, and the sum of the heuristic terms
/// otherwise.
pub fn evaluate(pos: &Position, reference: Color) -> i32 {
    if let Some(score) = terminal_score(pos, reference) {
        return score;
    }
    evaluate_terms(pos, reference).total()
}

/// Score of a finished game, or None while play continues.
pub fn terminal_score(pos: &Position, reference: Color) -> Option<i32> {
    if !pos.has_legal_moves() {
        if !pos.is_check() {
            return Some(0);
        }
        return Some(if pos.side_to_move() == reference {
            -MATE_SCORE
        } else {
            MATE_SCORE
        });
    }
    if pos.is_fifty_move_draw() || pos.is_insufficient_material() {
        return Some(0);
    }
    None
}

/// The heuristic terms, without the terminal check.
pub fn evaluate_terms(pos: &Position, reference: Color) -> EvalBreakdown {
    let sign = |white: i32, black: i32| {
        if reference == Color::White {
            white - black
        } else {
            black - white
        }
    };
    let per_color = |term: fn(&Position, Color) -> i32| {
        sign(term(pos, Color::White), term(pos, Color::Black))
    };

    // Terms about the side to move are positive when it is `reference`
    let stm_sign = if pos.side_to_move() == reference { 1 } else { -1 };

    EvalBreakdown {
        material: per_color(material),
        placement: per_color(placement),
        mobility: stm_sign * MOBILITY_WEIGHT * pos.legal_move_count() as i32,
        king_safety: per_color(king_shield),
        pawn_structure: per_color(pawn_structure),
        center: per_color(center_control),
        development: per_color(development),
        check: if pos.is_check() { -stm_sign * CHECK_BONUS } else { 0 },
    }
}

pub fn material(pos: &Position, color: Color) -> i32 {
    Piece::ALL
        .iter()
        .map(|&piece| piece_value(piece) * pos.pieces(color, piece).len() as i32)
        .sum()
}

pub fn placement(pos: &Position, color: Color) -> i32 {
    let endgame = pos.fullmove_number() >= ENDGAME_MOVES;
    let mut score = 0;
    for piece in Piece::ALL {
        for s in pos.pieces(color, piece) {
            score += pst::placement(piece, color, s, endgame);
        }
    }
    score
}

/// Friendly pawns in the three files around the king, from the king's rank
/// two ranks forward.
pub fn king_shield(pos: &Position, color: Color) -> i32 {
    let king = pos.king(color);
    let forward = if color == Color::White { 1 } else { -1 };
    let pawns = pos.pieces(color, Piece::Pawn);

    let mut shield = 0;
    for df in -1..=1 {
        for step in 0..3 {
            if let Some(s) = sq(file_of(king) + df, rank_of(king) + step * forward) {
                if pawns.has(s) {
                    shield += 1;
                }
            }
        }
    }
    shield * KING_SHIELD_BONUS
}

/// Isolated and doubled pawn penalties plus passed pawn bonuses.
pub fn pawn_structure(pos: &Position, color: Color) -> i32 {
    let pawns = pos.pieces(color, Piece::Pawn);
    let enemy = pos.pieces(!color, Piece::Pawn);

    let mut per_file = [0i32; 8];
    for p in pawns {
        per_file[file_of(p) as usize] += 1;
    }

    let mut score = 0;
    for &count in &per_file {
        if count > 1 {
            score += DOUBLED_PAWN_PENALTY * (count - 1);
        }
    }

    for p in pawns {
        let file = file_of(p);
        let left = if file > 0 { per_file[(file - 1) as usize] } else { 0 };
        let right = if file < 7 { per_file[(file + 1) as usize] } else { 0 };
        if left == 0 && right == 0 {
            score += ISOLATED_PAWN_PENALTY;
        }

        let rank = relative_rank(p, color);
        let blocked = enemy.into_iter().any(|e| {
            (file_of(e) - file).abs() <= 1 && relative_rank(e, color) > rank
        });
        if !blocked {
            score += PASSED_PAWN_BONUS[rank as usize];
        }
    }
    score
}

pub fn center_control(pos: &Position, color: Color) -> i32 {
    let own = pos.board().colors(color);
    let attacked = pos.attacks(color);

    let mut score = 0;
    for s in CENTER {
        if own.has(s) {
            score += CENTER_OCCUPY_BONUS;
        }
        if attacked.has(s) {
            score += CENTER_ATTACK_BONUS;
        }
    }
    for s in NEAR_CENTER {
        if own.has(s) {
            score += NEAR_CENTER_OCCUPY_BONUS;
        }
        if attacked.has(s) {
            score += NEAR_CENTER_ATTACK_BONUS;
        }
    }
    score
}

/// Penalty for pieces still on their starting squares early in the game.
pub fn development(pos: &Position, color: Color) -> i32 {
    if pos.fullmove_number() >= OPENING_MOVES {
        return 0;
    }
    let mut score = 0;
    for (piece, home) in HOME_SQUARES {
        let home = match color {
            Color::White => home,
            Color::Black => Square::ALL[(home as usize) ^ 56],
        };
        if pos.piece_at(home) == Some((color, piece)) {
            score += match piece {
                Piece::Knight | Piece::Bishop => UNDEVELOPED_MINOR_PENALTY,
                _ => UNDEVELOPED_MAJOR_PENALTY,
            };
        }
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
