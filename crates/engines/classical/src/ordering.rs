//! Cheap move ordering, so alpha-beta sees the forcing moves first.
//!
//! The scores are from the moving side's point of view, which is what both
//! the maximizing and the minimizing levels want: each tries its own most
//! forcing moves first.

use std::cmp::Reverse;

use chess_core::{piece_value, relative_rank, MoveInfo, Piece, Position};

use crate::eval::OPENING_MOVES;

pub const MATE_ORDER: i32 = 100_000;
pub const CHECK_ORDER: i32 = 5_000;
pub const CAPTURE_ORDER: i32 = 1_000;
pub const PROMOTION_ORDER: i32 = 800;
pub const CASTLE_ORDER: i32 = 500;
pub const DEVELOPMENT_ORDER: i32 = 200;

/// Ordering score of one move. Higher is searched first.
pub fn order_score(info: &MoveInfo, pos: &Position) -> i32 {
    if info.flags.mate {
        return MATE_ORDER;
    }
    let mut score = 0;
    if info.flags.check {
        score += CHECK_ORDER;
    }
    if let Some(victim) = info.captured {
        score += CAPTURE_ORDER + piece_value(victim);
    }
    if info.mv.promotion == Some(Piece::Queen) {
        score += PROMOTION_ORDER;
    }
    if info.flags.castle {
        score += CASTLE_ORDER;
    }
    if is_developing(info, pos) {
        score += DEVELOPMENT_ORDER;
    }
    score
}

/// A knight or bishop leaving its back rank during the opening.
fn is_developing(info: &MoveInfo, pos: &Position) -> bool {
    matches!(info.piece, Piece::Knight | Piece::Bishop)
        && pos.fullmove_number() < OPENING_MOVES
        && relative_rank(info.mv.from, info.color) == 0
        && relative_rank(info.mv.to, info.color) > 0
}

/// Sort moves best first. The sort is stable, so equal scores keep their
/// relative order and sorting twice changes nothing.
pub fn sort_by_order(moves: &mut [MoveInfo], pos: &Position) {
    moves.sort_by_cached_key(|info| Reverse(order_score(info, pos)));
}

/// Legal moves of `pos`, ordered.
pub fn ordered_moves(pos: &Position) -> Vec<MoveInfo> {
    let mut moves = pos.verbose_moves();
    sort_by_order(&mut moves, pos);
    moves
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
