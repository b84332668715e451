//! Table-driven move features.
//!
//! Each [`Feature`] is a predicate over a described move plus a weight. A
//! move's score is the sum of the weights it matches and its tier is the
//! first feature it matches in table order, so reordering the table
//! reorders the cascade.

use chess_core::{piece_value, MoveInfo, Piece, Square};

/// Destinations that count as central or developing.
pub const POSITIONAL_SQUARES: [Square; 12] = [
    Square::D4,
    Square::E4,
    Square::D5,
    Square::E5,
    Square::C3,
    Square::F3,
    Square::C6,
    Square::F6,
    Square::D2,
    Square::E2,
    Square::D7,
    Square::E7,
];

/// Edge squares a pawn should not be pushed to.
pub const WEAK_PAWN_SQUARES: [Square; 4] = [Square::A3, Square::H3, Square::A6, Square::H6];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Mate,
    QueenPromotion,
    Check,
    Capture,
    /// Check or capture, as a single flat tier
    Forcing,
    Positional,
    NotBad,
}

#[derive(Clone, Copy, Debug)]
pub struct Feature {
    pub kind: FeatureKind,
    pub weight: i32,
    pub matches: fn(&MoveInfo) -> bool,
}

impl Feature {
    pub fn new(kind: FeatureKind, weight: i32) -> Self {
        let matches: fn(&MoveInfo) -> bool = match kind {
            FeatureKind::Mate => gives_mate,
            FeatureKind::QueenPromotion => promotes_to_queen,
            FeatureKind::Check => gives_check,
            FeatureKind::Capture => is_capture,
            FeatureKind::Forcing => is_forcing,
            FeatureKind::Positional => is_positional,
            FeatureKind::NotBad => is_not_bad,
        };
        Self {
            kind,
            weight,
            matches,
        }
    }

    /// Contribution of this feature to `info`'s score (0 if it does not match).
    pub fn score(&self, info: &MoveInfo) -> i32 {
        if !(self.matches)(info) {
            return 0;
        }
        match self.kind {
            FeatureKind::Capture => self.weight + info.captured.map(piece_value).unwrap_or(0),
            _ => self.weight,
        }
    }
}

pub fn gives_mate(info: &MoveInfo) -> bool {
    info.flags.mate
}

pub fn gives_check(info: &MoveInfo) -> bool {
    info.flags.check
}

pub fn is_capture(info: &MoveInfo) -> bool {
    info.flags.capture
}

pub fn is_forcing(info: &MoveInfo) -> bool {
    info.flags.check || info.flags.capture
}

pub fn promotes_to_queen(info: &MoveInfo) -> bool {
    info.mv.promotion == Some(Piece::Queen)
}

pub fn is_under_promotion(info: &MoveInfo) -> bool {
    matches!(info.mv.promotion, Some(p) if p != Piece::Queen)
}

pub fn is_positional(info: &MoveInfo) -> bool {
    POSITIONAL_SQUARES.contains(&info.mv.to)
}

/// A pawn pushed to a weak edge square.
pub fn is_bad(info: &MoveInfo) -> bool {
    info.piece == Piece::Pawn && WEAK_PAWN_SQUARES.contains(&info.mv.to)
}

pub fn is_not_bad(info: &MoveInfo) -> bool {
    !is_bad(info)
}

/// Score and tier of a move against a feature table.
#[derive(Clone, Debug)]
pub struct RankedMove {
    pub info: MoveInfo,
    /// Index of the first matching feature; `features.len()` if none matched
    pub tier: usize,
    pub score: i32,
}

pub fn rank(features: &[Feature], info: MoveInfo) -> RankedMove {
    let tier = features
        .iter()
        .position(|f| (f.matches)(&info))
        .unwrap_or(features.len());
    let score = features.iter().map(|f| f.score(&info)).sum();
    RankedMove { info, tier, score }
}
