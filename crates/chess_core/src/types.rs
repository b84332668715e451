pub use cozy_chess::{BitBoard, Color, File, Move, Piece, Rank, Square};

/// Material values in centipawns, indexed by `Piece as usize`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

pub fn piece_value(piece: Piece) -> i32 {
    PIECE_VALUES[piece as usize]
}

/// Key identifying a move by its squares only, used for repetition counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveKey {
    pub from: Square,
    pub to: Square,
}

impl MoveKey {
    pub fn of(mv: Move) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
        }
    }

    /// The key of the move travelling the opposite way.
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

// Helpers
pub fn file_of(sq: Square) -> i8 {
    sq.file() as i8
}
pub fn rank_of(sq: Square) -> i8 {
    sq.rank() as i8
}
pub fn sq(file: i8, rank: i8) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(Square::ALL[(rank as usize) * 8 + (file as usize)])
    } else {
        None
    }
}

/// Rank counted from `color`'s own back rank (0..=7).
pub fn relative_rank(sq: Square, color: Color) -> i8 {
    match color {
        Color::White => rank_of(sq),
        Color::Black => 7 - rank_of(sq),
    }
}

pub fn square_name(sq: Square) -> String {
    let f = (b'a' + sq.file() as u8) as char;
    let r = (b'1' + sq.rank() as u8) as char;
    format!("{f}{r}")
}

pub fn parse_square(c: &str) -> Option<Square> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0].to_ascii_lowercase();
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    sq((f - b'a') as i8, (r - b'1') as i8)
}

pub fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}
