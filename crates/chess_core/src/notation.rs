//! Move notation: SAN for the move list, coordinate text for the prompt.

use cozy_chess::Board;

use crate::position::{MoveFlags, MoveInfo};
use crate::types::*;

/// Generate SAN for a legal move. `legal` must hold every legal move of the
/// position so that ambiguous piece moves can be disambiguated.
pub fn san(mv: Move, piece: Piece, flags: &MoveFlags, legal: &[Move], board: &Board) -> String {
    let mut san = String::new();

    // Castling
    if flags.castle {
        if file_of(mv.to) > file_of(mv.from) {
            san.push_str("O-O");
        } else {
            san.push_str("O-O-O");
        }
        push_check_suffix(&mut san, flags);
        return san;
    }

    // Piece letter (except for pawns)
    if piece != Piece::Pawn {
        san.push(piece_letter(piece));

        let rivals: Vec<Square> = legal
            .iter()
            .filter(|m| m.to == mv.to && m.from != mv.from && board.piece_on(m.from) == Some(piece))
            .map(|m| m.from)
            .collect();
        if !rivals.is_empty() {
            let name = square_name(mv.from);
            let shares_file = rivals.iter().any(|&s| s.file() == mv.from.file());
            let shares_rank = rivals.iter().any(|&s| s.rank() == mv.from.rank());
            if !shares_file {
                san.push_str(&name[0..1]);
            } else if !shares_rank {
                san.push_str(&name[1..2]);
            } else {
                san.push_str(&name);
            }
        }
    }

    // Capture indicator
    if flags.capture {
        if piece == Piece::Pawn {
            san.push_str(&square_name(mv.from)[0..1]);
        }
        san.push('x');
    }

    // Destination square
    san.push_str(&square_name(mv.to));

    // Promotion
    if let Some(promo) = mv.promotion {
        san.push('=');
        san.push(piece_letter(promo));
    }

    push_check_suffix(&mut san, flags);
    san
}

fn push_check_suffix(san: &mut String, flags: &MoveFlags) {
    if flags.mate {
        san.push('#');
    } else if flags.check {
        san.push('+');
    }
}

/// Coordinate notation as a player would type it: castling is shown as the
/// king's two-square step rather than the king landing on its rook.
pub fn coordinate_text(info: &MoveInfo) -> String {
    let mv = info.mv;
    let mut s = format!("{}{}", square_name(mv.from), square_name(info.landing_square()));
    if let Some(p) = mv.promotion {
        s.push(piece_letter(p).to_ascii_lowercase());
    }
    s
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
