//! Text rendering of the board

use chess_core::{piece_letter, Color, Position, Square};

/// Board from White's side, rank 8 first. White pieces are upper case, the
/// squares of the last move are bracketed.
pub fn render(pos: &Position, highlight: &[Square]) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let sq = Square::ALL[rank * 8 + file];
            let glyph = match pos.piece_at(sq) {
                Some((Color::White, piece)) => piece_letter(piece),
                Some((Color::Black, piece)) => piece_letter(piece).to_ascii_lowercase(),
                None => '.',
            };
            if highlight.contains(&sq) {
                out.push_str(&format!("[{glyph}]"));
            } else {
                out.push_str(&format!(" {glyph} "));
            }
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h\n");
    out
}
