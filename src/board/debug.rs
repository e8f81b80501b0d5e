//! Human-readable renderings for debugging.

use std::fmt;

use super::{Bitboard, Board, Color, Square};

impl fmt::Display for Board {
    /// ASCII render: a header line with side to move, castling field and
    /// en-passant target, then the eight ranks from black's side down.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.color == Color::White { "w" } else { "b" };
        let castling = self.castling_field();
        let ep = self
            .enpassant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        writeln!(f, "{side} {castling} {ep}")?;

        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::new(rank, file);
                let c = match self.piece_at(sq) {
                    Some((color, piece)) => piece.fen_char(color),
                    None => '.',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render a bitboard as an 8x8 grid, rank 8 first.
#[must_use]
pub fn bitboard_grid(bb: Bitboard) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        for file in 0..8 {
            let idx = rank * 8 + file;
            out.push(if bb >> idx & 1 == 1 { '1' } else { '.' });
            out.push(' ');
        }
        out.push('\n');
    }
    out
}
