//! FEN parsing and emission.
//!
//! Parsing is atomic: the input is validated and loaded into a scratch board,
//! so a failed parse never leaves a half-mutated position behind. Diagnostics
//! carry the byte offset of the problem within the input.

use std::str::FromStr;

use super::error::FenError;
use super::{
    Board, Color, Piece, Square, Variant, B_OO, B_OOO, RANK_1, RANK_8, W_OO, W_OOO,
};

/// The standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// When true, FENs must carry all six fields; otherwise the clocks default.
const STRICT_FIELDS: bool = false;

/// Whitespace-separated fields with their byte offsets.
fn split_fields(s: &str) -> Vec<(usize, &str)> {
    let mut fields = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() {
            if let Some(from) = start.take() {
                fields.push((from, &s[from..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(from) = start {
        fields.push((from, &s[from..]));
    }
    fields
}

impl Board {
    /// Parse a standard-chess position from FEN notation.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        Self::try_from_fen_variant(fen, Variant::Standard)
    }

    /// Parse a position from FEN notation for the given variant.
    ///
    /// In Chess960 the castling field may use rook file letters
    /// (Shredder-FEN) or `KQkq`, which resolves to the outermost rook of the
    /// back rank.
    pub fn try_from_fen_variant(fen: &str, variant: Variant) -> Result<Self, FenError> {
        let fields = split_fields(fen);
        if fields.len() < 4 || fields.len() > 6 || (STRICT_FIELDS && fields.len() != 6) {
            let offset = fields.get(6).map_or(fen.len(), |f| f.0);
            return Err(FenError::FieldCount {
                found: fields.len(),
                offset,
            });
        }

        let (placement_at, placement) = fields[0];
        let (side_at, side) = fields[1];
        let (castling_at, castling_str) = fields[2];
        let (ep_at, ep_str) = fields[3];
        let fifty_str = fields.get(4).map_or("0", |f| f.1);
        let fullmove_str = fields.get(5).map_or("1", |f| f.1);

        // Validate before building so nothing is half-applied.
        let slashes = placement.bytes().filter(|&b| b == b'/').count();
        if slashes != 7 {
            return Err(FenError::RankCount {
                slashes,
                offset: placement_at,
            });
        }
        if !placement.contains('K') || !placement.contains('k') {
            return Err(FenError::MissingKing {
                offset: placement_at,
            });
        }
        if !side.eq_ignore_ascii_case("w") && !side.eq_ignore_ascii_case("b") {
            return Err(FenError::InvalidSideToMove {
                found: side.to_string(),
                offset: side_at,
            });
        }
        let ep_target = if ep_str == "-" {
            None
        } else {
            // Only a 3rd- or 6th-rank square can ever be an en-passant target.
            match Square::from_algebraic(ep_str) {
                Some(sq) if sq.rank() == 2 || sq.rank() == 5 => Some(sq),
                _ => {
                    return Err(FenError::InvalidEnPassant {
                        found: ep_str.to_string(),
                        offset: ep_at,
                    })
                }
            }
        };

        let mut board = Board::empty(variant);

        // Placement, rank 8 down to rank 1.
        let mut cursor = placement_at;
        for (rank_idx, rank_str) in placement.split('/').enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for (ci, c) in rank_str.char_indices() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece {
                        ch: c,
                        offset: cursor + ci,
                    })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            offset: cursor + ci,
                        });
                    }
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    board.add_piece(Square::new(rank, file), piece, color);
                    file += 1;
                }
            }
            cursor += rank_str.len() + 1;
        }

        if variant == Variant::Chess960 {
            // Castling origins are wherever the kings actually stand.
            if let (Some(wk), Some(bk)) = (board.kings[0], board.kings[1]) {
                board.ini_kings = [wk, bk];
            }
        }

        if side.eq_ignore_ascii_case("b") {
            board.set_color(Color::Black);
        }

        let mut castling = 0u8;
        for (ci, c) in castling_str.char_indices() {
            if c == '-' {
                continue;
            }
            let ok = match variant {
                Variant::Standard => match c {
                    'K' => {
                        castling |= W_OO;
                        true
                    }
                    'Q' => {
                        castling |= W_OOO;
                        true
                    }
                    'k' => {
                        castling |= B_OO;
                        true
                    }
                    'q' => {
                        castling |= B_OOO;
                        true
                    }
                    _ => false,
                },
                Variant::Chess960 => apply_shuffle_castling_char(&mut board, c, &mut castling),
            };
            if !ok {
                return Err(FenError::InvalidCastling {
                    ch: c,
                    offset: castling_at + ci,
                });
            }
        }
        board.set_castling(castling);

        // The capturability filter may still strip the target; the stored
        // value is what keeps the hash canonical.
        board.set_enpassant(ep_target);

        board.fifty = fifty_str.parse().unwrap_or(0);
        let fullmove: u32 = fullmove_str.parse().unwrap_or(1);
        board.ply_count = fullmove.saturating_sub(1) * 2
            + if board.color == Color::Black { 1 } else { 0 };

        Ok(board)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible
    /// parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Replace this position with the one in `fen`, keeping the variant.
    ///
    /// On error the board is left exactly as it was.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        *self = Self::try_from_fen_variant(fen, self.variant)?;
        Ok(())
    }

    /// Emit the current position as FEN. Round-trips through
    /// [`Board::try_from_fen_variant`] for any reachable position.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::new(rank, file);
                match self.piece_at(sq) {
                    None => empty += 1,
                    Some((color, piece)) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.fen_char(color));
                    }
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        let side = if self.color == Color::White { 'w' } else { 'b' };
        let ep = self
            .enpassant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        let fullmove = self.ply_count / 2 + 1;

        format!(
            "{} {} {} {} {} {}",
            fen,
            side,
            self.castling_field(),
            ep,
            self.fifty,
            fullmove
        )
    }

    /// FEN castling field: `KQkq` letters in standard chess, rook file
    /// letters (upper for white) in Chess960.
    pub(crate) fn castling_field(&self) -> String {
        if self.castling == 0 {
            return "-".to_string();
        }
        let mut field = String::new();
        match self.variant {
            Variant::Standard => {
                if self.castling & W_OO != 0 {
                    field.push('K');
                }
                if self.castling & W_OOO != 0 {
                    field.push('Q');
                }
                if self.castling & B_OO != 0 {
                    field.push('k');
                }
                if self.castling & B_OOO != 0 {
                    field.push('q');
                }
            }
            Variant::Chess960 => {
                if self.castling & W_OO != 0 {
                    field.push(file_letter(self.ini_rooks[0][1]).to_ascii_uppercase());
                }
                if self.castling & W_OOO != 0 {
                    field.push(file_letter(self.ini_rooks[0][0]).to_ascii_uppercase());
                }
                if self.castling & B_OO != 0 {
                    field.push(file_letter(self.ini_rooks[1][1]));
                }
                if self.castling & B_OOO != 0 {
                    field.push(file_letter(self.ini_rooks[1][0]));
                }
            }
        }
        field
    }

    /// Outermost rook of `color` on its back rank; side 0 picks the
    /// leftmost, side 1 the rightmost.
    fn outermost_rook(&self, color: Color, side: usize) -> Option<Square> {
        let rank_mask = if color == Color::White { RANK_1 } else { RANK_8 };
        let rooks = self.boards[color.index()][Piece::Rook.index()] & rank_mask;
        if rooks == 0 {
            return None;
        }
        let idx = if side == 1 {
            63 - rooks.leading_zeros() as usize
        } else {
            rooks.trailing_zeros() as usize
        };
        Some(Square::from_index(idx))
    }
}

fn file_letter(sq: Square) -> char {
    (b'a' + sq.file() as u8) as char
}

/// One character of a Chess960 castling field. A file letter names the rook
/// keeping its rights on that side (queenside when left of the king);
/// `KQkq` falls back to the outermost rook.
fn apply_shuffle_castling_char(board: &mut Board, c: char, castling: &mut u8) -> bool {
    let (color, right_kingside, right_queenside) = if c.is_ascii_uppercase() {
        (Color::White, W_OO, W_OOO)
    } else {
        (Color::Black, B_OO, B_OOO)
    };
    let c_idx = color.index();

    match c.to_ascii_lowercase() {
        file_ch @ 'a'..='h' => {
            let file = file_ch as usize - 'a' as usize;
            let back_rank = if color == Color::White { 0 } else { 7 };
            let rook = Square::new(back_rank, file);
            if file < board.ini_kings[c_idx].file() {
                *castling |= right_queenside;
                board.ini_rooks[c_idx][0] = rook;
            } else {
                *castling |= right_kingside;
                board.ini_rooks[c_idx][1] = rook;
            }
            true
        }
        'k' => match board.outermost_rook(color, 1) {
            Some(rook) => {
                *castling |= right_kingside;
                board.ini_rooks[c_idx][1] = rook;
                true
            }
            None => false,
        },
        'q' => match board.outermost_rook(color, 0) {
            Some(rook) => {
                *castling |= right_queenside;
                board.ini_rooks[c_idx][0] = rook;
                true
            }
            None => false,
        },
        _ => false,
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
