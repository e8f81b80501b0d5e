//! The board aggregate: four redundant position views plus game-state scalars.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::zobrist::ZOBRIST;

use super::attack_tables::is_attacked;
use super::fen::STARTING_FEN;
use super::{bit, Bitboard, Color, Move, Piece, Square};

/// Game variant. Only castling initial squares and the FEN castling-field
/// encoding differ between the two.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    Standard,
    Chess960,
}

/// One undo record. Pushed by `make_move` before mutating, popped by
/// `unmake_move`; the stored hash doubles as the repetition fingerprint of
/// the position the move was played from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct HistoryEntry {
    pub(crate) mv: Move,
    pub(crate) captured: Piece,
    pub(crate) enpassant: Option<Square>,
    pub(crate) castling: u8,
    pub(crate) hash: u64,
    pub(crate) fifty: u32,
    pub(crate) checked: Option<bool>,
    pub(crate) op_checked: Option<bool>,
}

/// Chess position with reversible move application.
///
/// The same set of pieces is tracked four ways: per-kind bitboards, per-color
/// occupancy, total occupancy, and a 64-entry mailbox of piece kinds. The
/// mutation primitives in `make_unmake.rs` are the single write path that
/// keeps the views and both incremental hashes consistent.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    // boards[color][piece_kind]; kind slot 0 is unused
    pub(crate) boards: [[Bitboard; 7]; 2],
    pub(crate) friends: [Bitboard; 2],
    pub(crate) blocker: Bitboard,
    pub(crate) mailbox: [Piece; 64],
    pub(crate) kings: [Option<Square>; 2],
    pub(crate) color: Color,
    pub(crate) castling: u8,
    pub(crate) enpassant: Option<Square>,
    pub(crate) fifty: u32,
    pub(crate) ply_count: u32,
    pub(crate) hash: u64,
    pub(crate) pawn_hash: u64,
    pub(crate) has_castled: [bool; 2],
    pub(crate) checked: Option<bool>,
    pub(crate) op_checked: Option<bool>,
    // Starting squares of the king and of the queenside/kingside castling
    // rook; fixed in standard chess, discovered from the FEN in Chess960.
    pub(crate) ini_kings: [Square; 2],
    pub(crate) ini_rooks: [[Square; 2]; 2],
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) variant: Variant,
}

impl Board {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Board::from_fen(STARTING_FEN)
    }

    /// Empty board, white to move, all counters zeroed.
    pub(crate) fn empty(variant: Variant) -> Self {
        Board {
            boards: [[0; 7]; 2],
            friends: [0; 2],
            blocker: 0,
            mailbox: [Piece::Empty; 64],
            kings: [None; 2],
            color: Color::White,
            castling: 0,
            enpassant: None,
            fifty: 0,
            ply_count: 0,
            hash: 0,
            pawn_hash: 0,
            has_castled: [false; 2],
            checked: None,
            op_checked: None,
            ini_kings: [Square::E1, Square::E8],
            ini_rooks: [[Square::A1, Square::H1], [Square::A8, Square::H8]],
            history: Vec::new(),
            variant,
        }
    }

    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Hash restricted to the pawns, for pawn-structure caches.
    #[must_use]
    pub fn pawn_hash(&self) -> u64 {
        self.pawn_hash
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.color
    }

    /// Plies since the last pawn move or capture.
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.fifty
    }

    /// Half-moves played since the game start the position was loaded from.
    #[must_use]
    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    /// Raw castling-rights mask.
    #[must_use]
    pub fn castling_rights(&self) -> u8 {
        self.castling
    }

    /// Square a pawn of the side to move could land on with an en-passant
    /// capture. Always capturable when set.
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.enpassant
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn has_castled(&self, color: Color) -> bool {
        self.has_castled[color.index()]
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// Piece kind and color on `sq`, if any.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let piece = self.mailbox[sq.index()];
        if piece == Piece::Empty {
            return None;
        }
        let color = if self.friends[0] & bit(sq) != 0 {
            Color::White
        } else {
            Color::Black
        };
        Some((color, piece))
    }

    pub(crate) fn is_empty_square(&self, sq: Square) -> bool {
        self.mailbox[sq.index()] == Piece::Empty
    }

    /// The last move applied and not yet undone.
    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.mv)
    }

    /// Number of applied moves that can still be undone.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// True if `square` is attacked by any piece of `by`.
    #[must_use]
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        is_attacked(self, square, by)
    }

    /// Whether the side to move is in check. Memoized until the next
    /// `make_move`/`unmake_move`.
    pub fn is_checked(&mut self) -> bool {
        if let Some(checked) = self.checked {
            return checked;
        }
        let checked = match self.kings[self.color.index()] {
            Some(king) => is_attacked(self, king, self.color.other()),
            None => false,
        };
        self.checked = Some(checked);
        checked
    }

    /// Whether the side that just moved left its king in check. Memoized.
    pub fn opponent_is_checked(&mut self) -> bool {
        if let Some(checked) = self.op_checked {
            return checked;
        }
        let them = self.color.other();
        let checked = match self.kings[them.index()] {
            Some(king) => is_attacked(self, king, self.color),
            None => false,
        };
        self.op_checked = Some(checked);
        checked
    }

    /// How often the current position has occurred, this occurrence included.
    ///
    /// Scans the undo stack backwards in two-ply steps, never past the last
    /// irreversible move; stops early once `threshold` is reached.
    #[must_use]
    pub fn repetition_count(&self, threshold: u32) -> u32 {
        let mut count = 1;
        let limit = self.history.len().min(self.fifty as usize);
        let mut ply = 4;
        while ply <= limit {
            if self.history[self.history.len() - ply].hash == self.hash {
                count += 1;
                if count >= threshold {
                    break;
                }
            }
            ply += 2;
        }
        count
    }

    /// Draw by the fifty-move rule or threefold repetition.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        if self.fifty >= 100 {
            return true;
        }
        self.repetition_count(3) >= 3
    }

    /// Recompute both hashes from scratch. The incremental values must agree
    /// with this at all times; used by tests and debug assertions.
    pub(crate) fn recomputed_hashes(&self) -> (u64, u64) {
        let mut hash = 0u64;
        let mut pawn_hash = 0u64;

        for idx in 0..64 {
            let piece = self.mailbox[idx];
            if piece == Piece::Empty {
                continue;
            }
            let color = if self.friends[0] & (1u64 << idx) != 0 {
                0
            } else {
                1
            };
            let key = ZOBRIST.piece_keys[color][piece.index()][idx];
            hash ^= key;
            if piece == Piece::Pawn {
                pawn_hash ^= key;
            }
        }

        if self.color == Color::Black {
            hash ^= ZOBRIST.black_to_move_key;
        }
        for bit_idx in 0..4 {
            if self.castling & (1 << bit_idx) != 0 {
                hash ^= ZOBRIST.castling_keys[bit_idx];
            }
        }
        if let Some(ep) = self.enpassant {
            hash ^= ZOBRIST.en_passant_keys[ep.file()];
        }

        (hash, pawn_hash)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
