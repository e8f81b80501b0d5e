//! Mutation primitives and the reversible move engine.
//!
//! `add_piece`/`remove_piece` are the only writers of the four position
//! views and the two incremental hashes; everything else mutates the board
//! through them plus the differential scalar setters.

#[cfg(feature = "logging")]
use log::debug;

use crate::zobrist::ZOBRIST;

use super::state::HistoryEntry;
use super::{bit, castle_bit, Board, Color, Move, Piece, Square, FILE_A, FILE_H};

// Final squares of castled kings and rooks, indexed [color][side]
// with side 0 = queenside.
pub(crate) const FIN_KINGS: [[Square; 2]; 2] =
    [[Square::C1, Square::G1], [Square::C8, Square::G8]];
pub(crate) const FIN_ROOKS: [[Square; 2]; 2] =
    [[Square::D1, Square::F1], [Square::D8, Square::F8]];

impl Board {
    /// Put `piece` of `color` on the empty square `sq`.
    ///
    /// Does not validate; the caller owns consistency.
    pub(crate) fn add_piece(&mut self, sq: Square, piece: Piece, color: Color) {
        let b = bit(sq);
        let c = color.index();
        self.boards[c][piece.index()] |= b;
        self.friends[c] |= b;
        self.blocker |= b;

        let key = ZOBRIST.piece_keys[c][piece.index()][sq.index()];
        self.hash ^= key;
        if piece == Piece::Pawn {
            self.pawn_hash ^= key;
        } else if piece == Piece::King {
            self.kings[c] = Some(sq);
        }
        self.mailbox[sq.index()] = piece;
    }

    /// Take `piece` of `color` off `sq`. Counterpart of [`Board::add_piece`].
    pub(crate) fn remove_piece(&mut self, sq: Square, piece: Piece, color: Color) {
        let b = bit(sq);
        let c = color.index();
        self.boards[c][piece.index()] &= !b;
        self.friends[c] &= !b;
        self.blocker &= !b;

        let key = ZOBRIST.piece_keys[c][piece.index()][sq.index()];
        self.hash ^= key;
        if piece == Piece::Pawn {
            self.pawn_hash ^= key;
        } else if piece == Piece::King {
            self.kings[c] = None;
        }
        self.mailbox[sq.index()] = Piece::Empty;
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        if color == self.color {
            return;
        }
        self.color = color;
        self.hash ^= ZOBRIST.black_to_move_key;
    }

    pub(crate) fn set_castling(&mut self, castling: u8) {
        if castling == self.castling {
            return;
        }
        let changed = castling ^ self.castling;
        for bit_idx in 0..4 {
            if changed & (1 << bit_idx) != 0 {
                self.hash ^= ZOBRIST.castling_keys[bit_idx];
            }
        }
        self.castling = castling;
    }

    /// Set the en-passant target, dropping it when no enemy pawn can actually
    /// make the capture. Keeps the hash canonical for repetition detection.
    pub(crate) fn set_enpassant(&mut self, target: Option<Square>) {
        let filtered = target.filter(|&sq| self.enpassant_capturable(sq));
        #[cfg(feature = "logging")]
        if let (Some(sq), None) = (target, filtered) {
            debug!("dropping uncapturable en passant target {sq}");
        }

        if filtered == self.enpassant {
            return;
        }
        if let Some(old) = self.enpassant {
            self.hash ^= ZOBRIST.en_passant_keys[old.file()];
        }
        if let Some(new) = filtered {
            self.hash ^= ZOBRIST.en_passant_keys[new.file()];
        }
        self.enpassant = filtered;
    }

    /// Whether some enemy pawn stands ready to capture onto `target`.
    fn enpassant_capturable(&self, target: Square) -> bool {
        // A rank-2 target follows a white double step, so black would capture;
        // a rank-5 target is the mirror case.
        let capturer = if target.rank() == 2 {
            Color::Black
        } else {
            Color::White
        };
        let pawns = self.boards[capturer.index()][Piece::Pawn.index()];
        let stepped = match capturer {
            Color::White => pawns << 8,
            Color::Black => pawns >> 8,
        };
        let reach = ((stepped & !FILE_A) >> 1) | ((stepped & !FILE_H) << 1);
        reach & bit(target) != 0
    }

    /// Apply `mv` to the board, pushing an undo record.
    ///
    /// The move is trusted to come from the generator; malformed input is a
    /// programmer error and corrupts the position.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.color;
        let them = us.other();
        let mut from = mv.from();
        let mut to = mv.to();
        let mut moved = self.mailbox[from.index()];
        let mut captured = self.mailbox[to.index()];
        let mut rook_move = None;

        // Castling encodings vary (in Chess960 the king's destination may
        // hold the castling rook), so resolve everything through the
        // initial-square tables.
        if let Some(side) = mv.castle_side() {
            moved = Piece::King;
            captured = Piece::Empty;
            from = self.ini_kings[us.index()];
            to = FIN_KINGS[us.index()][side];
            rook_move = Some((self.ini_rooks[us.index()][side], FIN_ROOKS[us.index()][side]));
        }

        self.history.push(HistoryEntry {
            mv,
            captured,
            enpassant: self.enpassant,
            castling: self.castling,
            hash: self.hash,
            fifty: self.fifty,
            checked: self.checked,
            op_checked: self.op_checked,
        });
        self.checked = None;
        self.op_checked = None;

        if captured != Piece::Empty {
            self.remove_piece(to, captured, them);
        }
        self.remove_piece(from, moved, us);

        if let Some((rook_from, rook_to)) = rook_move {
            self.remove_piece(rook_from, Piece::Rook, us);
            self.add_piece(rook_to, Piece::Rook, us);
            self.has_castled[us.index()] = true;
        }

        let pawn_moved = moved == Piece::Pawn;
        let mut placed = moved;
        if mv.is_en_passant() {
            let taken = match us {
                Color::White => Square::from_index(to.index() - 8),
                Color::Black => Square::from_index(to.index() + 8),
            };
            self.remove_piece(taken, Piece::Pawn, them);
        } else if let Some(kind) = mv.promoted() {
            // The pawn turns into the promoted piece before landing.
            placed = kind;
        }
        self.add_piece(to, placed, us);

        if pawn_moved && from.index().abs_diff(to.index()) == 16 {
            self.set_enpassant(Some(Square::from_index((from.index() + to.index()) / 2)));
        } else {
            self.set_enpassant(None);
        }

        // Any pawn move or capture is irreversible.
        if captured == Piece::Empty && !pawn_moved {
            self.fifty += 1;
        } else {
            self.fifty = 0;
        }

        let mut castling = self.castling;
        if moved == Piece::King {
            castling &= !castle_bit(us, 0);
            castling &= !castle_bit(us, 1);
        } else if moved == Piece::Rook {
            if from == self.ini_rooks[us.index()][0] {
                castling &= !castle_bit(us, 0);
            } else if from == self.ini_rooks[us.index()][1] {
                castling &= !castle_bit(us, 1);
            }
        }
        if captured == Piece::Rook {
            if to == self.ini_rooks[them.index()][0] {
                castling &= !castle_bit(them, 0);
            } else if to == self.ini_rooks[them.index()][1] {
                castling &= !castle_bit(them, 1);
            }
        }
        self.set_castling(castling);

        self.set_color(them);
        self.ply_count += 1;
    }

    /// Undo the last applied move, restoring the previous state exactly.
    /// Returns the move that was undone, or `None` if nothing was applied.
    pub fn unmake_move(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        // The move being undone was made by the side not currently to move.
        let us = self.color.other();
        let them = self.color;

        let mv = entry.mv;
        let mut from = mv.from();
        let mut to = mv.to();
        let mut placed = self.mailbox[to.index()];
        let mut rook_move = None;

        if let Some(side) = mv.castle_side() {
            // After castling it is the king that sits on the destination.
            placed = Piece::King;
            from = self.ini_kings[us.index()];
            to = FIN_KINGS[us.index()][side];
            rook_move = Some((self.ini_rooks[us.index()][side], FIN_ROOKS[us.index()][side]));
        }

        self.remove_piece(to, placed, us);

        if let Some((rook_from, rook_to)) = rook_move {
            self.remove_piece(rook_to, Piece::Rook, us);
            self.add_piece(rook_from, Piece::Rook, us);
            self.has_castled[us.index()] = false;
        }

        if entry.captured != Piece::Empty {
            self.add_piece(to, entry.captured, them);
        }

        if mv.is_en_passant() {
            let taken = match us {
                Color::White => Square::from_index(to.index() - 8),
                Color::Black => Square::from_index(to.index() + 8),
            };
            self.add_piece(taken, Piece::Pawn, them);
        }

        if mv.promoted().is_some() {
            placed = Piece::Pawn;
        }
        self.add_piece(from, placed, us);

        // Scalars come straight from the record. The piece-key XORs above
        // cancel pairwise, so the restored hash is bit-exact.
        self.color = us;
        self.checked = entry.checked;
        self.op_checked = entry.op_checked;
        self.enpassant = entry.enpassant;
        self.castling = entry.castling;
        self.hash = entry.hash;
        self.fifty = entry.fifty;
        self.ply_count -= 1;
        Some(mv)
    }
}
