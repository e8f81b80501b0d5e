//! Chess board representation and game logic.
//!
//! Bitboards plus a mailbox array back a fully reversible make/unmake
//! engine with incremental Zobrist hashing. Castling is supported for both
//! standard chess and Chess960, where king and rook starting files vary.
//!
//! # Example
//! ```
//! use tabia::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attack_tables;
mod debug;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use debug::bitboard_grid;
pub use error::FenError;
pub use fen::STARTING_FEN;
pub use state::Board;
pub use state::Variant;
pub use types::{Bitboard, Color, Move, MoveList, Piece, Square};

// Internal shorthand shared between the sibling files
pub(crate) use types::{
    bit, castle_bit, pop_lsb, B_OO, B_OOO, FILE_A, FILE_H, PROMOTION_KINDS, RANK_1, RANK_8, W_OO,
    W_OOO,
};
