//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `fen.rs` - FEN parsing, emission and diagnostics
//! - `make_unmake.rs` - move application and reversal
//! - `castling.rs` - castling in standard chess and Chess960
//! - `repetition.rs` - repetition and fifty-move counters
//! - `perft.rs` - node-count validation of the whole move path
//! - `proptest.rs` - property-based tests

mod castling;

use super::{bit, Board, Color, Piece, Square};

/// Check that bitboards, per-color occupancy, the total occupancy and the
/// mailbox all describe the same position, that king squares are tracked,
/// and that the incremental hashes match a from-scratch recomputation.
pub(crate) fn assert_consistent(board: &Board) {
    let mut friends = [0u64; 2];
    for (c, friendly) in friends.iter_mut().enumerate() {
        for kind in 1..7 {
            *friendly |= board.boards[c][kind];
        }
        assert_eq!(*friendly, board.friends[c], "friends[{c}] out of sync");
    }
    assert_eq!(friends[0] & friends[1], 0, "color sets overlap");
    assert_eq!(friends[0] | friends[1], board.blocker, "blocker out of sync");

    for idx in 0..64 {
        let sq = Square::from_index(idx);
        let kind = board.mailbox[idx];
        if kind == Piece::Empty {
            assert_eq!(
                board.blocker & bit(sq),
                0,
                "mailbox says {sq} is empty but it is occupied"
            );
        } else {
            let c = if board.friends[0] & bit(sq) != 0 { 0 } else { 1 };
            assert_ne!(
                board.boards[c][kind.index()] & bit(sq),
                0,
                "mailbox/bitboard mismatch at {sq}"
            );
        }
    }

    for (c, color) in [Color::White, Color::Black].into_iter().enumerate() {
        let kings = board.boards[c][Piece::King.index()];
        assert!(kings.count_ones() <= 1, "more than one {color:?} king");
        if kings == 0 {
            assert_eq!(board.king_square(color), None);
        } else {
            assert_eq!(board.king_square(color).map(bit), Some(kings));
        }
    }

    let (hash, pawn_hash) = board.recomputed_hashes();
    assert_eq!(board.hash(), hash, "incremental hash drifted");
    assert_eq!(board.pawn_hash(), pawn_hash, "incremental pawn hash drifted");
}

pub(crate) const KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Find the legal move matching origin, destination and promotion kind.
pub(crate) fn find_move(
    board: &mut Board,
    from: Square,
    to: Square,
    promoted: Option<Piece>,
) -> super::Move {
    for &m in board.legal_moves().iter() {
        if m.from() == from && m.to() == to && m.promoted() == promoted {
            return m;
        }
    }
    panic!("expected move {from}{to} not found");
}
