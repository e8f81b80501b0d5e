//! Castling tests for standard chess and Chess960.

use crate::board::{Board, Color, Move, Piece, Square, Variant};

use super::assert_consistent;

const CORNER_ROOKS: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

fn castle_move(board: &mut Board, king_to: Square) -> Move {
    for &m in board.legal_moves().iter() {
        if m.is_castling() && m.to() == king_to {
            return m;
        }
    }
    panic!("castle to {king_to} not available");
}

#[test]
fn white_kingside_castle() {
    let mut board = Board::from_fen(CORNER_ROOKS);
    let before = board.clone();

    let mv = castle_move(&mut board, Square::G1);
    board.make_move(mv);

    assert_eq!(board.piece_at(Square::G1), Some((Color::White, Piece::King)));
    assert_eq!(board.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(Square::E1), None);
    assert_eq!(board.piece_at(Square::H1), None);
    assert_eq!(board.castling_rights() & 0b0011, 0);
    assert!(board.has_castled(Color::White));
    assert_consistent(&board);

    board.unmake_move();
    assert_eq!(board, before);
}

#[test]
fn white_queenside_castle() {
    let mut board = Board::from_fen(CORNER_ROOKS);
    let before = board.clone();

    let mv = castle_move(&mut board, Square::C1);
    board.make_move(mv);

    assert_eq!(board.piece_at(Square::C1), Some((Color::White, Piece::King)));
    assert_eq!(board.piece_at(Square::D1), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(Square::A1), None);
    assert_consistent(&board);

    board.unmake_move();
    assert_eq!(board, before);
}

#[test]
fn king_move_clears_both_rights() {
    let mut board = Board::from_fen(CORNER_ROOKS);
    let mv = super::find_move(&mut board, Square::E1, Square::new(1, 4), None);
    board.make_move(mv);
    assert_eq!(board.castling_rights(), 0b1100);
}

#[test]
fn rook_move_clears_one_right() {
    let mut board = Board::from_fen(CORNER_ROOKS);
    let mv = super::find_move(&mut board, Square::H1, Square::new(0, 6), None);
    board.make_move(mv);
    assert_eq!(board.castling_rights(), 0b1110);
}

#[test]
fn rook_capture_clears_opponent_right() {
    let mut board = Board::from_fen(CORNER_ROOKS);
    let mv = super::find_move(&mut board, Square::A1, Square::A8, None);
    board.make_move(mv);
    // Both queenside rights go: ours because the rook left its corner,
    // theirs because the corner rook was captured.
    assert_eq!(board.castling_rights(), 0b0101);
}

#[test]
fn no_castling_through_attacked_square() {
    // A black rook on f2 covers f1: kingside is off, queenside still works.
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1");
    let moves = board.legal_moves();
    assert!(!moves
        .iter()
        .any(|m| m.is_castling() && m.to() == Square::G1));
    assert!(moves.iter().any(|m| m.is_castling() && m.to() == Square::C1));
}

#[test]
fn chess960_castles_land_on_fixed_squares() {
    // King starts on b1/b8, rooks on the a- and h-files.
    let fen = "rk5r/pppppppp/8/8/8/8/PPPPPPPP/RK5R w HAha - 0 1";
    let mut board = Board::try_from_fen_variant(fen, Variant::Chess960).unwrap();
    let before = board.clone();

    let mv = castle_move(&mut board, Square::G1);
    board.make_move(mv);
    assert_eq!(board.piece_at(Square::G1), Some((Color::White, Piece::King)));
    assert_eq!(board.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(Square::new(0, 1)), None);
    assert_eq!(board.piece_at(Square::H1), None);
    assert_eq!(board.piece_at(Square::A1), Some((Color::White, Piece::Rook)));
    assert_consistent(&board);
    board.unmake_move();
    assert_eq!(board, before);

    let mv = castle_move(&mut board, Square::C1);
    board.make_move(mv);
    assert_eq!(board.piece_at(Square::C1), Some((Color::White, Piece::King)));
    assert_eq!(board.piece_at(Square::D1), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(Square::A1), None);
    assert_eq!(board.piece_at(Square::new(0, 1)), None);
    assert_consistent(&board);
    board.unmake_move();
    assert_eq!(board, before);
}

#[test]
fn chess960_rook_on_king_destination() {
    // The castling rook itself occupies g1; the swap must still work.
    let fen = "5k2/8/8/8/8/8/8/5KRR w G - 0 1";
    let mut board = Board::try_from_fen_variant(fen, Variant::Chess960).unwrap();
    let before = board.clone();

    let mv = castle_move(&mut board, Square::G1);
    board.make_move(mv);
    assert_eq!(board.piece_at(Square::G1), Some((Color::White, Piece::King)));
    assert_eq!(board.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
    assert_eq!(board.piece_at(Square::H1), Some((Color::White, Piece::Rook)));
    assert_consistent(&board);

    board.unmake_move();
    assert_eq!(board, before);
}

#[test]
fn chess960_fen_survives_castling() {
    let fen = "rk5r/pppppppp/8/8/8/8/PPPPPPPP/RK5R w HAha - 0 1";
    let mut board = Board::try_from_fen_variant(fen, Variant::Chess960).unwrap();
    let mv = castle_move(&mut board, Square::G1);
    board.make_move(mv);
    assert_eq!(
        board.to_fen(),
        "rk5r/pppppppp/8/8/8/8/PPPPPPPP/R4RK1 b ha - 1 1"
    );
}
