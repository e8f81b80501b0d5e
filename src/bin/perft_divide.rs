//! Perft-divide tool: per-root-move node counts for a position.
//!
//! Usage: perft_divide [depth] [fen]

use std::env;
use std::process;
use std::time::Instant;

use tabia::board::{Board, STARTING_FEN};

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
    let fen = args.get(2).map_or(STARTING_FEN, String::as_str);

    let mut board = match Board::try_from_fen(fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("bad FEN: {err}");
            process::exit(1);
        }
    };

    println!("{board}");
    println!("Perft divide, depth {depth}");

    let start = Instant::now();
    let mut total = 0u64;
    let mut root_moves: Vec<_> = board.legal_moves().iter().copied().collect();
    root_moves.sort_by_key(|m| (m.from().index(), m.to().index()));

    for mv in root_moves {
        board.make_move(mv);
        let nodes = board.perft(depth.saturating_sub(1));
        board.unmake_move();
        println!("  {mv}: {nodes}");
        total += nodes;
    }

    println!("Total: {total} in {:?}", start.elapsed());
}
