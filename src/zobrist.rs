//! Zobrist hashing keys for chess positions.
//!
//! Provides the random key tables behind the board's incrementally-updated
//! 64-bit position hash and pawn-only hash.

use rand::prelude::*;

pub(crate) struct ZobristKeys {
    // piece_keys[color][piece_kind][square]; kind 0 (empty) is never used
    pub(crate) piece_keys: [[[u64; 64]; 7]; 2],
    pub(crate) black_to_move_key: u64,
    // castling_keys[i] matches castling-mask bit i: W_OO, W_OOO, B_OO, B_OOO
    pub(crate) castling_keys: [u64; 4],
    // en_passant_keys[file]; only the file of the target square is hashed
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0x00C0_FFEE_u64); // fixed seed so hashes are stable across runs
        let mut piece_keys = [[[0; 64]; 7]; 2];
        let mut castling_keys = [0; 4];
        let mut en_passant_keys = [0; 8];

        for color in &mut piece_keys {
            for kind in color.iter_mut() {
                for key in kind.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

// Initialize Zobrist keys lazily and globally
pub(crate) static ZOBRIST: std::sync::LazyLock<ZobristKeys> =
    std::sync::LazyLock::new(ZobristKeys::new);
