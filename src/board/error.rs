//! Error types for chess board operations.

use std::fmt;

/// Error type for FEN parsing failures.
///
/// Every variant carries the byte offset of the offending character or field
/// within the input string. Parsing is atomic: a failed parse leaves the
/// board untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Wrong number of whitespace-separated fields (needs 4 to 6)
    FieldCount { found: usize, offset: usize },
    /// Placement field does not describe exactly 8 ranks
    RankCount { slashes: usize, offset: usize },
    /// Unknown character in the placement field
    InvalidPiece { ch: char, offset: usize },
    /// A rank describes more than eight files
    TooManyFiles { rank: usize, offset: usize },
    /// Placement field is missing a white or black king
    MissingKing { offset: usize },
    /// Active color field must be 'w' or 'b'
    InvalidSideToMove { found: String, offset: usize },
    /// Invalid character in the castling field
    InvalidCastling { ch: char, offset: usize },
    /// En passant field is neither '-' nor a 3rd/6th-rank square name
    InvalidEnPassant { found: String, offset: usize },
}

impl FenError {
    /// Byte offset of the problem within the FEN input.
    #[must_use]
    pub fn offset(&self) -> usize {
        match *self {
            FenError::FieldCount { offset, .. }
            | FenError::RankCount { offset, .. }
            | FenError::InvalidPiece { offset, .. }
            | FenError::TooManyFiles { offset, .. }
            | FenError::MissingKing { offset }
            | FenError::InvalidSideToMove { offset, .. }
            | FenError::InvalidCastling { offset, .. }
            | FenError::InvalidEnPassant { offset, .. } => offset,
        }
    }
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::FieldCount { found, offset } => {
                write!(f, "FEN needs 4 to 6 fields, found {found} (offset {offset})")
            }
            FenError::RankCount { slashes, offset } => {
                write!(
                    f,
                    "placement field needs 7 slashes, found {slashes} (offset {offset})"
                )
            }
            FenError::InvalidPiece { ch, offset } => {
                write!(f, "invalid piece character '{ch}' (offset {offset})")
            }
            FenError::TooManyFiles { rank, offset } => {
                write!(f, "too many files in rank {rank} (offset {offset})")
            }
            FenError::MissingKing { offset } => {
                write!(
                    f,
                    "placement field needs both a 'K' and a 'k' (offset {offset})"
                )
            }
            FenError::InvalidSideToMove { found, offset } => {
                write!(
                    f,
                    "active color must be 'w' or 'b', found '{found}' (offset {offset})"
                )
            }
            FenError::InvalidCastling { ch, offset } => {
                write!(f, "invalid castling character '{ch}' (offset {offset})")
            }
            FenError::InvalidEnPassant { found, offset } => {
                write!(f, "invalid en passant square '{found}' (offset {offset})")
            }
        }
    }
}

impl std::error::Error for FenError {}
