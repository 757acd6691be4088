//! Conversions between algebraic coordinates (`e4`) and board squares.
//!
//! Files `a`-`h` map to columns 0-7. Rank 8 is row 0 and rank 1 is row 7, so
//! White's back rank is the bottom row of the mailbox.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraic(square.to_owned()));
    }

    Square::new(b'8' - rank, file - b'a')
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}
