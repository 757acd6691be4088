//! King step geometry.
//!
//! Only the eight adjacent squares. Castling depends on rights and on safety
//! along the king's path, so the legality filter adds it separately.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::pseudo_moves::PseudoMoves;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[inline]
pub fn king_moves(square: Square, board: &Board) -> PseudoMoves<'_> {
    PseudoMoves::leaping(board, square, &KING_OFFSETS)
}
