use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::pseudo_moves::PseudoMoves;

/// Diagonal rays as `(d_row, d_col)`.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

#[inline]
pub fn bishop_moves(square: Square, board: &Board) -> PseudoMoves<'_> {
    PseudoMoves::sliding(board, square, &BISHOP_DIRECTIONS)
}
