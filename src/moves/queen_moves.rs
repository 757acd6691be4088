use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::pseudo_moves::PseudoMoves;

/// Orthogonal rays followed by diagonal rays.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
];

#[inline]
pub fn queen_moves(square: Square, board: &Board) -> PseudoMoves<'_> {
    PseudoMoves::sliding(board, square, &QUEEN_DIRECTIONS)
}
