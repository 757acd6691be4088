use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::pseudo_moves::PseudoMoves;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

#[inline]
pub fn knight_moves(square: Square, board: &Board) -> PseudoMoves<'_> {
    PseudoMoves::leaping(board, square, &KNIGHT_OFFSETS)
}
