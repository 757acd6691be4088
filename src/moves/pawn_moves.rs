//! Pawn geometry: single and double pushes onto empty squares, diagonal
//! captures onto enemy pieces. No en-passant.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::pseudo_moves::PseudoMoves;

#[inline]
pub fn pawn_moves(square: Square, board: &Board) -> PseudoMoves<'_> {
    PseudoMoves::pawn(board, square)
}
