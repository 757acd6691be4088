use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::pseudo_moves::PseudoMoves;

/// Orthogonal rays as `(d_row, d_col)`.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[inline]
pub fn rook_moves(square: Square, board: &Board) -> PseudoMoves<'_> {
    PseudoMoves::sliding(board, square, &ROOK_DIRECTIONS)
}

#[cfg(test)]
mod tests {
    use super::rook_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn rook_on_open_board_sees_fourteen_squares() {
        let mut board = Board::empty();
        let d4 = Square::at(4, 3);
        board.set(d4, Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(rook_moves(d4, &board).count(), 14);
    }

    #[test]
    fn rook_stops_on_enemy_and_before_friend() {
        let mut board = Board::empty();
        let a1 = Square::at(7, 0);
        board.set(a1, Some(Piece::new(Color::White, PieceKind::Rook)));
        board.set(Square::at(4, 0), Some(Piece::new(Color::Black, PieceKind::Knight)));
        board.set(Square::at(7, 2), Some(Piece::new(Color::White, PieceKind::Bishop)));

        let targets: Vec<Square> = rook_moves(a1, &board).collect();
        assert!(targets.contains(&Square::at(4, 0)));
        assert!(!targets.contains(&Square::at(3, 0)));
        assert!(targets.contains(&Square::at(7, 1)));
        assert!(!targets.contains(&Square::at(7, 2)));
        assert_eq!(targets.len(), 4);
    }
}
