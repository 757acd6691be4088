//! Fixed 8x8 mailbox board.

use std::ops::Index;

use crate::game_state::chess_rules::BACK_RANK_LAYOUT;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// Standard opening layout.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK_LAYOUT.iter().enumerate() {
            for color in [Color::White, Color::Black] {
                board.cells[color.back_rank() as usize][col] = Some(Piece::new(color, *kind));
                board.cells[color.pawn_home_rank() as usize][col] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row as usize][square.col as usize] = piece;
    }

    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }

    /// Every occupied square, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Scan for a king. Used to seed the king cache, not in hot paths.
    pub fn find_kings(&self, color: Color) -> Vec<Square> {
        self.pieces_of(color)
            .filter(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
            .collect()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[square.row as usize][square.col as usize]
    }
}
