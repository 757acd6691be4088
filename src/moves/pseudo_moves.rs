//! Lazy pseudo-legal destination enumeration.
//!
//! `PseudoMoves` walks the geometry of one piece against a board snapshot and
//! yields destination squares on demand. It never mutates the board and knows
//! nothing about check. The iterator is `Clone`, so a sequence can be replayed
//! by cloning it before consuming or by calling `pseudo_moves` again.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::king_moves;
use crate::moves::knight_moves::knight_moves;
use crate::moves::pawn_moves::pawn_moves;
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;

#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Walk each ray until the edge or the first occupied square.
    Slide(&'static [(i8, i8)]),
    /// Single hop per offset.
    Leap(&'static [(i8, i8)]),
    Pawn,
    Nothing,
}

#[derive(Debug, Clone)]
pub struct PseudoMoves<'a> {
    board: &'a Board,
    origin: Square,
    color: Color,
    pattern: Pattern,
    step: usize,
    cursor: Square,
}

impl<'a> PseudoMoves<'a> {
    fn new(board: &'a Board, origin: Square, color: Color, pattern: Pattern) -> Self {
        Self {
            board,
            origin,
            color,
            pattern,
            step: 0,
            cursor: origin,
        }
    }

    pub(crate) fn sliding(board: &'a Board, origin: Square, rays: &'static [(i8, i8)]) -> Self {
        match board.color_at(origin) {
            Some(color) => Self::new(board, origin, color, Pattern::Slide(rays)),
            None => Self::new(board, origin, Color::White, Pattern::Nothing),
        }
    }

    pub(crate) fn leaping(board: &'a Board, origin: Square, offsets: &'static [(i8, i8)]) -> Self {
        match board.color_at(origin) {
            Some(color) => Self::new(board, origin, color, Pattern::Leap(offsets)),
            None => Self::new(board, origin, Color::White, Pattern::Nothing),
        }
    }

    pub(crate) fn pawn(board: &'a Board, origin: Square) -> Self {
        match board.color_at(origin) {
            Some(color) => Self::new(board, origin, color, Pattern::Pawn),
            None => Self::new(board, origin, Color::White, Pattern::Nothing),
        }
    }

    fn next_slide(&mut self, rays: &'static [(i8, i8)]) -> Option<Square> {
        while let Some(&(d_row, d_col)) = rays.get(self.step) {
            match self.cursor.offset(d_row, d_col) {
                None => {
                    self.step += 1;
                    self.cursor = self.origin;
                }
                Some(target) => match self.board.color_at(target) {
                    None => {
                        self.cursor = target;
                        return Some(target);
                    }
                    Some(occupant) => {
                        self.step += 1;
                        self.cursor = self.origin;
                        if occupant != self.color {
                            return Some(target);
                        }
                    }
                },
            }
        }
        None
    }

    fn next_leap(&mut self, offsets: &'static [(i8, i8)]) -> Option<Square> {
        while let Some(&(d_row, d_col)) = offsets.get(self.step) {
            self.step += 1;
            if let Some(target) = self.origin.offset(d_row, d_col) {
                if self.board.color_at(target) != Some(self.color) {
                    return Some(target);
                }
            }
        }
        None
    }

    // Stages: 0 single push, 1 double push, 2 capture toward column 0,
    // 3 capture toward column 7.
    fn next_pawn(&mut self) -> Option<Square> {
        let forward = self.color.pawn_direction();
        loop {
            let stage = self.step;
            self.step += 1;
            match stage {
                0 => match self.origin.offset(forward, 0) {
                    Some(target) if self.board.is_empty(target) => return Some(target),
                    _ => self.step = 2,
                },
                1 => {
                    if self.origin.row == self.color.pawn_home_rank() {
                        if let Some(target) = self.origin.offset(2 * forward, 0) {
                            if self.board.is_empty(target) {
                                return Some(target);
                            }
                        }
                    }
                }
                2 | 3 => {
                    let d_col = if stage == 2 { -1 } else { 1 };
                    if let Some(target) = self.origin.offset(forward, d_col) {
                        if self.board.color_at(target) == Some(self.color.opposite()) {
                            return Some(target);
                        }
                    }
                }
                _ => return None,
            }
        }
    }
}

impl Iterator for PseudoMoves<'_> {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        match self.pattern {
            Pattern::Slide(rays) => self.next_slide(rays),
            Pattern::Leap(offsets) => self.next_leap(offsets),
            Pattern::Pawn => self.next_pawn(),
            Pattern::Nothing => None,
        }
    }
}

/// Pseudo-legal destinations of whatever piece stands on `square`.
pub fn pseudo_moves(square: Square, board: &Board) -> PseudoMoves<'_> {
    match board.piece_at(square).map(|p| p.kind) {
        Some(PieceKind::Pawn) => pawn_moves(square, board),
        Some(PieceKind::Rook) => rook_moves(square, board),
        Some(PieceKind::Knight) => knight_moves(square, board),
        Some(PieceKind::Bishop) => bishop_moves(square, board),
        Some(PieceKind::Queen) => queen_moves(square, board),
        Some(PieceKind::King) => king_moves(square, board),
        None => PseudoMoves::new(board, square, Color::White, Pattern::Nothing),
    }
}
