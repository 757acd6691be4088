//! Core value types shared by every subsystem: colors, pieces, squares and
//! castling rights.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::MoveRecord;

use crate::chess_errors::{ChessError, ChessResult};

/// Side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row holding this color's king and rooks at the start of a game.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row step a pawn of this color takes when advancing.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row pawns of this color start on (and may double-step from).
    #[inline]
    pub const fn pawn_home_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which a pawn of this color promotes.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Rook => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

/// A colored piece. Empty cells are represented as `None` on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// Board coordinate. Row 0 is Black's back rank, row 7 is White's; column 0
/// is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Validated constructor; the only way external coordinates enter the crate.
    pub fn new(row: u8, col: u8) -> ChessResult<Self> {
        if row > 7 || col > 7 {
            return Err(ChessError::InvalidSquare { row, col });
        }
        Ok(Self { row, col })
    }

    /// Unchecked constructor for coordinates already known to be on the board.
    #[inline]
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Step by `(d_row, d_col)`, or `None` if that leaves the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Dense `0..64` index, row-major.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square::at(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.col),
            char::from(b'8' - self.row)
        )
    }
}

/// A move as a `(from, to)` pair. Promotion is always to a queen and castling
/// is a two-file king move, so nothing else is needed to describe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Castling eligibility for one color. `left` is the queenside (column 0)
/// rook, `right` the kingside (column 7) rook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideRights {
    pub left: bool,
    pub right: bool,
}

impl SideRights {
    pub const NONE: SideRights = SideRights {
        left: false,
        right: false,
    };
    pub const BOTH: SideRights = SideRights {
        left: true,
        right: true,
    };

    #[inline]
    pub const fn any(self) -> bool {
        self.left || self.right
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    sides: [SideRights; 2],
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

impl CastlingRights {
    pub const fn all() -> Self {
        Self {
            sides: [SideRights::BOTH, SideRights::BOTH],
        }
    }

    pub const fn none() -> Self {
        Self {
            sides: [SideRights::NONE, SideRights::NONE],
        }
    }

    #[inline]
    pub fn get(&self, color: Color) -> SideRights {
        self.sides[color.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, color: Color) -> &mut SideRights {
        &mut self.sides[color.index()]
    }

    /// Compact `0..16` encoding used for hashing.
    pub fn mask(&self) -> u8 {
        let mut out = 0u8;
        for (shift, side) in self.sides.iter().enumerate() {
            if side.left {
                out |= 1 << (shift * 2);
            }
            if side.right {
                out |= 1 << (shift * 2 + 1);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_rejects_out_of_range_coordinates() {
        assert!(matches!(
            Square::new(8, 0),
            Err(ChessError::InvalidSquare { row: 8, col: 0 })
        ));
        assert!(Square::new(3, 9).is_err());
        assert_eq!(Square::new(7, 4).expect("e1 is on the board").to_string(), "e1");
    }

    #[test]
    fn offset_stops_at_board_edges() {
        let a8 = Square::at(0, 0);
        assert_eq!(a8.offset(-1, 0), None);
        assert_eq!(a8.offset(0, -1), None);
        assert_eq!(a8.offset(1, 1), Some(Square::at(1, 1)));
        assert_eq!(Square::at(7, 7).offset(1, 0), None);
    }

    #[test]
    fn castling_mask_is_distinct_per_flag() {
        let mut rights = CastlingRights::all();
        assert_eq!(rights.mask(), 0b1111);
        rights.get_mut(Color::Black).right = false;
        assert_eq!(rights.mask(), 0b0111);
        assert_eq!(CastlingRights::none().mask(), 0);
    }
}
