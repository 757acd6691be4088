//! Canonical chess-rule constants.
//!
//! Static rule literals: the standard start position, the castling geometry
//! on the back rank, and the standard piece inventory per side.

use crate::game_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank layout from column 0 to column 7.
pub const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KING_HOME_COL: u8 = 4;
pub const LEFT_ROOK_COL: u8 = 0;
pub const RIGHT_ROOK_COL: u8 = 7;

/// Columns that must be empty for queenside (left) castling.
pub const LEFT_CASTLE_EMPTY_COLS: [u8; 3] = [1, 2, 3];
/// Columns that must be empty for kingside (right) castling.
pub const RIGHT_CASTLE_EMPTY_COLS: [u8; 2] = [5, 6];

/// King landing column and `(rook_from, rook_to)` columns for a castle that
/// lands the king on `king_to_col`.
#[inline]
pub const fn castle_rook_columns(king_to_col: u8) -> Option<(u8, u8)> {
    match king_to_col {
        2 => Some((LEFT_ROOK_COL, 3)),
        6 => Some((RIGHT_ROOK_COL, 5)),
        _ => None,
    }
}

/// Number of each piece kind a side starts with.
pub const fn standard_count(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::Pawn => 8,
        PieceKind::Rook | PieceKind::Knight | PieceKind::Bishop => 2,
        PieceKind::Queen | PieceKind::King => 1,
    }
}
