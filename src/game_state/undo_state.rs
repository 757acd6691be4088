use crate::game_state::chess_types::*;

/// Single undo record produced by `apply_move_in_place` and consumed by
/// `undo_move_in_place`.
///
/// The executor is deterministic given `from`/`to` and the two prior
/// occupants, so the castling rook relocation, the promotion and the king
/// cache are all reconstructed from these fields alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub piece_before_move: Piece,
    pub to: Square,
    pub piece_previously_at_to: Option<Piece>,
    pub prev_castling_rights: CastlingRights,
}

impl MoveRecord {
    /// True when this record describes a king moving two files.
    #[inline]
    pub fn is_castle(&self) -> bool {
        self.piece_before_move.kind == PieceKind::King && self.from.col.abs_diff(self.to.col) == 2
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.piece_previously_at_to.is_some()
    }
}
