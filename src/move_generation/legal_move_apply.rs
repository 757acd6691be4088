//! Reversible move executor.
//!
//! `apply_move_in_place` mutates a `GameState` and returns the `MoveRecord`
//! that `undo_move_in_place` needs to restore it exactly. Promotion (always to
//! a queen), the castling rook hop and the king cache are handled atomically.
//! `MoveGuard` ties an apply to a scope so the undo runs on every exit path.

use std::ops::{Deref, DerefMut};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castle_rook_columns, LEFT_ROOK_COL, RIGHT_ROOK_COL};
use crate::game_state::chess_types::*;

/// Move the piece on `from` to `to` and flip the side to move.
///
/// When `update_rights` is false the castling rights are left alone, which is
/// what speculative legality probes want.
pub fn apply_move_in_place(
    game_state: &mut GameState,
    from: Square,
    to: Square,
    update_rights: bool,
) -> ChessResult<MoveRecord> {
    let piece = game_state
        .board
        .piece_at(from)
        .ok_or(ChessError::NoPieceAtSquare(from))?;

    let record = MoveRecord {
        from,
        piece_before_move: piece,
        to,
        piece_previously_at_to: game_state.board.piece_at(to),
        prev_castling_rights: game_state.castling_rights,
    };

    game_state.board.set(from, None);
    let placed = if piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_rank() {
        Piece::new(piece.color, PieceKind::Queen)
    } else {
        piece
    };
    game_state.board.set(to, Some(placed));

    if record.is_castle() {
        if let Some((rook_from, rook_to)) = castle_rook_columns(to.col) {
            let rook = game_state.board.take(Square::at(from.row, rook_from));
            game_state.board.set(Square::at(from.row, rook_to), rook);
        }
    }

    if piece.kind == PieceKind::King {
        game_state.king_position[piece.color.index()] = to;
    }

    if update_rights {
        update_castling_rights(&mut game_state.castling_rights, piece, from, to);
    }

    game_state.side_to_move = game_state.side_to_move.opposite();
    Ok(record)
}

/// Exact inverse of `apply_move_in_place` for the same record.
pub fn undo_move_in_place(game_state: &mut GameState, record: &MoveRecord) {
    let piece = record.piece_before_move;
    game_state.board.set(record.from, Some(piece));
    game_state.board.set(record.to, record.piece_previously_at_to);

    if record.is_castle() {
        if let Some((rook_from, rook_to)) = castle_rook_columns(record.to.col) {
            let rook = game_state.board.take(Square::at(record.from.row, rook_to));
            game_state.board.set(Square::at(record.from.row, rook_from), rook);
        }
    }

    if piece.kind == PieceKind::King {
        game_state.king_position[piece.color.index()] = record.from;
    }

    game_state.castling_rights = record.prev_castling_rights;
    game_state.side_to_move = game_state.side_to_move.opposite();
}

fn update_castling_rights(rights: &mut CastlingRights, piece: Piece, from: Square, to: Square) {
    let color = piece.color;
    if piece.kind == PieceKind::King {
        *rights.get_mut(color) = SideRights::NONE;
    }

    // Anything leaving its own rook corner means that rook is gone or moving.
    if from.row == color.back_rank() {
        clear_corner(rights, color, from.col);
    }

    // Landing on the enemy's rook corner captures whatever stood there.
    let enemy = color.opposite();
    if to.row == enemy.back_rank() {
        clear_corner(rights, enemy, to.col);
    }
}

fn clear_corner(rights: &mut CastlingRights, color: Color, col: u8) {
    match col {
        LEFT_ROOK_COL => rights.get_mut(color).left = false,
        RIGHT_ROOK_COL => rights.get_mut(color).right = false,
        _ => {}
    }
}

/// Scoped apply: the move is undone when the guard drops, whether the scope
/// ends normally, through `?`, or by unwinding.
pub struct MoveGuard<'a> {
    game_state: &'a mut GameState,
    record: MoveRecord,
}

impl<'a> MoveGuard<'a> {
    pub fn apply(
        game_state: &'a mut GameState,
        from: Square,
        to: Square,
        update_rights: bool,
    ) -> ChessResult<Self> {
        let record = apply_move_in_place(game_state, from, to, update_rights)?;
        Ok(Self { game_state, record })
    }

    #[inline]
    pub fn record(&self) -> &MoveRecord {
        &self.record
    }
}

impl Deref for MoveGuard<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        &*self.game_state
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        &mut *self.game_state
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        undo_move_in_place(self.game_state, &self.record);
    }
}
