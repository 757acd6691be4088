//! Legal move generation.
//!
//! Filters pseudo-legal destinations through the check oracle and adds
//! castling. Two filtering paths exist: when the mover is in check or is the
//! king every candidate is applied, tested with the full scan and undone;
//! otherwise the discovered-check shortcut decides without touching the board.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::{
    KING_HOME_COL, LEFT_CASTLE_EMPTY_COLS, LEFT_ROOK_COL, RIGHT_CASTLE_EMPTY_COLS, RIGHT_ROOK_COL,
};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{
    apply_move_in_place, undo_move_in_place, MoveGuard,
};
use crate::move_generation::legal_move_checks::discovered_check_after_move;
use crate::moves::pseudo_moves::pseudo_moves;

/// Legal destinations for the piece on `square`.
///
/// `known_in_check` lets callers that already know whether the mover's king is
/// attacked skip the scan. The position is restored before returning.
pub fn legal_destinations(
    game_state: &mut GameState,
    square: Square,
    known_in_check: Option<bool>,
) -> ChessResult<Vec<Square>> {
    let Some(piece) = game_state.board.piece_at(square) else {
        return Ok(Vec::new());
    };
    let color = piece.color;
    let checked = known_in_check.unwrap_or_else(|| game_state.is_in_check(color));
    let king_pos = game_state.king_square(color);
    let use_full_scan = checked || piece.kind == PieceKind::King;

    let candidates: Vec<Square> = pseudo_moves(square, &game_state.board).collect();
    let mut legal = Vec::with_capacity(candidates.len() + 2);

    for to in candidates {
        let safe = if use_full_scan {
            let record = apply_move_in_place(game_state, square, to, false)?;
            let exposed = game_state.is_in_check(color);
            undo_move_in_place(game_state, &record);
            !exposed
        } else {
            !discovered_check_after_move(color, &game_state.board, square, to, king_pos)
        };
        if safe {
            legal.push(to);
        }
    }

    if piece.kind == PieceKind::King && !checked {
        append_castling(game_state, square, color, &mut legal)?;
    }

    Ok(legal)
}

fn append_castling(
    game_state: &mut GameState,
    king_from: Square,
    color: Color,
    out: &mut Vec<Square>,
) -> ChessResult<()> {
    let row = color.back_rank();
    if king_from != Square::at(row, KING_HOME_COL) {
        return Ok(());
    }
    let rights = game_state.castling_rights.get(color);

    if rights.left
        && castle_lane_is_clear(game_state, color, LEFT_ROOK_COL, &LEFT_CASTLE_EMPTY_COLS)
        && castle_path_is_safe(game_state, color, king_from, -1)?
    {
        out.push(Square::at(row, KING_HOME_COL - 2));
    }
    if rights.right
        && castle_lane_is_clear(game_state, color, RIGHT_ROOK_COL, &RIGHT_CASTLE_EMPTY_COLS)
        && castle_path_is_safe(game_state, color, king_from, 1)?
    {
        out.push(Square::at(row, KING_HOME_COL + 2));
    }
    Ok(())
}

fn castle_lane_is_clear(
    game_state: &GameState,
    color: Color,
    rook_col: u8,
    empty_cols: &[u8],
) -> bool {
    let row = color.back_rank();
    game_state.board.piece_at(Square::at(row, rook_col))
        == Some(Piece::new(color, PieceKind::Rook))
        && empty_cols
            .iter()
            .all(|&col| game_state.board.is_empty(Square::at(row, col)))
}

/// King steps one file then a second, checking safety after each. The start
/// square was already checked by the caller.
fn castle_path_is_safe(
    game_state: &mut GameState,
    color: Color,
    king_from: Square,
    d_col: i8,
) -> ChessResult<bool> {
    let (Some(transit), Some(landing)) =
        (king_from.offset(0, d_col), king_from.offset(0, 2 * d_col))
    else {
        return Ok(false);
    };

    let mut first = MoveGuard::apply(game_state, king_from, transit, false)?;
    if first.is_in_check(color) {
        return Ok(false);
    }
    let second = MoveGuard::apply(&mut first, transit, landing, false)?;
    Ok(!second.is_in_check(color))
}

/// Every legal `(from, to)` for `color`, grouped by origin square in
/// row-major order.
pub fn all_legal_moves(
    game_state: &mut GameState,
    color: Color,
    known_in_check: bool,
) -> ChessResult<Vec<ChessMove>> {
    let origins: Vec<Square> = game_state.board.pieces_of(color).map(|(sq, _)| sq).collect();
    let mut moves = Vec::with_capacity(48);
    for from in origins {
        for to in legal_destinations(game_state, from, Some(known_in_check))? {
            moves.push(ChessMove::new(from, to));
        }
    }
    Ok(moves)
}

/// Whether `color` has at least one legal move. Stops at the first one.
pub fn has_any_legal_move(game_state: &mut GameState, color: Color, known_in_check: bool) -> bool {
    let origins: Vec<Square> = game_state.board.pieces_of(color).map(|(sq, _)| sq).collect();
    origins.into_iter().any(|from| {
        matches!(
            legal_destinations(game_state, from, Some(known_in_check)),
            Ok(destinations) if !destinations.is_empty()
        )
    })
}
