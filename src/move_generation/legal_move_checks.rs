//! King-safety oracle.
//!
//! `in_check` is the full scan: rays outward from the king plus the knight
//! offsets. `discovered_check_after_move` is the cheap variant used when the
//! mover is not the king and the king is not already in check; it only looks
//! along the single line joining the king and the departure square.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::knight_moves::KNIGHT_OFFSETS;
use crate::moves::rook_moves::ROOK_DIRECTIONS;

#[inline]
fn slides_orthogonally(kind: PieceKind) -> bool {
    matches!(kind, PieceKind::Rook | PieceKind::Queen)
}

#[inline]
fn slides_diagonally(kind: PieceKind) -> bool {
    matches!(kind, PieceKind::Bishop | PieceKind::Queen)
}

/// Whether `color`'s king on `king_pos` is attacked.
#[inline]
pub fn in_check(color: Color, board: &Board, king_pos: Square) -> bool {
    is_square_attacked(board, king_pos, color.opposite())
}

/// Whether any piece of `attacker` could capture on `square`. Returns on the
/// first threat found.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    for (d_row, d_col) in ROOK_DIRECTIONS {
        if let Some((distance, piece)) = first_piece_on_ray(board, square, d_row, d_col) {
            if piece.color == attacker
                && (slides_orthogonally(piece.kind)
                    || (distance == 1 && piece.kind == PieceKind::King))
            {
                return true;
            }
        }
    }

    // A pawn attacks the square one row behind its own direction of travel.
    let pawn_row_step = -attacker.pawn_direction();
    for (d_row, d_col) in BISHOP_DIRECTIONS {
        if let Some((distance, piece)) = first_piece_on_ray(board, square, d_row, d_col) {
            if piece.color != attacker {
                continue;
            }
            if slides_diagonally(piece.kind) {
                return true;
            }
            if distance == 1
                && (piece.kind == PieceKind::King
                    || (piece.kind == PieceKind::Pawn && d_row == pawn_row_step))
            {
                return true;
            }
        }
    }

    KNIGHT_OFFSETS.iter().any(|&(d_row, d_col)| {
        square.offset(d_row, d_col).and_then(|sq| board.piece_at(sq))
            == Some(Piece::new(attacker, PieceKind::Knight))
    })
}

fn first_piece_on_ray(board: &Board, from: Square, d_row: i8, d_col: i8) -> Option<(u8, Piece)> {
    let mut cursor = from;
    let mut distance = 0u8;
    loop {
        cursor = cursor.offset(d_row, d_col)?;
        distance += 1;
        if let Some(piece) = board.piece_at(cursor) {
            return Some((distance, piece));
        }
    }
}

/// Whether moving a non-king piece from `departure` to `arrival` exposes
/// `color`'s king to an enemy slider.
///
/// Only valid when the king is not currently in check and the moved piece is
/// not the king. The board is read as if `departure` were empty and `arrival`
/// held the moved piece; nothing is mutated.
pub fn discovered_check_after_move(
    color: Color,
    board: &Board,
    departure: Square,
    arrival: Square,
    king_pos: Square,
) -> bool {
    let d_row = departure.row as i8 - king_pos.row as i8;
    let d_col = departure.col as i8 - king_pos.col as i8;
    let aligned = (d_row == 0) != (d_col == 0) || (d_row != 0 && d_row.abs() == d_col.abs());
    if !aligned {
        return false;
    }

    let orthogonal = d_row == 0 || d_col == 0;
    let (step_row, step_col) = (d_row.signum(), d_col.signum());
    let mut cursor = king_pos;
    while let Some(next) = cursor.offset(step_row, step_col) {
        cursor = next;
        if cursor == departure {
            continue;
        }
        // The moved piece still shields the king anywhere up to and including
        // the attacker's square.
        if cursor == arrival {
            return false;
        }
        if let Some(piece) = board.piece_at(cursor) {
            let slides = if orthogonal {
                slides_orthogonally(piece.kind)
            } else {
                slides_diagonally(piece.kind)
            };
            return piece.color != color && slides;
        }
    }
    false
}
