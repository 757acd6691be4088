//! Material evaluation and the per-move score deltas the search accumulates.
//!
//! Scores are integers in tenths of a pawn so the castling nudges stay exact.
//! Kings carry no material value.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{LEFT_ROOK_COL, RIGHT_ROOK_COL};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub type Score = i32;

/// Value of being mated, reduced by the ply at which it happens so shorter
/// mates score higher.
pub const MATE: Score = 10_000;
/// Anything at or beyond this magnitude is treated as a forced result.
pub const DECIDED: Score = 9_000;
pub const DRAW: Score = 0;

/// Gain from a pawn becoming a queen.
pub const PROMOTION_BONUS: Score = piece_value(PieceKind::Queen) - piece_value(PieceKind::Pawn);
pub const CASTLE_BONUS: Score = 1;
pub const LOST_CASTLING_PENALTY: Score = 1;

#[inline]
pub const fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => 10,
        PieceKind::Knight => 30,
        PieceKind::Bishop => 30,
        PieceKind::Rook => 50,
        PieceKind::Queen => 90,
        PieceKind::King => 0,
    }
}

/// Sum of `color`'s piece values minus the opponent's.
pub fn material_score(color: Color, board: &Board) -> Score {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = piece_value(piece.kind);
            if piece.color == color {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// Score change a move produces for the side making it.
///
/// `material` is exact: it always matches the change in `material_score`.
/// `bonus` holds the castling nudges, which bias play but are not material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveDelta {
    pub material: Score,
    pub bonus: Score,
}

impl MoveDelta {
    #[inline]
    pub fn total(self) -> Score {
        self.material + self.bonus
    }
}

/// Delta for moving the piece on `from` to `to` in `game_state`, computed
/// without touching the board.
pub fn move_delta(game_state: &GameState, from: Square, to: Square) -> MoveDelta {
    let Some(piece) = game_state.board.piece_at(from) else {
        return MoveDelta::default();
    };

    let mut material = game_state
        .board
        .piece_at(to)
        .map_or(0, |captured| piece_value(captured.kind));
    if piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_rank() {
        material += PROMOTION_BONUS;
    }

    let rights = game_state.castling_rights.get(piece.color);
    let bonus = match piece.kind {
        PieceKind::King if from.col.abs_diff(to.col) == 2 => CASTLE_BONUS,
        PieceKind::King if rights.any() => -LOST_CASTLING_PENALTY,
        PieceKind::Rook if from.row == piece.color.back_rank() => {
            let last_option = match from.col {
                LEFT_ROOK_COL => rights.left && !rights.right,
                RIGHT_ROOK_COL => rights.right && !rights.left,
                _ => false,
            };
            if last_option {
                -LOST_CASTLING_PENALTY
            } else {
                0
            }
        }
        _ => 0,
    };

    MoveDelta { material, bonus }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("test FEN parses")
    }

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("valid square name")
    }

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(material_score(Color::White, &Board::standard()), 0);
        assert_eq!(material_score(Color::Black, &Board::standard()), 0);
    }

    #[test]
    fn material_is_antisymmetric() {
        let g = game("4k3/8/8/3q4/8/8/1R6/4K1N1 w - - 0 1");
        assert_eq!(material_score(Color::White, &g.board), 50 + 30 - 90);
        assert_eq!(material_score(Color::Black, &g.board), -(50 + 30 - 90));
    }

    #[test]
    fn capture_and_promotion_deltas() {
        let g = game("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(move_delta(&g, sq("a7"), sq("a8")).material, PROMOTION_BONUS);
        assert_eq!(
            move_delta(&g, sq("a7"), sq("b8")).material,
            PROMOTION_BONUS + piece_value(PieceKind::Knight)
        );
        assert_eq!(move_delta(&g, sq("e1"), sq("e2")).material, 0);
    }

    #[test]
    fn castling_nudges() {
        let g = game("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(move_delta(&g, sq("e1"), sq("g1")).bonus, CASTLE_BONUS);
        assert_eq!(move_delta(&g, sq("e1"), sq("f1")).bonus, -LOST_CASTLING_PENALTY);
        // The other side is still available, so a single rook move is free.
        assert_eq!(move_delta(&g, sq("h1"), sq("h4")).bonus, 0);

        let g = game("4k3/8/8/8/8/8/8/R3K2R w K - 0 1");
        assert_eq!(move_delta(&g, sq("h1"), sq("h4")).bonus, -LOST_CASTLING_PENALTY);
        assert_eq!(move_delta(&g, sq("a1"), sq("a4")).bonus, 0);

        let g = game("4k3/8/8/8/8/8/8/R3K2R w - - 0 1");
        assert_eq!(move_delta(&g, sq("e1"), sq("f1")).bonus, 0);
    }
}
