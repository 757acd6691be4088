//! Perft: exhaustive legal-move tree counts used to validate generation.
//!
//! Counts are taken at the leaves. Runs on one mutable position with
//! apply/undo, so the position must come back unchanged.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_generator::all_legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

pub fn perft(game_state: &mut GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    perft_recurse(game_state, depth, &mut total)?;
    Ok(total)
}

/// Per-root-move node counts, sorted by move text.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> ChessResult<Vec<(ChessMove, usize)>> {
    let side = game_state.side_to_move;
    let checked = game_state.is_in_check(side);
    let mut out = Vec::new();
    for mv in all_legal_moves(game_state, side, checked)? {
        let mut guard = MoveGuard::apply(game_state, mv.from, mv.to, true)?;
        let below = perft(&mut guard, depth.saturating_sub(1))?;
        out.push((mv, below.nodes));
    }
    out.sort_by_key(|(mv, _)| mv.to_string());
    Ok(out)
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    let side = game_state.side_to_move;
    let checked = game_state.is_in_check(side);
    let moves = all_legal_moves(game_state, side, checked)?;

    if depth == 1 {
        let mut leaves = PerftCounts::default();
        for mv in moves {
            let guard = MoveGuard::apply(game_state, mv.from, mv.to, true)?;
            let record = guard.record();
            leaves.nodes += 1;
            if record.is_capture() {
                leaves.captures += 1;
            }
            if record.is_castle() {
                leaves.castles += 1;
            }
            if record.piece_before_move.kind == PieceKind::Pawn
                && mv.to.row == side.promotion_rank()
            {
                leaves.promotions += 1;
            }
            if guard.is_in_check(side.opposite()) {
                leaves.checks += 1;
            }
        }
        counts.merge(leaves);
        return Ok(());
    }

    for mv in moves {
        let mut guard = MoveGuard::apply(game_state, mv.from, mv.to, true)?;
        perft_recurse(&mut guard, depth - 1, counts)?;
    }
    Ok(())
}
