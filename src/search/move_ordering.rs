//! Move ordering for the alpha-beta search.
//!
//! Ordering only changes which nodes are visited first, never the minimax
//! value. Passes, in precedence order:
//! 1. shuffle near the root so repeated games differ,
//! 2. the killer move recorded for this ply,
//! 3. moves that give check (near the root),
//! 4. best immediate gain for the mover first,
//! 5. among the moves that win no material, moves rescuing an attacked piece
//!    first (near the root).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::search::board_scoring::MoveDelta;
use crate::search::search_config::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub mv: ChessMove,
    /// Immediate gain for the side making the move.
    pub delta: MoveDelta,
}

/// One killer slot per ply.
#[derive(Debug, Clone, Default)]
pub struct KillerTable {
    slots: Vec<Option<ChessMove>>,
}

impl KillerTable {
    pub fn new(max_ply: usize) -> Self {
        Self {
            slots: vec![None; max_ply],
        }
    }

    #[inline]
    pub fn get(&self, ply: u8) -> Option<ChessMove> {
        self.slots.get(usize::from(ply)).copied().flatten()
    }

    pub fn record(&mut self, ply: u8, mv: ChessMove) {
        if let Some(slot) = self.slots.get_mut(usize::from(ply)) {
            *slot = Some(mv);
        }
    }
}

pub fn order_moves<R: Rng + ?Sized>(
    game_state: &mut GameState,
    candidates: Vec<Candidate>,
    ply: u8,
    killer: Option<ChessMove>,
    config: &SearchConfig,
    rng: &mut R,
) -> ChessResult<Vec<Candidate>> {
    let mut rest = candidates;
    if config.randomize_root && ply < config.shuffle_plies {
        rest.shuffle(rng);
    }

    let mut ordered = Vec::with_capacity(rest.len());
    if let Some(pos) = killer.and_then(|k| rest.iter().position(|c| c.mv == k)) {
        ordered.push(rest.remove(pos));
    }

    let (mut checkers, mut quiet) = if ply < config.checkers_first_plies {
        split_checking_moves(game_state, rest)?
    } else {
        (Vec::new(), rest)
    };

    // Stable sorts keep the shuffled order among equal gains.
    checkers.sort_by_key(|c| std::cmp::Reverse(c.delta.total()));
    quiet.sort_by_key(|c| std::cmp::Reverse(c.delta.total()));

    if ply < config.danger_plies {
        promote_endangered_in_tail(game_state, &mut quiet);
    }

    ordered.extend(checkers);
    ordered.extend(quiet);
    Ok(ordered)
}

fn split_checking_moves(
    game_state: &mut GameState,
    candidates: Vec<Candidate>,
) -> ChessResult<(Vec<Candidate>, Vec<Candidate>)> {
    let mut checkers = Vec::new();
    let mut others = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let gives_check = {
            let guard = MoveGuard::apply(game_state, candidate.mv.from, candidate.mv.to, false)?;
            guard.is_in_check(guard.side_to_move)
        };
        if gives_check {
            checkers.push(candidate);
        } else {
            others.push(candidate);
        }
    }
    Ok((checkers, others))
}

/// `sorted` must already be in descending gain order. Any material gain
/// outweighs the castling nudges, so the no-material moves form its suffix,
/// whatever castling bonus or penalty they carry.
fn promote_endangered_in_tail(game_state: &GameState, sorted: &mut Vec<Candidate>) {
    let start = sorted
        .iter()
        .position(|c| c.delta.material == 0)
        .unwrap_or(sorted.len());

    let tail = sorted.split_off(start);
    let (endangered, safe): (Vec<_>, Vec<_>) = tail.into_iter().partition(|c| {
        game_state
            .board
            .color_at(c.mv.from)
            .is_some_and(|color| is_square_attacked(&game_state.board, c.mv.from, color.opposite()))
    });
    sorted.extend(endangered);
    sorted.extend(safe);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::all_legal_moves;
    use crate::search::board_scoring::move_delta;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("valid square name")
    }

    fn candidates(game: &mut GameState) -> Vec<Candidate> {
        let side = game.side_to_move;
        let checked = game.is_in_check(side);
        all_legal_moves(game, side, checked)
            .expect("generation succeeds")
            .into_iter()
            .map(|mv| Candidate {
                mv,
                delta: move_delta(game, mv.from, mv.to),
            })
            .collect()
    }

    fn fixed_config() -> SearchConfig {
        SearchConfig::default().deterministic()
    }

    #[test]
    fn ordering_is_a_permutation() {
        let mut game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN parses");
        let input = candidates(&mut game);
        let mut rng = StdRng::seed_from_u64(3);
        let ordered = order_moves(&mut game, input.clone(), 0, None, &SearchConfig::default(), &mut rng)
            .expect("ordering succeeds");

        let mut a: Vec<_> = input.iter().map(|c| (c.mv.from, c.mv.to)).collect();
        let mut b: Vec<_> = ordered.iter().map(|c| (c.mv.from, c.mv.to)).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn killer_comes_first_then_checks_then_captures() {
        // Rook can give check on e-file; knight can capture a pawn.
        let mut game = GameState::from_fen("4k3/8/8/3p4/8/4N3/8/R3K3 w - - 0 1").expect("FEN parses");
        let input = candidates(&mut game);
        let killer = ChessMove::new(sq("e1"), sq("f2"));
        let mut rng = StdRng::seed_from_u64(0);

        let ordered = order_moves(&mut game, input, 1, Some(killer), &fixed_config(), &mut rng)
            .expect("ordering succeeds");
        assert_eq!(ordered[0].mv, killer);

        let first_quiet = ordered[1..]
            .iter()
            .position(|c| {
                let mut probe = game.clone();
                let guard = MoveGuard::apply(&mut probe, c.mv.from, c.mv.to, false).expect("ok");
                !guard.is_in_check(guard.side_to_move)
            })
            .map(|i| i + 1)
            .expect("some quiet move exists");
        assert!(first_quiet > 1, "checking moves precede quiet ones");
        assert_eq!(
            ordered[first_quiet].mv,
            ChessMove::new(sq("e3"), sq("d5")),
            "capture leads the quiet group"
        );
    }

    #[test]
    fn endangered_piece_moves_lead_the_zero_gain_tail() {
        // The knight on d4 is attacked by the pawn on e5.
        let mut game = GameState::from_fen("4k3/8/8/4p3/3N4/8/P7/4K3 w - - 0 1").expect("FEN parses");
        let input = candidates(&mut game);
        let mut rng = StdRng::seed_from_u64(0);
        let config = SearchConfig {
            checkers_first_plies: 0,
            ..fixed_config()
        };
        let ordered = order_moves(&mut game, input, 0, None, &config, &mut rng).expect("ok");

        let tail_start = ordered
            .iter()
            .position(|c| c.delta.total() == 0)
            .expect("quiet moves exist");
        assert_eq!(ordered[tail_start].mv.from, sq("d4"));
        let last_knight = ordered.iter().rposition(|c| c.mv.from == sq("d4")).expect("knight moves");
        let first_other = ordered[tail_start..]
            .iter()
            .position(|c| c.mv.from != sq("d4"))
            .map(|i| i + tail_start)
            .expect("other quiet moves");
        assert!(last_knight < first_other);
    }

    #[test]
    fn endangered_piece_leads_even_while_castling_rights_remain() {
        // King and rook steps cost the queenside right, so the tail spans
        // several totals.
        let mut game = GameState::from_fen("4k3/8/8/P3p3/3N4/8/8/R3K3 w Q - 0 1").expect("FEN parses");
        let input = candidates(&mut game);
        assert!(input.iter().any(|c| c.delta.material == 0 && c.delta.total() < 0));
        let mut rng = StdRng::seed_from_u64(0);
        let config = SearchConfig {
            checkers_first_plies: 0,
            ..fixed_config()
        };
        let ordered = order_moves(&mut game, input, 0, None, &config, &mut rng).expect("ok");

        let tail_start = ordered
            .iter()
            .position(|c| c.delta.material == 0)
            .expect("quiet moves exist");
        let tail = &ordered[tail_start..];
        let knight_moves = tail.iter().take_while(|c| c.mv.from == sq("d4")).count();
        assert_eq!(knight_moves, 8);
        assert!(tail[knight_moves..].iter().all(|c| c.mv.from != sq("d4")));
        assert!(tail[knight_moves..].iter().any(|c| c.mv == ChessMove::new(sq("a5"), sq("a6"))));
    }

    #[test]
    fn killer_table_is_per_ply() {
        let mut killers = KillerTable::new(4);
        let mv = ChessMove::new(sq("e2"), sq("e4"));
        killers.record(2, mv);
        assert_eq!(killers.get(2), Some(mv));
        assert_eq!(killers.get(1), None);
        killers.record(10, mv);
        assert_eq!(killers.get(10), None);
    }
}
