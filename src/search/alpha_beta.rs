//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Values are always from the hero's point of view (the side to move when the
//! search starts). Nodes where the hero moves maximize, the others minimize;
//! `sign` is +1 or -1 accordingly so both cases share one loop. The running
//! score starts at the root's material balance and accumulates each move's
//! delta; depth 0 returns it unchanged.
//!
//! The position is mutated in place and every apply is paired with an undo
//! through `MoveGuard`, so the caller gets its position back exactly even when
//! an error propagates out of the recursion.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, trace, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameStatus;
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::search::board_scoring::{material_score, move_delta, Score, DECIDED, DRAW, MATE};
use crate::search::move_ordering::{order_moves, Candidate, KillerTable};
use crate::search::search_config::SearchConfig;
use crate::search::transposition_table::{Bound, TTEntry, TranspositionTable};
use crate::search::zobrist::{compute_zobrist_key, salt_key};

const INFINITY: Score = MATE + 1;

/// One explored move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub from: Square,
    pub to: Square,
    /// Running evaluation right after this move, hero's point of view.
    pub score: Score,
    /// Minimax value backed up from below this move. May be a bound when a
    /// sibling cutoff or the deadline stopped the subtree early.
    pub value: Score,
    /// Replies explored beneath this move, empty past the retained depth.
    pub children: Vec<ScoredMove>,
}

impl ScoredMove {
    #[inline]
    pub fn chess_move(&self) -> ChessMove {
        ChessMove::new(self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Root moves in the order they were visited.
    pub tree: Vec<ScoredMove>,
    pub best_index: Option<usize>,
    pub best_score: Score,
    pub nodes: u64,
    pub memo_hits: u64,
    /// The time limit ran out before the search finished.
    pub aborted: bool,
}

impl SearchOutcome {
    pub fn best_move(&self) -> Option<ChessMove> {
        self.best_index
            .and_then(|i| self.tree.get(i))
            .map(ScoredMove::chess_move)
    }
}

/// Search `game_state` on behalf of `hero`.
///
/// Fails with `GameAlreadyOver` when the side to move has no legal move.
pub fn search(
    hero: Color,
    game_state: &mut GameState,
    config: &SearchConfig,
) -> ChessResult<SearchOutcome> {
    let status = game_state.game_status();
    if status != GameStatus::Ongoing {
        return Err(ChessError::GameAlreadyOver(status));
    }

    let started_at = Instant::now();
    let mut searcher = Searcher::new(hero, config, started_at);
    let side = game_state.side_to_move;
    let root = Frame {
        depth: config.depth.max(1),
        ply: 0,
        running: material_score(hero, &game_state.board),
        bonus: 0,
        alpha: -INFINITY,
        beta: INFINITY,
        checked: game_state.is_in_check(side),
    };
    let result = searcher.node(game_state, root)?;

    let outcome = SearchOutcome {
        tree: result.children,
        best_index: result.best_index,
        best_score: result.value,
        nodes: searcher.nodes,
        memo_hits: searcher.memo_hits,
        aborted: searcher.aborted,
    };

    if outcome.aborted {
        warn!(
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            nodes = outcome.nodes,
            "search deadline reached, returning best move so far"
        );
    }
    info!(
        hero = %hero,
        depth = config.depth,
        best = ?outcome.best_move().map(|mv| mv.to_string()),
        score = outcome.best_score,
        nodes = outcome.nodes,
        memo_hits = outcome.memo_hits,
        elapsed_ms = started_at.elapsed().as_millis() as u64,
        "search finished"
    );
    Ok(outcome)
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    depth: u8,
    ply: u8,
    /// Material balance plus castling nudges so far.
    running: Score,
    /// The castling-nudge part of `running`. Folded into the memo key since
    /// it is the only part of the value that depends on the path taken.
    bonus: Score,
    alpha: Score,
    beta: Score,
    /// Whether the side to move is in check.
    checked: bool,
}

struct NodeResult {
    value: Score,
    children: Vec<ScoredMove>,
    best_index: Option<usize>,
}

impl NodeResult {
    fn leaf(value: Score) -> Self {
        Self {
            value,
            children: Vec::new(),
            best_index: None,
        }
    }
}

struct Searcher<'c> {
    hero: Color,
    config: &'c SearchConfig,
    killers: KillerTable,
    memo: Option<TranspositionTable>,
    rng: StdRng,
    deadline: Option<Instant>,
    nodes: u64,
    memo_hits: u64,
    aborted: bool,
}

impl<'c> Searcher<'c> {
    fn new(hero: Color, config: &'c SearchConfig, started_at: Instant) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            hero,
            config,
            killers: KillerTable::new(usize::from(config.depth) + 1),
            memo: config
                .use_memo
                .then(|| TranspositionTable::new_with_mb(config.memo_size_mb)),
            rng,
            deadline: config.time_limit.map(|limit| started_at + limit),
            nodes: 0,
            memo_hits: 0,
            aborted: false,
        }
    }

    fn past_deadline(&mut self) -> bool {
        if !self.aborted {
            if let Some(deadline) = self.deadline {
                self.aborted = Instant::now() >= deadline;
            }
        }
        self.aborted
    }

    /// Memo lookups start below the retained part of the tree so a hit never
    /// truncates it.
    fn memo_key(&self, game_state: &GameState, frame: &Frame) -> Option<u64> {
        let first_ply = self.config.tree_plies.max(1);
        (self.memo.is_some() && frame.ply >= first_ply)
            .then(|| compute_zobrist_key(game_state) ^ salt_key(i64::from(frame.bonus)))
    }

    fn node(&mut self, game_state: &mut GameState, frame: Frame) -> ChessResult<NodeResult> {
        self.nodes += 1;
        if frame.depth == 0 {
            return Ok(NodeResult::leaf(frame.running));
        }
        if frame.ply > 0 && self.past_deadline() {
            return Ok(NodeResult::leaf(frame.running));
        }

        let side = game_state.side_to_move;
        let sign: Score = if side == self.hero { 1 } else { -1 };

        let memo_key = self.memo_key(game_state, &frame);
        if let Some(value) = self.probe_memo(memo_key, &frame) {
            self.memo_hits += 1;
            return Ok(NodeResult::leaf(value));
        }

        let moves = all_legal_moves(game_state, side, frame.checked)?;
        if moves.is_empty() {
            let value = if frame.checked {
                -sign * (MATE - Score::from(frame.ply))
            } else {
                DRAW
            };
            trace!(ply = frame.ply, value, "terminal node");
            return Ok(NodeResult::leaf(value));
        }

        let candidates: Vec<Candidate> = moves
            .into_iter()
            .map(|mv| Candidate {
                mv,
                delta: move_delta(game_state, mv.from, mv.to),
            })
            .collect();
        let killer = self.killers.get(frame.ply);
        let ordered = order_moves(
            game_state,
            candidates,
            frame.ply,
            killer,
            self.config,
            &mut self.rng,
        )?;

        let keep_tree = frame.ply == 0 || frame.ply < self.config.tree_plies;
        let mut children = Vec::with_capacity(if keep_tree { ordered.len() } else { 0 });
        let (mut alpha, mut beta) = (frame.alpha, frame.beta);
        let mut best: Option<(usize, Score)> = None;
        let mut decided = false;

        for (index, candidate) in ordered.iter().enumerate() {
            let mv = candidate.mv;
            let score = frame.running + sign * candidate.delta.total();
            let child = {
                let mut guard = MoveGuard::apply(game_state, mv.from, mv.to, true)?;
                let next_side = guard.side_to_move;
                let child_frame = Frame {
                    depth: frame.depth - 1,
                    ply: frame.ply + 1,
                    running: score,
                    bonus: frame.bonus + sign * candidate.delta.bonus,
                    alpha,
                    beta,
                    checked: guard.is_in_check(next_side),
                };
                self.node(&mut guard, child_frame)?
            };
            trace!(ply = frame.ply, mv = %mv, score, value = child.value, "move searched");

            if keep_tree {
                children.push(ScoredMove {
                    from: mv.from,
                    to: mv.to,
                    score,
                    value: child.value,
                    children: child.children,
                });
            }

            let improves = best.map_or(true, |(_, value)| sign * child.value > sign * value);
            if improves {
                best = Some((index, child.value));
            }
            let best_value = best.map_or(child.value, |(_, value)| value);

            if sign > 0 {
                alpha = alpha.max(child.value);
            } else {
                beta = beta.min(child.value);
            }
            if alpha >= beta {
                self.killers.record(frame.ply, mv);
                break;
            }
            if sign * best_value >= DECIDED {
                decided = true;
                break;
            }
            if self.aborted {
                break;
            }
        }

        let Some((best_index, value)) = best else {
            return Ok(NodeResult::leaf(frame.running));
        };

        if !self.aborted {
            if let Some(key) = memo_key {
                let bound = if decided {
                    if sign > 0 {
                        Bound::Lower
                    } else {
                        Bound::Upper
                    }
                } else if value <= frame.alpha {
                    Bound::Upper
                } else if value >= frame.beta {
                    Bound::Lower
                } else {
                    Bound::Exact
                };
                self.store_memo(key, &frame, value, bound);
            }
        }

        Ok(NodeResult {
            value,
            children,
            best_index: keep_tree.then_some(best_index),
        })
    }

    fn probe_memo(&mut self, key: Option<u64>, frame: &Frame) -> Option<Score> {
        let entry = self.memo.as_ref()?.probe(key?)?;
        if entry.depth != frame.depth {
            return None;
        }
        let value = value_from_memo(entry.score, frame.ply);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => value >= frame.beta,
            Bound::Upper => value <= frame.alpha,
        };
        usable.then_some(value)
    }

    fn store_memo(&mut self, key: u64, frame: &Frame, value: Score, bound: Bound) {
        if let Some(memo) = self.memo.as_mut() {
            memo.store(TTEntry {
                key,
                depth: frame.depth,
                score: value_to_memo(value, frame.ply),
                bound,
            });
        }
    }
}

/// Mate values are stored relative to the node so they can be reused at a
/// different distance from the root.
#[inline]
fn value_to_memo(value: Score, ply: u8) -> Score {
    if value >= DECIDED {
        value + Score::from(ply)
    } else if value <= -DECIDED {
        value - Score::from(ply)
    } else {
        value
    }
}

#[inline]
fn value_from_memo(stored: Score, ply: u8) -> Score {
    if stored >= DECIDED {
        stored - Score::from(ply)
    } else if stored <= -DECIDED {
        stored + Score::from(ply)
    } else {
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::piece_value;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("test FEN parses")
    }

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("valid square name")
    }

    fn config(depth: u8) -> SearchConfig {
        SearchConfig::default().with_depth(depth).with_seed(11)
    }

    #[test]
    fn finds_back_rank_mate_in_one() {
        let mut g = game("k7/r7/8/8/8/8/6PP/7K b - - 0 1");
        let before = g.clone();
        let outcome = search(Color::Black, &mut g, &config(2)).expect("search runs");
        assert_eq!(outcome.best_move(), Some(ChessMove::new(sq("a7"), sq("a1"))));
        assert_eq!(outcome.best_score, MATE - 1);
        assert_eq!(g, before);
    }

    #[test]
    fn grabs_hanging_queen() {
        let mut g = game("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
        let outcome = search(Color::White, &mut g, &config(1)).expect("search runs");
        assert_eq!(outcome.best_move(), Some(ChessMove::new(sq("d1"), sq("d5"))));
        assert_eq!(outcome.best_score, piece_value(PieceKind::Rook));
    }

    #[test]
    fn avoids_losing_the_queen_at_depth_two() {
        // Qxa7 wins a pawn but the rook on a8 takes back.
        let mut g = game("r3k3/p7/8/8/8/8/8/Q3K3 w - - 0 1");
        let outcome = search(Color::White, &mut g, &config(2)).expect("search runs");
        assert_ne!(outcome.best_move(), Some(ChessMove::new(sq("a1"), sq("a7"))));
    }

    #[test]
    fn memo_and_ordering_do_not_change_the_value() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
        ];
        for fen in fens {
            let mut g = game(fen);
            let hero = g.side_to_move;
            let plain = SearchConfig {
                randomize_root: false,
                checkers_first_plies: 0,
                danger_plies: 0,
                use_memo: false,
                ..config(3)
            };
            let tuned = config(3);
            let a = search(hero, &mut g, &plain).expect("search runs");
            let b = search(hero, &mut g, &tuned).expect("search runs");
            assert_eq!(a.best_score, b.best_score, "{fen}");
        }
    }

    #[test]
    fn refuses_finished_games() {
        let mut g = game("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(matches!(
            search(Color::Black, &mut g, &config(2)),
            Err(ChessError::GameAlreadyOver(_))
        ));
    }

    #[test]
    fn tree_depth_follows_config() {
        let mut g = GameState::new_game();
        let outcome = search(
            Color::White,
            &mut g,
            &config(2).with_tree_plies(1).deterministic(),
        )
        .expect("search runs");
        assert_eq!(outcome.tree.len(), 20);
        assert!(outcome.tree.iter().all(|m| m.children.is_empty()));
        assert!(outcome.best_index.is_some());
        assert!(outcome.nodes > 20);
    }

    #[test]
    fn zero_time_limit_still_returns_a_move() {
        let mut g = GameState::new_game();
        let outcome = search(
            Color::White,
            &mut g,
            &config(5).with_time_limit(std::time::Duration::ZERO),
        )
        .expect("search runs");
        assert!(outcome.aborted);
        assert!(outcome.best_move().is_some());
        assert_eq!(g, GameState::new_game());
    }

    #[test]
    fn mate_values_survive_the_memo_round_trip() {
        assert_eq!(value_from_memo(value_to_memo(MATE - 5, 3), 3), MATE - 5);
        assert_eq!(value_from_memo(value_to_memo(-(MATE - 4), 2), 1), -(MATE - 3));
        assert_eq!(value_from_memo(value_to_memo(42, 6), 1), 42);
    }
}
