//! Alpha-beta engine.
//!
//! Thin adapter from the `Engine` trait to `search::alpha_beta`. Per-call
//! parameters override the depth and time limit of the stored config.

use std::time::Duration;

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;
use crate::search::alpha_beta::search;
use crate::search::search_config::SearchConfig;

pub struct AlphaBetaEngine {
    config: SearchConfig,
}

impl AlphaBetaEngine {
    pub fn new(default_depth: u8) -> Self {
        Self::with_config(SearchConfig::default().with_depth(default_depth))
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::with_config(SearchConfig::default())
    }
}

impl Engine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "AlphaBeta"
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput> {
        let mut config = self.config.clone();
        if let Some(depth) = params.depth {
            config.depth = depth;
        }
        if let Some(ms) = params.movetime_ms {
            config.time_limit = Some(Duration::from_millis(ms));
        }

        let hero = game_state.side_to_move;
        let outcome = match search(hero, game_state, &config) {
            Ok(outcome) => outcome,
            Err(ChessError::GameAlreadyOver(_)) => return Ok(EngineOutput::default()),
            Err(err) => return Err(err),
        };

        let mut out = EngineOutput {
            best_move: outcome.best_move(),
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score {} nodes {} memo_hits {}",
            config.depth, outcome.best_score, outcome.nodes, outcome.memo_hits
        ));
        if outcome.aborted {
            out.info_lines
                .push("info string alpha_beta_engine deadline_reached".to_owned());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::ChessMove;

    #[test]
    fn takes_the_free_rook() {
        let mut engine = AlphaBetaEngine::with_config(SearchConfig::default().with_seed(1));
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/r7/R3K3 w - - 0 1").expect("FEN parses");
        let out = engine
            .choose_move(&mut game, &GoParams { depth: Some(2), movetime_ms: None })
            .expect("engine runs");
        let sq = |n| crate::utils::algebraic::algebraic_to_square(n).expect("valid");
        assert_eq!(out.best_move, Some(ChessMove::new(sq("a1"), sq("a2"))));
        assert!(out.info_lines[0].starts_with("info depth 2"));
    }

    #[test]
    fn go_params_do_not_change_the_stored_config() {
        let mut engine = AlphaBetaEngine::new(3);
        let mut game = GameState::new_game();
        let out = engine
            .choose_move(&mut game, &GoParams { depth: Some(1), movetime_ms: Some(5_000) })
            .expect("engine runs");
        assert!(out.best_move.is_some());
        assert!(out.info_lines[0].starts_with("info depth 1"));
        assert_eq!(engine.config().depth, 3);
        assert_eq!(engine.config().time_limit, None);
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn finished_game_yields_no_move() {
        let mut engine = AlphaBetaEngine::new(2);
        let mut game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN parses");
        let out = engine
            .choose_move(&mut game, &GoParams::default())
            .expect("engine runs");
        assert_eq!(out.best_move, None);
    }
}
