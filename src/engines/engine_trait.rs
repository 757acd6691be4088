//! Engine abstraction used by the self-play driver.
//!
//! Defines common input parameters and output payloads so different move
//! pickers can be swapped at runtime behind a single trait object.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::ChessMove;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Overrides the engine's configured depth.
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<ChessMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move. The position may be probed but must
    /// be handed back unchanged.
    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
    ) -> ChessResult<EngineOutput>;
}
