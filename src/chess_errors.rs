//! Errors used throughout the engine.
//!
//! `ChessError` is the single error type across the crate. Every variant is a
//! local, recoverable condition: invalid input coordinates, illegal move
//! requests, malformed setup strings, or a search request on a finished game.
//! None of them leave a `GameState` modified.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};
use crate::game_state::game_state::GameStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// Row or column outside `0..=7`.
    #[error("invalid square (row {row}, col {col}); coordinates must be 0-7")]
    InvalidSquare { row: u8, col: u8 },

    #[error("invalid algebraic square '{0}'")]
    InvalidAlgebraic(String),

    #[error("no piece on {0}")]
    NoPieceAtSquare(Square),

    /// The piece on `square` belongs to the side that is not on move.
    #[error("piece on {square} is {color}, which is not on move")]
    WrongSideToMove { square: Square, color: Color },

    /// The destination is not among the legal destinations of `from`.
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("game is already over ({0:?})")]
    GameAlreadyOver(GameStatus),

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
