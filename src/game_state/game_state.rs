//! Long-lived game position and the operations collaborators drive it with.
//!
//! `GameState` bundles the board, side to move, castling rights, the king
//! location cache and the committed-move history. One caller owns it for the
//! whole game; the search borrows it mutably and always hands it back in the
//! state it received it.

use tracing::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::standard_count;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move_in_place, undo_move_in_place};
use crate::move_generation::legal_move_checks::in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_destinations};
use crate::search::alpha_beta::{search, SearchOutcome};
use crate::search::board_scoring::{material_score, Score};
use crate::search::search_config::SearchConfig;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Checkmate { winner: Color },
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Ended(EndReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    /// Cached king squares indexed by `Color::index`. Kept in lockstep with
    /// `board` by the move executor.
    pub king_position: [Square; 2],
    /// Committed moves, newest last.
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            king_position: [Square::at(7, 4), Square::at(0, 4)],
            history: Vec::new(),
        }
    }

    /// Build a position from an arbitrary board. Fails unless each color has
    /// exactly one king.
    pub fn from_board(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
    ) -> ChessResult<Self> {
        let white_king = single_king(&board, Color::White)?;
        let black_king = single_king(&board, Color::Black)?;
        Ok(Self {
            board,
            side_to_move,
            castling_rights,
            king_position: [white_king, black_king],
            history: Vec::new(),
        })
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_position[color.index()]
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        in_check(color, &self.board, self.king_square(color))
    }

    /// Legal destinations for the piece on `square`, whichever color it is.
    /// An empty square has none. The position is probed speculatively and
    /// restored before returning.
    pub fn legal_destinations(&mut self, square: Square) -> ChessResult<Vec<Square>> {
        legal_destinations(self, square, None)
    }

    /// Validate and commit a move for the side to move, recording it in the
    /// history so `undo_last` can revert it.
    pub fn apply_move(&mut self, from: Square, to: Square) -> ChessResult<MoveRecord> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or(ChessError::NoPieceAtSquare(from))?;
        if piece.color != self.side_to_move {
            return Err(ChessError::WrongSideToMove {
                square: from,
                color: piece.color,
            });
        }
        if !legal_destinations(self, from, None)?.contains(&to) {
            return Err(ChessError::IllegalMove { from, to });
        }

        let record = apply_move_in_place(self, from, to, true)?;
        self.history.push(record);
        debug!(mv = %ChessMove::new(from, to), color = %piece.color, "move committed");
        Ok(record)
    }

    /// Revert the most recent committed move. No-op on an empty history.
    pub fn undo_last(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        undo_move_in_place(self, &record);
        debug!(mv = %ChessMove::new(record.from, record.to), "move undone");
        Some(record)
    }

    pub fn game_status(&mut self) -> GameStatus {
        let side = self.side_to_move;
        let checked = self.is_in_check(side);
        if has_any_legal_move(self, side, checked) {
            GameStatus::Ongoing
        } else if checked {
            GameStatus::Ended(EndReason::Checkmate {
                winner: side.opposite(),
            })
        } else {
            GameStatus::Ended(EndReason::Draw)
        }
    }

    /// Engine move for the side to move at a fixed depth with default
    /// heuristics.
    pub fn search(&mut self, depth: u8) -> ChessResult<ChessMove> {
        let outcome = self.search_with(&SearchConfig::default().with_depth(depth))?;
        outcome
            .best_move()
            .ok_or_else(|| ChessError::GameAlreadyOver(self.game_status()))
    }

    /// Full search result, including the scored move tree.
    pub fn search_with(&mut self, config: &SearchConfig) -> ChessResult<SearchOutcome> {
        let hero = self.side_to_move;
        search(hero, self, config)
    }

    /// Material balance from `color`'s point of view.
    #[inline]
    pub fn score(&self, color: Color) -> Score {
        material_score(color, &self.board)
    }

    /// Pieces absent from the board relative to the standard starting set.
    pub fn missing_pieces(&self) -> Vec<Piece> {
        let mut counts = [[0u8; 6]; 2];
        for (_, piece) in self.board.pieces() {
            counts[piece.color.index()][piece.kind.index()] += 1;
        }

        let mut missing = Vec::new();
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                let present = counts[color.index()][kind.index()];
                for _ in present..standard_count(kind) {
                    missing.push(Piece::new(color, kind));
                }
            }
        }
        missing
    }
}

fn single_king(board: &Board, color: Color) -> ChessResult<Square> {
    match board.find_kings(color).as_slice() {
        [square] => Ok(*square),
        kings => Err(ChessError::InvalidLayout(format!(
            "{color} has {} kings, expected exactly one",
            kings.len()
        ))),
    }
}
