//! Crate root module declarations for the minimax chess engine.
//!
//! This file exposes the top-level subsystems (game state, move geometry,
//! legal move generation, search, engines, and utility helpers) so binaries,
//! tests, and benches can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod pseudo_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod move_ordering;
    pub mod search_config;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_alpha_beta;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod render_game_state;
}
