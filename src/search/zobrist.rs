//! Zobrist hashing for the search memo.
//!
//! The key covers piece placement, side to move and castling rights, which
//! together determine every legal continuation. Tables are generated from a
//! fixed seed so hashes are deterministic across runs.

use std::sync::OnceLock;

use crate::game_state::{chess_types::*, game_state::GameState};

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for kind in color {
            for sq in kind {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    mix(*state)
}

#[inline]
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square.index()]
}

#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[usize::from(castling_rights.mask() & 0x0F)]
}

/// Xored in when Black is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Spread an arbitrary small value over the key space so it can be folded
/// into a position key.
#[inline]
pub fn salt_key(value: i64) -> u64 {
    mix((value as u64).wrapping_add(0xD1B5_4A32_D192_ED03))
}

/// Full position key.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = game_state
        .board
        .pieces()
        .fold(0u64, |acc, (sq, piece)| acc ^ piece_square_key(piece, sq));

    if game_state.side_to_move == Color::Black {
        key ^= side_to_move_key();
    }

    key ^ castling_key(game_state.castling_rights)
}
