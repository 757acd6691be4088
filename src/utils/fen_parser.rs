//! FEN-to-GameState parser.
//!
//! Reads the board layout, side to move and castling rights. The en-passant,
//! halfmove and fullmove fields are optional and ignored since the engine
//! tracks none of them.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::{chess_types::*, game_state::GameState};

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| layout_error("missing board layout in FEN"))?;
    let side_part = parts.next().ok_or_else(|| layout_error("missing side-to-move in FEN"))?;
    let castling_part = parts.next().unwrap_or("-");

    if parts.count() > 3 {
        return Err(layout_error("FEN has extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    GameState::from_board(board, side_to_move, castling_rights)
}

fn layout_error(message: impl Into<String>) -> ChessError {
    ChessError::InvalidLayout(message.into())
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(layout_error("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    // FEN lists rank 8 first, which is row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(layout_error(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| layout_error(format!("invalid piece character '{ch}'")))?;
            if col >= 8 {
                return Err(layout_error(format!("rank {} has too many files", 8 - row)));
            }
            board.set(Square::at(row as u8, col as u8), Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(layout_error(format!("rank {} does not sum to 8 files", 8 - row)));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(layout_error(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::none();
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.get_mut(Color::White).right = true,
            'Q' => rights.get_mut(Color::White).left = true,
            'k' => rights.get_mut(Color::Black).right = true,
            'q' => rights.get_mut(Color::Black).left = true,
            _ => return Err(layout_error(format!("invalid castling rights character: {ch}"))),
        }
    }

    Ok(rights)
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_fen_matches_new_game() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("start FEN parses");
        assert_eq!(parsed, GameState::new_game());
    }

    #[test]
    fn trailing_fields_are_optional() {
        let short = parse_fen("4k3/8/8/8/8/8/8/4K3 b").expect("two fields parse");
        assert_eq!(short.side_to_move, Color::Black);
        assert_eq!(short.castling_rights, CastlingRights::none());

        let with_ep = parse_fen("4k3/8/8/8/8/8/4P3/4K3 w - e3 0 1").expect("parses");
        assert_eq!(with_ep.king_square(Color::White), Square::at(7, 4));
    }

    #[test]
    fn partial_castling_rights() {
        let g = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("parses");
        assert_eq!(g.castling_rights.get(Color::White), SideRights { left: false, right: true });
        assert_eq!(g.castling_rights.get(Color::Black), SideRights { left: true, right: false });
    }

    #[test]
    fn malformed_input_is_rejected() {
        for bad in [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w Z - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
        ] {
            assert!(
                matches!(parse_fen(bad), Err(ChessError::InvalidLayout(_))),
                "{bad:?}"
            );
        }
    }
}
