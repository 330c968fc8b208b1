//! FEN-to-Board parser.
//!
//! Builds a `Board` plus side to move from a Forsyth-Edwards Notation string.
//! The board keeps no rights fields, so castling rights and the en-passant
//! square are folded into piece state and history instead:
//!
//! - kings and rooks without a matching right are marked as moved;
//! - pawns off their starting rank are marked as moved;
//! - an en-passant square becomes a synthetic double-step record.
//!
//! Halfmove and fullmove clocks are accepted but ignored.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{home_rank, pawn_rank};
use crate::game_state::chess_types::{Coord, PieceKind, Side, SpecialMove};
use crate::game_state::piece::Piece;
use crate::game_state::undo_state::UndoState;
use crate::utils::algebraic::notation_to_coord;

fn invalid(msg: impl Into<String>) -> ChessError {
    ChessError::InvalidPosition(msg.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<(Board, Side)> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");

    for clock in parts.by_ref().take(2) {
        clock
            .parse::<u16>()
            .map_err(|_| invalid(format!("invalid clock field: {clock}")))?;
    }
    if parts.next().is_some() {
        return Err(invalid("FEN has extra trailing fields"));
    }

    let mut board = Board::empty();
    parse_board(board_part, &mut board)?;
    let side = parse_side_to_move(side_part)?;
    apply_moved_flags(&mut board, parse_castling_rights(castling_part)?);

    if en_passant_part != "-" {
        let target = notation_to_coord(en_passant_part)
            .map_err(|_| invalid(format!("invalid en-passant square: {en_passant_part}")))?;
        push_double_step_record(&mut board, target, side.opposite())?;
    }

    Ok((board, side))
}

fn parse_board(board_part: &str, board: &mut Board) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("board rank has too many files"));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            if file >= 8 {
                return Err(invalid("board rank has too many files"));
            }

            board.set_piece(Coord::new(file, rank), Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Side> {
    let mut chars = side_part.chars();
    match (chars.next().and_then(Side::from_code), chars.next()) {
        (Some(side), None) => Ok(side),
        _ => Err(invalid(format!("invalid side-to-move field: {side_part}"))),
    }
}

/// Castling rights indexed `[side][wing]`, wing 0 = queenside, 1 = kingside.
type CastlingRights = [[bool; 2]; 2];

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = [[false; 2]; 2];
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights[Side::White.index()][1] = true,
            'Q' => rights[Side::White.index()][0] = true,
            'k' => rights[Side::Black.index()][1] = true,
            'q' => rights[Side::Black.index()][0] = true,
            _ => return Err(invalid(format!("invalid castling rights character: {ch}"))),
        }
    }

    Ok(rights)
}

fn apply_moved_flags(board: &mut Board, rights: CastlingRights) {
    let squares: Vec<(Coord, Piece)> = board.occupied().collect();

    for (square, mut piece) in squares {
        let side_rights = rights[piece.side.index()];
        let on_home_rank = square.rank == home_rank(piece.side);

        piece.has_moved = match piece.kind {
            PieceKind::Pawn => square.rank != pawn_rank(piece.side),
            PieceKind::King => !(on_home_rank && square.file == 4 && side_rights.contains(&true)),
            PieceKind::Rook => match square.file {
                0 if on_home_rank => !side_rights[0],
                7 if on_home_rank => !side_rights[1],
                _ => true,
            },
            _ => false,
        };

        board.set_piece(square, Some(piece));
    }
}

/// Record the double step that produced `target` so en passant is available
/// to the side to move.
fn push_double_step_record(board: &mut Board, target: Coord, stepper: Side) -> ChessResult<()> {
    let forward = stepper.forward();
    let (Some(origin), Some(landing)) = (target.offset(0, -forward), target.offset(0, forward))
    else {
        return Err(invalid(format!("en-passant square {target} is off the board edge")));
    };

    if origin.rank != pawn_rank(stepper) {
        return Err(invalid(format!(
            "en-passant square {target} does not fit the side to move"
        )));
    }
    let landed = board.piece_at(landing);
    if !landed.is_some_and(|p| p.kind == PieceKind::Pawn && p.side == stepper) {
        return Err(invalid(format!("no {stepper} pawn on {landing} for en passant")));
    }
    if board.piece_at(target).is_some() || board.piece_at(origin).is_some() {
        return Err(invalid(format!("en-passant path through {target} is occupied")));
    }

    board.history.push(UndoState {
        from: origin,
        to: landing,
        special: Some(SpecialMove::DoubleStep),
        moved_piece: Piece::new(PieceKind::Pawn, stepper),
        captured_piece: None,
        en_passant_capture: None,
        castling_rook: None,
    });

    Ok(())
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let side = if ch.is_ascii_uppercase() {
        Side::White
    } else if ch.is_ascii_lowercase() {
        Side::Black
    } else {
        return None;
    };

    PieceKind::from_code(ch).map(|kind| Piece::new(kind, side))
}
