//! Board-to-FEN writer, the inverse of `fen_parser`.
//!
//! Castling rights are read back from unmoved king/rook pairs and the
//! en-passant field from a trailing double-step record. Clock fields are not
//! tracked and are left out.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::home_rank;
use crate::game_state::chess_types::{Coord, PieceKind, Side, SpecialMove};
use crate::utils::fen_parser::parse_fen;

/// Placement, side, castling and en-passant fields.
pub fn generate_fen(board: &Board, side_to_move: Side) -> String {
    format!(
        "{} {} {} {}",
        generate_board_field(board),
        side_to_move.code(),
        generate_castling_field(board),
        generate_en_passant_field(board)
    )
}

/// FEN for `board` only when parsing it back rebuilds the identical board.
///
/// Positions carrying more history than one double step, or moved flags that
/// FEN cannot express, yield `None`.
pub fn exact_fen(board: &Board, side_to_move: Side) -> Option<String> {
    let fen = generate_fen(board, side_to_move);
    match parse_fen(&fen) {
        Ok((parsed, _)) if parsed == *board => Some(fen),
        _ => None,
    }
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match board.piece_at(Coord::new(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece.side, piece.kind));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(side: Side, kind: PieceKind) -> char {
    match side {
        Side::White => kind.code(),
        Side::Black => kind.code().to_ascii_lowercase(),
    }
}

fn can_castle(board: &Board, side: Side, rook_file: u8) -> bool {
    let rank = home_rank(side);
    let unmoved = |square: Coord, kind: PieceKind| {
        board
            .piece_at(square)
            .is_some_and(|p| p.kind == kind && p.side == side && !p.has_moved)
    };
    unmoved(Coord::new(4, rank), PieceKind::King) && unmoved(Coord::new(rook_file, rank), PieceKind::Rook)
}

fn generate_castling_field(board: &Board) -> String {
    let mut out = String::new();

    for (side, rook_file, code) in [
        (Side::White, 7, 'K'),
        (Side::White, 0, 'Q'),
        (Side::Black, 7, 'k'),
        (Side::Black, 0, 'q'),
    ] {
        if can_castle(board, side, rook_file) {
            out.push(code);
        }
    }

    if out.is_empty() {
        out.push('-');
    }
    out
}

fn generate_en_passant_field(board: &Board) -> String {
    match board.last_move() {
        Some(record) if record.special == Some(SpecialMove::DoubleStep) => {
            let mid_rank = (record.from.rank + record.to.rank) / 2;
            Coord::new(record.to.file, mid_rank).to_string()
        }
        _ => "-".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{exact_fen, generate_fen};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Coord, PieceKind, Side};
    use crate::game_state::piece::Piece;
    use crate::utils::algebraic::parse_move;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn start_position_fen() {
        assert_eq!(
            generate_fen(&Board::new(), Side::White),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
        );
    }

    #[test]
    fn parsed_positions_write_back_unchanged() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
            "8/8/8/8/k2Pp2Q/8/8/4K3 b - d3",
            "4k3/8/8/8/8/8/4P3/R3K3 w Q -",
        ] {
            let (board, side) = parse_fen(fen).expect("FEN");
            assert_eq!(generate_fen(&board, side), fen);
            assert_eq!(exact_fen(&board, side).as_deref(), Some(fen));
        }
    }

    #[test]
    fn deep_history_has_no_exact_fen() {
        let mut board = Board::new();
        board.apply(parse_move("g1f3").expect("move")).expect("apply");
        board.apply(parse_move("g8f6").expect("move")).expect("apply");
        assert!(exact_fen(&board, Side::White).is_none());

        let mut odd = Board::empty();
        let mut knight = Piece::new(PieceKind::Knight, Side::White);
        knight.has_moved = true;
        odd.set_piece(Coord::new(1, 0), Some(knight));
        assert!(exact_fen(&odd, Side::White).is_none());
    }
}
