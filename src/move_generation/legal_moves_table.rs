//! Relative-table move generation for pawns, knights and kings.
//!
//! Walks the piece's move table (see `game_state::piece`) and applies the
//! rules attached to each cell class, including the board-dependent parts of
//! en passant and castling. Castling safety against attacks is checked later,
//! in `legal_move_generator`.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{castle_landing_files, home_rank};
use crate::game_state::chess_types::{ChessMove, Coord, PieceKind, Side, SpecialMove};
use crate::game_state::piece::{MoveClass, Piece};

pub fn generate_table_moves(board: &Board, from: Coord, out: &mut Vec<ChessMove>) {
    let Some(piece) = board.piece_at(from) else {
        return;
    };
    let Some(table) = piece.move_table() else {
        return;
    };

    for (d_file, d_rank, class) in table.offsets(piece.side) {
        let Some(to) = from.offset(d_file, d_rank) else {
            continue;
        };
        let target = board.piece_at(to);

        match class {
            MoveClass::Step => {
                let allowed = if piece.kind == PieceKind::Pawn {
                    target.is_none()
                } else {
                    target.map_or(true, |t| t.side != piece.side)
                };
                if allowed {
                    out.push(ChessMove::new(from, to, None));
                }
            }
            MoveClass::DoubleStep => {
                let passes_through = from.offset(0, d_rank / 2);
                let path_clear = passes_through.is_some_and(|sq| board.piece_at(sq).is_none());
                if !piece.has_moved && target.is_none() && path_clear {
                    out.push(ChessMove::new(from, to, Some(SpecialMove::DoubleStep)));
                }
            }
            MoveClass::PawnDiagonal => match target {
                Some(t) if t.side != piece.side => {
                    out.push(ChessMove::new(from, to, Some(SpecialMove::PawnCapture)));
                }
                None if en_passant_victim(board, from, to, piece.side).is_some() => {
                    out.push(ChessMove::new(from, to, Some(SpecialMove::EnPassant)));
                }
                _ => {}
            },
            MoveClass::Castle => {
                if castle_rook(board, from, &piece, d_file).is_some() {
                    out.push(ChessMove::new(from, to, Some(SpecialMove::Castle)));
                }
            }
        }
    }
}

/// Square of the pawn an en-passant move from `from` to `to` would capture.
///
/// Qualifies only when the immediately preceding move was an enemy pawn's
/// double step onto the square beside `from`, and that pawn is still there.
pub fn en_passant_victim(board: &Board, from: Coord, to: Coord, side: Side) -> Option<Coord> {
    let victim = Coord::new(to.file, from.rank);
    let last = board.last_move()?;
    if !last.is_double_step_onto(victim) {
        return None;
    }

    match board.piece_at(victim) {
        Some(p) if p.kind == PieceKind::Pawn && p.side != side => Some(victim),
        _ => None,
    }
}

/// Rook square for a castling move of `d_file` (±2) by `king` on `from`.
///
/// Requires an unmoved king on its home square, an unmoved same-side rook in
/// the corner of that wing, and every square between them empty.
pub fn castle_rook(board: &Board, from: Coord, king: &Piece, d_file: i8) -> Option<Coord> {
    if king.kind != PieceKind::King
        || king.has_moved
        || from != Coord::new(4, home_rank(king.side))
    {
        return None;
    }

    let rook_file = if d_file > 0 { 7 } else { 0 };
    let rook_square = Coord::new(rook_file, from.rank);
    match board.piece_at(rook_square) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.side == king.side && !rook.has_moved => {}
        _ => return None,
    }

    let (low, high) = if rook_file > from.file {
        (from.file, rook_file)
    } else {
        (rook_file, from.file)
    };
    let between_empty = (low + 1..high).all(|file| board.piece_at(Coord::new(file, from.rank)).is_none());

    between_empty.then_some(rook_square)
}

/// Rook origin and destination for a castling king move `from -> to`.
pub fn castle_rook_shift(from: Coord, to: Coord) -> (Coord, Coord) {
    let rook_file = if to.file > from.file { 7 } else { 0 };
    let (_, rook_landing) = castle_landing_files(rook_file);
    (
        Coord::new(rook_file, from.rank),
        Coord::new(rook_landing, from.rank),
    )
}
