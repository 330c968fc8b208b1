use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::{Coord, PieceKind, SpecialMove};
use crate::game_state::undo_state::{RookShift, UndoState};
use crate::move_generation::legal_moves_table::castle_rook_shift;

/// Apply `from -> to` in place, including the side effects named by
/// `special`, and push one undo record.
///
/// No legality check happens here; callers pick moves from the legal set.
pub fn apply_move(
    board: &mut Board,
    from: Coord,
    to: Coord,
    special: Option<SpecialMove>,
) -> ChessResult<()> {
    let moved_piece = board
        .piece_at(from)
        .ok_or(ChessError::EmptySourceSquare(from))?;

    // Base move.
    board.take_piece(from);
    let mut landed = moved_piece;
    landed.has_moved = true;
    let captured_piece = board.set_piece(to, Some(landed));

    let mut en_passant_capture = None;
    let mut castling_rook = None;

    match special {
        Some(SpecialMove::EnPassant) => {
            let victim = Coord::new(to.file, from.rank);
            en_passant_capture = board.take_piece(victim).map(|pawn| (victim, pawn));
        }
        Some(SpecialMove::Castle) => {
            let (rook_from, rook_to) = castle_rook_shift(from, to);
            if let Some(rook) = board.take_piece(rook_from) {
                let mut shifted = rook;
                shifted.has_moved = true;
                board.set_piece(rook_to, Some(shifted));
                castling_rook = Some(RookShift {
                    from: rook_from,
                    to: rook_to,
                    rook,
                });
            }
        }
        _ => {}
    }

    if moved_piece.kind == PieceKind::Pawn && to.rank == promotion_rank(moved_piece.side) {
        landed.kind = PieceKind::Queen;
        board.set_piece(to, Some(landed));
    }

    board.history.push(UndoState {
        from,
        to,
        special,
        moved_piece,
        captured_piece,
        en_passant_capture,
        castling_rook,
    });

    Ok(())
}

/// Pop the last record and put every square it touched back.
pub fn undo_move(board: &mut Board) -> Option<UndoState> {
    let record = board.history.pop()?;

    board.set_piece(record.from, Some(record.moved_piece));
    board.set_piece(record.to, record.captured_piece);

    if let Some((square, pawn)) = record.en_passant_capture {
        board.set_piece(square, Some(pawn));
    }

    if let Some(shift) = record.castling_rook {
        board.take_piece(shift.to);
        board.set_piece(shift.from, Some(shift.rook));
    }

    Some(record)
}
