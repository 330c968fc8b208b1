//! Full legal move generation pipeline.
//!
//! Combines sliding and table generation, speculatively applies each
//! candidate to reject self-check, screens castling paths against the
//! opponent's attack set, and answers checkmate/stalemate queries.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{ChessMove, Coord, Side, SpecialMove, Termination};
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::{attacked_squares, is_square_attacked, AttackMap};
use crate::move_generation::legal_moves_sliding::generate_sliding_moves;
use crate::move_generation::legal_moves_table::generate_table_moves;

/// Moves obeying piece geometry, ignoring king safety.
pub fn generate_pseudo_legal_moves(board: &Board, from: Coord) -> Vec<ChessMove> {
    let mut out = Vec::with_capacity(28);
    generate_sliding_moves(board, from, &mut out);
    generate_table_moves(board, from, &mut out);
    out
}

/// Legal moves for the piece on `from`. An empty square yields no moves.
pub fn generate_legal_moves(board: &mut Board, from: Coord) -> Vec<ChessMove> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    let mut candidates = generate_pseudo_legal_moves(board, from);
    remove_checks(board, piece.side, &mut candidates);

    if candidates
        .iter()
        .any(|mv| mv.special == Some(SpecialMove::Castle))
    {
        let attacked = attacked_squares(board, piece.side.opposite());
        candidates.retain(|mv| {
            mv.special != Some(SpecialMove::Castle) || castle_path_is_safe(mv, &attacked)
        });
    }

    candidates
}

/// Drop every candidate that would leave `side`'s king attacked.
///
/// Each candidate is applied for real and then undone, so the board is
/// unchanged on return. A side without a king filters nothing.
pub fn remove_checks(board: &mut Board, side: Side, candidates: &mut Vec<ChessMove>) {
    candidates.retain(|mv| {
        if apply_move(board, mv.from, mv.to, mv.special).is_err() {
            return false;
        }
        let exposed = board
            .king_coord(side)
            .is_some_and(|king| is_square_attacked(board, king, side.opposite()));
        undo_move(board);
        !exposed
    });
}

/// The king may not castle out of, through, or into an attacked square.
fn castle_path_is_safe(mv: &ChessMove, attacked: &AttackMap) -> bool {
    let step = if mv.to.file > mv.from.file { 1 } else { -1 };
    let transit = mv.from.offset(step, 0);
    [Some(mv.from), transit, Some(mv.to)]
        .into_iter()
        .flatten()
        .all(|square| !attacked.contains(square))
}

/// Every legal move for every piece of `side`, in board order.
pub fn all_legal_moves(board: &mut Board, side: Side) -> Vec<ChessMove> {
    board
        .piece_squares(side)
        .into_iter()
        .flat_map(|from| generate_legal_moves(board, from))
        .collect()
}

pub fn has_any_legal_move(board: &mut Board, side: Side) -> bool {
    board
        .piece_squares(side)
        .into_iter()
        .any(|from| !generate_legal_moves(board, from).is_empty())
}

/// `Some` when `side` has no legal move: checkmate if its king is attacked,
/// otherwise stalemate (reported as a draw).
pub fn is_checkmate_or_draw(board: &mut Board, side: Side) -> Option<Termination> {
    if has_any_legal_move(board, side) {
        return None;
    }

    if board.is_in_check(side) {
        Some(Termination::Checkmate)
    } else {
        Some(Termination::Draw)
    }
}
