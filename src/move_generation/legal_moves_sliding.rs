//! Sliding move generation for rooks, bishops and queens.
//!
//! Each allowed direction is walked one square at a time: empty squares are
//! emitted and the walk continues, an enemy piece is emitted and ends the
//! walk, an own piece or the board edge ends it without emitting.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{ChessMove, Coord};
use crate::game_state::piece::Piece;

pub const STRAIGHT_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Directions `piece` may slide in (none for pawns, knights and kings).
pub fn slide_directions(piece: &Piece) -> impl Iterator<Item = (i8, i8)> {
    let straight: &'static [(i8, i8)] = if piece.is_straight() {
        &STRAIGHT_DIRECTIONS
    } else {
        &[]
    };
    let diagonal: &'static [(i8, i8)] = if piece.is_diagonal() {
        &DIAGONAL_DIRECTIONS
    } else {
        &[]
    };
    straight.iter().chain(diagonal.iter()).copied()
}

pub fn generate_sliding_moves(board: &Board, from: Coord, out: &mut Vec<ChessMove>) {
    let Some(piece) = board.piece_at(from) else {
        return;
    };

    for (d_file, d_rank) in slide_directions(&piece) {
        let mut cursor = from;
        while let Some(to) = cursor.offset(d_file, d_rank) {
            match board.piece_at(to) {
                None => out.push(ChessMove::new(from, to, None)),
                Some(target) => {
                    if target.side != piece.side {
                        out.push(ChessMove::new(from, to, None));
                    }
                    break;
                }
            }
            cursor = to;
        }
    }
}

/// First occupied square from `from` (exclusive) in the given direction.
pub fn first_piece_along(board: &Board, from: Coord, d_file: i8, d_rank: i8) -> Option<(Coord, Piece)> {
    let mut cursor = from;
    while let Some(next) = cursor.offset(d_file, d_rank) {
        if let Some(piece) = board.piece_at(next) {
            return Some((next, piece));
        }
        cursor = next;
    }
    None
}
