use crate::game_state::chess_types::{Coord, SpecialMove};
use crate::game_state::piece::Piece;

/// Rook relocation performed alongside a castling king move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RookShift {
    pub from: Coord,
    pub to: Coord,
    /// Rook as it stood before castling (restores `has_moved` on undo).
    pub rook: Piece,
}

/// Single undo record for `move_and_special` / `undo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub from: Coord,
    pub to: Coord,
    pub special: Option<SpecialMove>,

    /// Snapshot of the mover before the move, reverting promotion and
    /// `has_moved` when put back.
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,

    pub en_passant_capture: Option<(Coord, Piece)>,
    pub castling_rook: Option<RookShift>,
}

impl UndoState {
    /// Whether this record is a two-square pawn advance landing on `square`.
    #[inline]
    pub fn is_double_step_onto(&self, square: Coord) -> bool {
        self.special == Some(SpecialMove::DoubleStep) && self.to == square
    }
}
