//! Piece descriptors and their static movement capability.
//!
//! A `Piece` only carries kind, side, and whether it has moved. Everything
//! about how it moves is a pure function of `kind`: sliding flags for rooks,
//! bishops and queens, and a relative move table for pawns, knights and kings.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Side};

/// Move class encoded in a relative move table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveClass {
    /// Knight/king step (may capture) or pawn forward push (empty target only).
    Step,
    /// Pawn two-square advance from an unmoved pawn.
    DoubleStep,
    /// Pawn diagonal: capture or en passant.
    PawnDiagonal,
    /// King two-square castling move.
    Castle,
}

impl MoveClass {
    #[inline]
    const fn from_cell(cell: i8) -> Option<Self> {
        match cell {
            1 => Some(MoveClass::Step),
            2 => Some(MoveClass::DoubleStep),
            3 => Some(MoveClass::PawnDiagonal),
            4 => Some(MoveClass::Castle),
            _ => None,
        }
    }
}

/// Marks the piece's own square inside a table.
const CENTER: i8 = 0;

/// Relative move table written from the mover's point of view: the top row is
/// furthest forward. Cells hold a move class tag, `CENTER`, or `-1` (illegal).
#[derive(Debug)]
pub struct MoveTable {
    rows: &'static [&'static [i8]],
}

pub static PAWN_TABLE: MoveTable = MoveTable {
    rows: &[
        &[-1, 2, -1],
        &[3, 1, 3],
        &[-1, 0, -1],
    ],
};

pub static KNIGHT_TABLE: MoveTable = MoveTable {
    rows: &[
        &[-1, 1, -1, 1, -1],
        &[1, -1, -1, -1, 1],
        &[-1, -1, 0, -1, -1],
        &[1, -1, -1, -1, 1],
        &[-1, 1, -1, 1, -1],
    ],
};

/// The `4` cells are only reachable by castling.
pub static KING_TABLE: MoveTable = MoveTable {
    rows: &[
        &[-1, 1, 1, 1, -1],
        &[4, 1, 0, 1, 4],
        &[-1, 1, 1, 1, -1],
    ],
};

impl MoveTable {
    fn center(&self) -> (usize, usize) {
        for (row_idx, row) in self.rows.iter().enumerate() {
            if let Some(col_idx) = row.iter().position(|&cell| cell == CENTER) {
                return (row_idx, col_idx);
            }
        }
        unreachable!("every move table has a center cell")
    }

    /// Relative `(d_file, d_rank, class)` entries for a piece of `side`.
    ///
    /// Tables are mirrored vertically for Black so that "forward" always
    /// points away from the owner's home rank.
    pub fn offsets(&self, side: Side) -> impl Iterator<Item = (i8, i8, MoveClass)> + '_ {
        let (center_row, center_col) = self.center();
        let forward = side.forward();

        self.rows.iter().enumerate().flat_map(move |(row_idx, row)| {
            row.iter().enumerate().filter_map(move |(col_idx, &cell)| {
                let class = MoveClass::from_cell(cell)?;
                let d_file = col_idx as i8 - center_col as i8;
                let d_rank = (center_row as i8 - row_idx as i8) * forward;
                Some((d_file, d_rank, class))
            })
        })
    }
}

/// One piece instance on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self {
            kind,
            side,
            has_moved: false,
        }
    }

    /// Slides along ranks and files.
    #[inline]
    pub const fn is_straight(&self) -> bool {
        matches!(self.kind, PieceKind::Rook | PieceKind::Queen)
    }

    /// Slides along diagonals.
    #[inline]
    pub const fn is_diagonal(&self) -> bool {
        matches!(self.kind, PieceKind::Bishop | PieceKind::Queen)
    }

    #[inline]
    pub fn move_table(&self) -> Option<&'static MoveTable> {
        match self.kind {
            PieceKind::Pawn => Some(&PAWN_TABLE),
            PieceKind::Knight => Some(&KNIGHT_TABLE),
            PieceKind::King => Some(&KING_TABLE),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => None,
        }
    }

    #[inline]
    pub const fn value(&self) -> i32 {
        self.kind.value()
    }
}

/// Two-character code such as `wP` or `bN`.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.code(), self.kind.code())
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveClass, Piece, KING_TABLE, KNIGHT_TABLE, PAWN_TABLE};
    use crate::game_state::chess_types::{PieceKind, Side};

    #[test]
    fn pawn_table_points_forward_for_each_side() {
        let white: Vec<_> = PAWN_TABLE.offsets(Side::White).collect();
        assert!(white.contains(&(0, 1, MoveClass::Step)));
        assert!(white.contains(&(0, 2, MoveClass::DoubleStep)));
        assert!(white.contains(&(-1, 1, MoveClass::PawnDiagonal)));
        assert!(white.contains(&(1, 1, MoveClass::PawnDiagonal)));

        let black: Vec<_> = PAWN_TABLE.offsets(Side::Black).collect();
        assert!(black.contains(&(0, -1, MoveClass::Step)));
        assert!(black.contains(&(0, -2, MoveClass::DoubleStep)));
        assert_eq!(black.len(), 4);
    }

    #[test]
    fn knight_table_has_eight_jumps() {
        let jumps: Vec<_> = KNIGHT_TABLE.offsets(Side::White).collect();
        assert_eq!(jumps.len(), 8);
        assert!(jumps
            .iter()
            .all(|&(df, dr, class)| class == MoveClass::Step && (df * dr).abs() == 2));
    }

    #[test]
    fn king_table_has_steps_and_two_castle_cells() {
        let cells: Vec<_> = KING_TABLE.offsets(Side::Black).collect();
        let steps = cells.iter().filter(|c| c.2 == MoveClass::Step).count();
        let castles: Vec<_> = cells.iter().filter(|c| c.2 == MoveClass::Castle).collect();
        assert_eq!(steps, 8);
        assert_eq!(castles.len(), 2);
        assert!(castles.iter().all(|c| c.0.abs() == 2 && c.1 == 0));
    }

    #[test]
    fn capability_follows_kind() {
        let queen = Piece::new(PieceKind::Queen, Side::White);
        assert!(queen.is_straight() && queen.is_diagonal());
        assert!(queen.move_table().is_none());

        let knight = Piece::new(PieceKind::Knight, Side::Black);
        assert!(!knight.is_straight() && !knight.is_diagonal());
        assert!(knight.move_table().is_some());
        assert_eq!(knight.to_string(), "bN");
    }
}
