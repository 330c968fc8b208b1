//! Core value types shared by the board, game, and search layers.
//!
//! Coordinates use `file` and `rank` in `0..=7`. Rank index 0 is White's home
//! row, so `Coord::new(0, 0)` is `a1` and `Coord::new(7, 7)` is `h8`.

use std::fmt;

/// Side to move. White is side 0 and starts on rank index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank direction this side's pawns advance in.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    #[inline]
    pub const fn code(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("white"),
            Side::Black => f.write_str("black"),
        }
    }
}

/// Piece kind (side and moved-state are carried by `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Material value used by static evaluation. The king carries a large
    /// sentinel so that losing it dominates any material balance.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 1000,
        }
    }

    #[inline]
    pub const fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Board coordinate, `file` and `rank` both in `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub file: u8,
    pub rank: u8,
}

impl Coord {
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Self { file, rank }
    }

    /// Build a coordinate from signed components, `None` when off the board.
    #[inline]
    pub fn try_new(file: i8, rank: i8) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        Self::try_new(self.file as i8 + d_file, self.rank as i8 + d_rank)
    }

    /// All 64 squares, rank by rank starting at `a1`.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Coord::new(file, rank)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file),
            char::from(b'1' + self.rank)
        )
    }
}

/// Tag attached to moves with side effects beyond relocating one piece.
///
/// The digit is what appears at the end of a move string. Promotion has no
/// tag because it always happens automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    DoubleStep,
    PawnCapture,
    Castle,
    EnPassant,
}

impl SpecialMove {
    #[inline]
    pub const fn digit(self) -> char {
        match self {
            SpecialMove::DoubleStep => '2',
            SpecialMove::PawnCapture => '3',
            SpecialMove::Castle => '4',
            SpecialMove::EnPassant => '5',
        }
    }

    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '2' => Some(SpecialMove::DoubleStep),
            '3' => Some(SpecialMove::PawnCapture),
            '4' => Some(SpecialMove::Castle),
            '5' => Some(SpecialMove::EnPassant),
            _ => None,
        }
    }
}

/// A fully described move: source, destination, and special-move tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Coord,
    pub to: Coord,
    pub special: Option<SpecialMove>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Coord, to: Coord, special: Option<SpecialMove>) -> Self {
        Self { from, to, special }
    }
}

/// Renders in the `<src><dst>[digit]` form consumed by `Game::next_move`.
impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(special) = self.special {
            write!(f, "{}", special.digit())?;
        }
        Ok(())
    }
}

/// Result of asking whether a side is out of legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Draw,
}

/// Frozen result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Side },
    Draw,
}

#[cfg(test)]
mod tests {
    use super::{ChessMove, Coord, Side, SpecialMove};

    #[test]
    fn coord_offset_respects_board_edges() {
        let a1 = Coord::new(0, 0);
        assert_eq!(a1.offset(1, 2), Some(Coord::new(1, 2)));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(Coord::new(7, 7).offset(0, 1), None);
    }

    #[test]
    fn coord_all_visits_every_square_once() {
        let squares: Vec<Coord> = Coord::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Coord::new(0, 0));
        assert_eq!(squares[63], Coord::new(7, 7));
    }

    #[test]
    fn move_display_appends_special_digit() {
        let mv = ChessMove::new(
            Coord::new(4, 1),
            Coord::new(4, 3),
            Some(SpecialMove::DoubleStep),
        );
        assert_eq!(mv.to_string(), "e2e42");

        let plain = ChessMove::new(Coord::new(6, 0), Coord::new(5, 2), None);
        assert_eq!(plain.to_string(), "g1f3");
    }

    #[test]
    fn side_helpers_are_consistent() {
        assert_eq!(Side::White.opposite(), Side::Black);
        assert_eq!(Side::from_code(Side::Black.code()), Some(Side::Black));
        assert_eq!(Side::White.forward(), 1);
        assert_eq!(Side::Black.forward(), -1);
    }
}
