//! Pluggable board evaluation.
//!
//! Scores are from the engine's point of view. `player_side` is the side the
//! engine plays against, so a positive score favours
//! `player_side.opposite()`.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Side};

pub trait BoardScorer {
    fn score(&self, board: &Board, player_side: Side) -> i32;
}

/// Plain material count. The king carries a large weight so that a line
/// losing it outweighs any other material swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialScorer {
    pub king_value: i32,
}

impl Default for MaterialScorer {
    fn default() -> Self {
        Self {
            king_value: PieceKind::King.value(),
        }
    }
}

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::King => self.king_value,
            other => other.value(),
        }
    }

    pub fn material(&self, board: &Board, side: Side) -> i32 {
        board
            .occupied()
            .filter(|(_, piece)| piece.side == side)
            .map(|(_, piece)| self.piece_value(piece.kind))
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, player_side: Side) -> i32 {
        self.material(board, player_side.opposite()) - self.material(board, player_side)
    }
}

/// Default static evaluation used by `minimax`.
#[inline]
pub fn evaluate(board: &Board, player_side: Side) -> i32 {
    MaterialScorer::default().score(board, player_side)
}
