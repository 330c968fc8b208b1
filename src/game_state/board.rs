//! Mailbox board with an exact-undo history stack.
//!
//! `Board` is the central model for the engine: an 8x8 grid of optional
//! pieces plus one `UndoState` per applied move. Search and legality checks
//! mutate it in place and roll back with `undo`, so `move_and_special`
//! followed by `undo` must always restore the exact prior value.

use std::fmt;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::{home_rank, pawn_rank, BACK_RANK};
use crate::game_state::chess_types::{ChessMove, Coord, PieceKind, Side, SpecialMove, Termination};
use crate::game_state::piece::Piece;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::{attacked_squares, is_square_attacked, AttackMap};
use crate::move_generation::legal_move_generator::{
    all_legal_moves, generate_legal_moves, is_checkmate_or_draw,
};
use crate::utils::render_game_state::render_board;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // [rank][file]
    pub(crate) squares: [[Option<Piece>; 8]; 8],
    pub(crate) history: Vec<UndoState>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position with an empty history.
    pub fn new() -> Self {
        let mut board = Self::empty();

        for side in Side::ALL {
            let back = home_rank(side);
            let pawns = pawn_rank(side);
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let file = file as u8;
                board.set_piece(Coord::new(file, back), Some(Piece::new(*kind, side)));
                board.set_piece(
                    Coord::new(file, pawns),
                    Some(Piece::new(PieceKind::Pawn, side)),
                );
            }
        }

        board
    }

    /// Board with no pieces, used to build constructed positions.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Coord) -> Option<Piece> {
        self.squares[square.rank as usize][square.file as usize]
    }

    /// Place (or clear) a square directly, returning what was there.
    ///
    /// This bypasses history and is meant for position setup only.
    #[inline]
    pub fn set_piece(&mut self, square: Coord, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[square.rank as usize][square.file as usize],
            piece,
        )
    }

    #[inline]
    pub(crate) fn take_piece(&mut self, square: Coord) -> Option<Piece> {
        self.squares[square.rank as usize][square.file as usize].take()
    }

    #[inline]
    pub fn history(&self) -> &[UndoState] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<&UndoState> {
        self.history.last()
    }

    /// Every occupied square, rank by rank from `a1`.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Squares holding `side`'s pieces, collected so callers may mutate the
    /// board while walking them.
    pub fn piece_squares(&self, side: Side) -> Vec<Coord> {
        self.occupied()
            .filter(|(_, piece)| piece.side == side)
            .map(|(square, _)| square)
            .collect()
    }

    pub fn king_coord(&self, side: Side) -> Option<Coord> {
        self.occupied()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.side == side)
            .map(|(square, _)| square)
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        self.king_coord(side)
            .is_some_and(|king| self.is_square_attacked(king, side.opposite()))
    }

    pub fn is_square_attacked(&self, square: Coord, by: Side) -> bool {
        is_square_attacked(self, square, by)
    }

    pub fn attacked_squares(&self, by: Side) -> AttackMap {
        attacked_squares(self, by)
    }

    /// Legal moves for the piece on `square`; empty squares yield none.
    pub fn legal_moves(&mut self, square: Coord) -> Vec<ChessMove> {
        generate_legal_moves(self, square)
    }

    pub fn all_legal_moves(&mut self, side: Side) -> Vec<ChessMove> {
        all_legal_moves(self, side)
    }

    /// Execute a move with its special-move side effects and record it.
    pub fn move_and_special(
        &mut self,
        from: Coord,
        to: Coord,
        special: Option<SpecialMove>,
    ) -> ChessResult<()> {
        apply_move(self, from, to, special)
    }

    #[inline]
    pub fn apply(&mut self, mv: ChessMove) -> ChessResult<()> {
        apply_move(self, mv.from, mv.to, mv.special)
    }

    /// Revert the most recent move. `None` when the history is empty.
    pub fn undo(&mut self) -> Option<UndoState> {
        undo_move(self)
    }

    pub fn is_checkmate_or_draw(&mut self, side: Side) -> Option<Termination> {
        is_checkmate_or_draw(self, side)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}
