//! Turn-based game orchestration on top of `Board`.
//!
//! `Game` owns the board, tracks whose turn it is and freezes the outcome the
//! first time a terminal position (or an agreed draw) is reached. Moves come
//! in as `<src><dst>[digit]` strings; every rejected move leaves the game
//! untouched.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::chess_errors::{ChessError, ChessResult};
use crate::engines::engine_trait::Engine;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Outcome, Side, Termination};
use crate::utils::algebraic::{coord_to_notation, destination_notation, parse_move};
use crate::utils::fen_generator::exact_fen;
use crate::utils::fen_parser::parse_fen;

/// Source square to its legal destinations (`"e4"`, `"e42"`, ...).
pub type LegalMoveMap = BTreeMap<String, Vec<String>>;
/// Square to piece code (`"wP"`, `"bK"`, ...).
pub type PositionMap = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_side: Side,
    outcome: Option<Outcome>,
    moves_played: Vec<String>,
    start_fen: Option<String>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::new(), Side::White)
    }

    /// Start from an arbitrary position. A position that is already terminal
    /// for `side_to_move` gets its outcome immediately.
    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        let start_fen = exact_fen(&board, side_to_move);
        let mut game = Self {
            board,
            current_side: side_to_move,
            outcome: None,
            moves_played: Vec::new(),
            start_fen,
        };
        let mover = side_to_move.opposite();
        if let Some(termination) = game.board.is_checkmate_or_draw(side_to_move) {
            game.finish(termination, mover);
        }
        game
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let (board, side) = parse_fen(fen)?;
        Ok(Self::from_board(board, side))
    }

    /// Apply a move for the side to move.
    ///
    /// Returns the legal-move map for the new side to move, or `None` once
    /// the game has ended.
    pub fn next_move(&mut self, notation: &str) -> ChessResult<Option<LegalMoveMap>> {
        self.next_move_with_draw(notation, false)
    }

    /// As `next_move`, and when `mutual_draw` is set and the move did not
    /// already end the game, the game ends as a draw.
    pub fn next_move_with_draw(
        &mut self,
        notation: &str,
        mutual_draw: bool,
    ) -> ChessResult<Option<LegalMoveMap>> {
        if self.outcome.is_some() {
            return Err(ChessError::GameOver);
        }

        let requested = parse_move(notation)?;
        let illegal = || ChessError::IllegalMove(notation.to_owned());

        match self.board.piece_at(requested.from) {
            Some(piece) if piece.side == self.current_side => {}
            _ => return Err(illegal()),
        }

        let legal = self
            .board
            .legal_moves(requested.from)
            .into_iter()
            .find(|mv| mv.to == requested.to)
            .ok_or_else(illegal)?;
        if requested.special.is_some() && requested.special != legal.special {
            return Err(illegal());
        }

        self.board.apply(legal)?;
        self.moves_played.push(legal.to_string());

        let mover = self.current_side;
        self.current_side = mover.opposite();
        debug!("{mover} played {legal}");

        match self.board.is_checkmate_or_draw(self.current_side) {
            Some(termination) => {
                self.finish(termination, mover);
                Ok(None)
            }
            None if mutual_draw => {
                self.end_game(Outcome::Draw);
                Ok(None)
            }
            None => Ok(Some(self.legal_move_map())),
        }
    }

    /// Ask `engine` for a move and play it like any other move.
    pub fn play_engine_move(&mut self, engine: &mut dyn Engine) -> ChessResult<Option<LegalMoveMap>> {
        if self.outcome.is_some() {
            return Err(ChessError::GameOver);
        }
        if engine.side() != self.current_side {
            return Err(ChessError::IllegalMove(format!(
                "{} plays {} but {} is to move",
                engine.name(),
                engine.side(),
                self.current_side
            )));
        }

        let Some(mv) = engine.choose_move(&mut self.board)? else {
            return Err(ChessError::GameOver);
        };
        self.next_move(&mv.to_string())
    }

    /// Record an outcome decided outside the rules (agreement, resignation).
    /// Returns `false` when the game already had one.
    pub fn end_game(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        info!("game over: {}", describe(outcome));
        self.outcome = Some(outcome);
        true
    }

    fn finish(&mut self, termination: Termination, mover: Side) {
        let outcome = match termination {
            Termination::Checkmate => Outcome::Checkmate { winner: mover },
            Termination::Draw => Outcome::Draw,
        };
        self.end_game(outcome);
    }

    /// Legal destinations for every occupied square, either side.
    pub fn legal_move_map(&self) -> LegalMoveMap {
        let mut scratch = self.board.clone();
        let squares: Vec<_> = self.board.occupied().map(|(square, _)| square).collect();

        squares
            .into_iter()
            .map(|square| {
                let destinations = scratch
                    .legal_moves(square)
                    .iter()
                    .map(destination_notation)
                    .collect();
                (coord_to_notation(square), destinations)
            })
            .collect()
    }

    pub fn position_map(&self) -> PositionMap {
        self.board
            .occupied()
            .map(|(square, piece)| (coord_to_notation(square), piece.to_string()))
            .collect()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_side(&self) -> Side {
        self.current_side
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            Some(Outcome::Checkmate { winner }) => Some(winner),
            _ => None,
        }
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Checkmate { .. }))
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Some(Outcome::Draw)
    }

    /// Applied moves in order, each with the board's special-move digit.
    pub fn moves_played(&self) -> &[String] {
        &self.moves_played
    }

    /// FEN of the position the game started from, `None` when the starting
    /// board cannot be written as FEN without loss.
    pub fn start_fen(&self) -> Option<&str> {
        self.start_fen.as_deref()
    }
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Checkmate { winner } => format!("{winner} wins by checkmate"),
        Outcome::Draw => "draw".to_owned(),
    }
}
