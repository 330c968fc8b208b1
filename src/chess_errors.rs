//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by board mutation, notation
//! parsing, game orchestration, and search. Variants split into two groups:
//!
//! - Recoverable game-state conditions (`IllegalMove`, `GameOver`). The board
//!   is guaranteed untouched when these are returned, so callers can simply
//!   ask the user for another move.
//! - Caller contract violations (`MalformedNotation`, `EmptySourceSquare`,
//!   `InvalidPosition`, `InvalidRecord`). These indicate bad input from the
//!   surrounding shell rather than anything about the game itself.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::Coord;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A square or move string could not be parsed.
    ///
    /// Payload: the offending input.
    MalformedNotation(String),

    /// The requested source/destination/special combination is not legal in
    /// the current position.
    ///
    /// Payload: the move string as requested.
    IllegalMove(String),

    /// `move_and_special` was asked to move a piece off an empty square.
    EmptySourceSquare(Coord),

    /// The game already has an outcome and accepts no further moves.
    GameOver,

    /// A FEN string could not be turned into a board.
    InvalidPosition(String),

    /// A serialized game record could not be decoded.
    InvalidRecord(String),
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::MalformedNotation(input) => write!(f, "malformed notation: {input}"),
            ChessError::IllegalMove(mv) => write!(f, "illegal move: {mv}"),
            ChessError::EmptySourceSquare(coord) => {
                write!(f, "no piece on source square {coord}")
            }
            ChessError::GameOver => write!(f, "the game is already over"),
            ChessError::InvalidPosition(msg) => write!(f, "invalid position: {msg}"),
            ChessError::InvalidRecord(msg) => write!(f, "invalid game record: {msg}"),
        }
    }
}

impl Error for ChessError {}

#[cfg(test)]
mod tests {
    use super::ChessError;
    use crate::game_state::chess_types::Coord;

    #[test]
    fn display_includes_payload() {
        let err = ChessError::EmptySourceSquare(Coord::new(4, 3));
        assert_eq!(err.to_string(), "no piece on source square e4");

        let err = ChessError::IllegalMove("e2e5".to_owned());
        assert_eq!(err.to_string(), "illegal move: e2e5");
    }
}
