//! Conversions between board coordinates and move strings.
//!
//! Squares are two characters (`e4`). Moves are `<src><dst>[digit]`, where
//! the optional digit names the special-move tag (`2` double step, `3` pawn
//! capture, `4` castle, `5` en passant).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{ChessMove, Coord, SpecialMove};

/// Convert a square name (for example `"e4"`) to a coordinate.
#[inline]
pub fn notation_to_coord(square: &str) -> ChessResult<Coord> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::MalformedNotation(format!(
            "invalid square: {square}"
        )));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::MalformedNotation(format!(
            "invalid file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::MalformedNotation(format!(
            "invalid rank: {}",
            rank as char
        )));
    }

    Ok(Coord::new(file - b'a', rank - b'1'))
}

#[inline]
pub fn coord_to_notation(square: Coord) -> String {
    square.to_string()
}

/// Parse `<src><dst>[digit]`.
///
/// A missing digit leaves `special` as `None`; the caller decides whether
/// that means "plain move" or "use whatever tag the board assigns".
pub fn parse_move(notation: &str) -> ChessResult<ChessMove> {
    let notation = notation.trim();
    if !notation.is_ascii() || !(4..=5).contains(&notation.len()) {
        return Err(ChessError::MalformedNotation(format!(
            "expected <src><dst>[digit], got {notation:?}"
        )));
    }

    let from = notation_to_coord(&notation[0..2])?;
    let to = notation_to_coord(&notation[2..4])?;

    let special = match notation[4..].chars().next() {
        None => None,
        Some(digit) => Some(SpecialMove::from_digit(digit).ok_or_else(|| {
            ChessError::MalformedNotation(format!("unknown special-move digit: {digit}"))
        })?),
    };

    Ok(ChessMove::new(from, to, special))
}

/// Destination plus tag, the entry format of a legal-move map (`"e42"`).
pub fn destination_notation(mv: &ChessMove) -> String {
    let mut out = coord_to_notation(mv.to);
    if let Some(special) = mv.special {
        out.push(special.digit());
    }
    out
}
