//! Versioned text record of a game.
//!
//! Two layouts, both space separated, with an optional trailing result token
//! (`1-0`, `0-1` or `draw`):
//!
//! - `v1 <moves..> [result]` for games from the standard starting position;
//! - `v2 <placement> <side> <castling> <en-passant> <moves..> [result]` for
//!   games that started from a FEN position.
//!
//! Decoding replays every move from the recorded start, so the decoded game
//! carries the exact board, history, turn and outcome of the encoded one.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Outcome, Side};
use crate::game_state::game::Game;
use crate::utils::fen_generator::generate_fen;

pub const RECORD_VERSION: &str = "v1";
pub const FEN_RECORD_VERSION: &str = "v2";

/// Number of whitespace-separated FEN fields a `v2` header carries.
const FEN_FIELDS: usize = 4;

fn result_token(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Checkmate {
            winner: Side::White,
        } => "1-0",
        Outcome::Checkmate {
            winner: Side::Black,
        } => "0-1",
        Outcome::Draw => "draw",
    }
}

fn parse_result_token(token: &str) -> Option<Outcome> {
    match token {
        "1-0" => Some(Outcome::Checkmate {
            winner: Side::White,
        }),
        "0-1" => Some(Outcome::Checkmate {
            winner: Side::Black,
        }),
        "draw" => Some(Outcome::Draw),
        _ => None,
    }
}

/// Fails with `InvalidRecord` when the game started from a board FEN cannot
/// describe exactly (see `Game::start_fen`).
pub fn encode(game: &Game) -> ChessResult<String> {
    let start_fen = game.start_fen().ok_or_else(|| {
        ChessError::InvalidRecord("starting position cannot be written as FEN".to_owned())
    })?;

    let standard = generate_fen(&Board::new(), Side::White);
    let mut parts = if start_fen == standard {
        vec![RECORD_VERSION]
    } else {
        let mut header = vec![FEN_RECORD_VERSION];
        header.extend(start_fen.split_whitespace());
        header
    };

    parts.extend(game.moves_played().iter().map(String::as_str));
    if let Some(outcome) = game.outcome() {
        parts.push(result_token(outcome));
    }
    Ok(parts.join(" "))
}

pub fn decode(record: &str) -> ChessResult<Game> {
    let mut tokens = record.split_whitespace();
    let mut game = match tokens.next() {
        Some(RECORD_VERSION) => Game::new(),
        Some(FEN_RECORD_VERSION) => {
            let fields: Vec<&str> = tokens.by_ref().take(FEN_FIELDS).collect();
            if fields.len() != FEN_FIELDS {
                return Err(ChessError::InvalidRecord(
                    "truncated starting position".to_owned(),
                ));
            }
            Game::from_fen(&fields.join(" ")).map_err(|err| {
                ChessError::InvalidRecord(format!("bad starting position: {err}"))
            })?
        }
        Some(other) => {
            return Err(ChessError::InvalidRecord(format!(
                "unsupported record version {other:?}"
            )))
        }
        None => return Err(ChessError::InvalidRecord("empty record".to_owned())),
    };

    let mut tokens = tokens.peekable();
    while let Some(token) = tokens.next() {
        if let Some(recorded) = parse_result_token(token) {
            if tokens.peek().is_some() {
                return Err(ChessError::InvalidRecord(format!(
                    "moves after result token {token}"
                )));
            }
            game.end_game(recorded);
            if game.outcome() != Some(recorded) {
                return Err(ChessError::InvalidRecord(format!(
                    "result {token} contradicts the replayed position"
                )));
            }
            break;
        }

        game.next_move(token).map_err(|err| {
            ChessError::InvalidRecord(format!("move {token} could not be replayed: {err}"))
        })?;
    }

    Ok(game)
}
