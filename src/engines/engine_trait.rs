//! Engine abstraction used by `Game::play_engine_move` and the console loop.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{ChessMove, Side};

pub trait Engine {
    fn name(&self) -> &str;

    /// Side this engine moves for.
    fn side(&self) -> Side;

    /// Pick a move for `self.side()` on `board`. `None` when that side has
    /// no legal move. The board must be returned unchanged.
    fn choose_move(&mut self, board: &mut Board) -> ChessResult<Option<ChessMove>>;
}
