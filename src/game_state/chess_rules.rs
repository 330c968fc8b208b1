//! Canonical chess-rule constants.
//!
//! Starting layout, home/promotion ranks, and the equivalent starting FEN used
//! by the FEN importer tests and benches.

use crate::game_state::chess_types::{PieceKind, Side};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank layout from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[inline]
pub const fn home_rank(side: Side) -> u8 {
    match side {
        Side::White => 0,
        Side::Black => 7,
    }
}

#[inline]
pub const fn pawn_rank(side: Side) -> u8 {
    match side {
        Side::White => 1,
        Side::Black => 6,
    }
}

/// Rank on which `side`'s pawns promote (the opponent's home rank).
#[inline]
pub const fn promotion_rank(side: Side) -> u8 {
    home_rank(side.opposite())
}

/// Files the king and rook land on after castling towards `rook_file`.
#[inline]
pub const fn castle_landing_files(rook_file: u8) -> (u8, u8) {
    if rook_file == 7 {
        (6, 5)
    } else {
        (2, 3)
    }
}
