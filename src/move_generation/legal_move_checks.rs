//! Attack sets and king-safety queries.
//!
//! A square counts as attacked by a side when one of its pieces could capture
//! an enemy standing there. Pawn pushes, double steps and castling never
//! attack; pawn diagonals always do, occupied or not.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Coord, PieceKind, Side};
use crate::game_state::piece::{MoveClass, KING_TABLE, KNIGHT_TABLE, PAWN_TABLE};
use crate::move_generation::legal_moves_sliding::{
    first_piece_along, slide_directions, DIAGONAL_DIRECTIONS, STRAIGHT_DIRECTIONS,
};

/// One bit per square, `rank * 8 + file`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackMap(u64);

impl AttackMap {
    #[inline]
    const fn bit(square: Coord) -> u64 {
        1u64 << (square.rank * 8 + square.file)
    }

    #[inline]
    pub fn insert(&mut self, square: Coord) {
        self.0 |= Self::bit(square);
    }

    #[inline]
    pub fn contains(&self, square: Coord) -> bool {
        self.0 & Self::bit(square) != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Union of every square `attacker` currently attacks.
pub fn attacked_squares(board: &Board, attacker: Side) -> AttackMap {
    let mut map = AttackMap::default();

    for (from, piece) in board.occupied().filter(|(_, p)| p.side == attacker) {
        for (d_file, d_rank) in slide_directions(&piece) {
            let mut cursor = from;
            while let Some(to) = cursor.offset(d_file, d_rank) {
                map.insert(to);
                if board.piece_at(to).is_some() {
                    break;
                }
                cursor = to;
            }
        }

        let Some(table) = piece.move_table() else {
            continue;
        };
        for (d_file, d_rank, class) in table.offsets(piece.side) {
            let attacks = match piece.kind {
                PieceKind::Pawn => class == MoveClass::PawnDiagonal,
                _ => class == MoveClass::Step,
            };
            if !attacks {
                continue;
            }
            if let Some(to) = from.offset(d_file, d_rank) {
                map.insert(to);
            }
        }
    }

    map
}

/// Whether any `attacker` piece could capture on `square`.
///
/// Scans outward from the target instead of building the full attack set,
/// which keeps check filtering cheap inside the search.
pub fn is_square_attacked(board: &Board, square: Coord, attacker: Side) -> bool {
    let holds = |at: Option<Coord>, kind: PieceKind| {
        at.and_then(|sq| board.piece_at(sq))
            .is_some_and(|p| p.side == attacker && p.kind == kind)
    };

    for (d_file, d_rank, class) in PAWN_TABLE.offsets(attacker) {
        if class == MoveClass::PawnDiagonal && holds(square.offset(-d_file, -d_rank), PieceKind::Pawn) {
            return true;
        }
    }

    for (table, kind) in [(&KNIGHT_TABLE, PieceKind::Knight), (&KING_TABLE, PieceKind::King)] {
        for (d_file, d_rank, class) in table.offsets(attacker) {
            if class == MoveClass::Step && holds(square.offset(-d_file, -d_rank), kind) {
                return true;
            }
        }
    }

    let ray_hits = |directions: &[(i8, i8)], straight: bool| {
        directions.iter().any(|&(d_file, d_rank)| {
            first_piece_along(board, square, d_file, d_rank).is_some_and(|(_, p)| {
                p.side == attacker && if straight { p.is_straight() } else { p.is_diagonal() }
            })
        })
    };

    ray_hits(&STRAIGHT_DIRECTIONS, true) || ray_hits(&DIAGONAL_DIRECTIONS, false)
}

#[cfg(test)]
mod tests {
    use super::{attacked_squares, is_square_attacked};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Coord, PieceKind, Side};
    use crate::game_state::piece::Piece;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn start_position_attack_sets() {
        let board = Board::new();
        let white = attacked_squares(&board, Side::White);
        // Rank 3 is fully covered by pawns; knights add nothing new there.
        for file in 0..8 {
            assert!(white.contains(Coord::new(file, 2)));
            assert!(!white.contains(Coord::new(file, 3)));
        }
        assert!(!is_square_attacked(&board, Coord::new(4, 3), Side::White));
        assert!(is_square_attacked(&board, Coord::new(5, 5), Side::Black));

        // Ranks 2 and 3 in full, plus b1 through g1.
        assert_eq!(white.len(), 22);
        assert_eq!(attacked_squares(&board, Side::Black).len(), 22);
        assert!(attacked_squares(&Board::empty(), Side::White).is_empty());
    }

    #[test]
    fn pawn_attacks_diagonally_not_forward() {
        let mut board = Board::empty();
        board.set_piece(Coord::new(3, 3), Some(Piece::new(PieceKind::Pawn, Side::Black)));
        assert!(is_square_attacked(&board, Coord::new(2, 2), Side::Black));
        assert!(is_square_attacked(&board, Coord::new(4, 2), Side::Black));
        assert!(!is_square_attacked(&board, Coord::new(3, 2), Side::Black));
        assert!(!is_square_attacked(&board, Coord::new(2, 4), Side::Black));
    }

    #[test]
    fn blocked_ray_does_not_attack() {
        let mut board = Board::empty();
        board.set_piece(Coord::new(0, 0), Some(Piece::new(PieceKind::Queen, Side::White)));
        board.set_piece(Coord::new(0, 2), Some(Piece::new(PieceKind::Knight, Side::Black)));
        assert!(is_square_attacked(&board, Coord::new(0, 2), Side::White));
        assert!(!is_square_attacked(&board, Coord::new(0, 5), Side::White));
        assert!(is_square_attacked(&board, Coord::new(5, 5), Side::White));
    }

    #[test]
    fn attack_map_agrees_with_square_scan() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ];

        for fen in fens {
            let (board, _) = parse_fen(fen).expect("test FEN should parse");
            for side in Side::ALL {
                let map = attacked_squares(&board, side);
                let scanned = Coord::all()
                    .filter(|&square| is_square_attacked(&board, square, side))
                    .count();
                assert_eq!(map.len(), scanned, "count mismatch for {side} in {fen}");
                for square in Coord::all() {
                    assert_eq!(
                        map.contains(square),
                        is_square_attacked(&board, square, side),
                        "mismatch on {square} for {side} in {fen}"
                    );
                }
            }
        }
    }
}
