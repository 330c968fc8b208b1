//! Perft node counting over make/undo.
//!
//! Walks every legal line to a fixed depth and tallies leaf statistics. The
//! totals are compared against published reference counts to validate move
//! generation, and the walk doubles as a make/undo stress test.

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::{ChessMove, PieceKind, Side, SpecialMove};
use crate::move_generation::legal_move_generator::{all_legal_moves, has_any_legal_move};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaf nodes `depth` plies below the current position with `side` to
/// move. The board is restored before returning.
pub fn perft(board: &mut Board, side: Side, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in all_legal_moves(board, side) {
        if depth == 1 {
            total.merge(classify_leaf(board, side, mv)?);
            continue;
        }

        board.apply(mv)?;
        let child = perft(board, side.opposite(), depth - 1);
        board.undo();
        total.merge(child?);
    }

    Ok(total)
}

/// Per-root-move node counts, the usual tool for bisecting a mismatch.
pub fn perft_divide(board: &mut Board, side: Side, depth: u8) -> ChessResult<Vec<(ChessMove, usize)>> {
    let mut rows = Vec::new();
    for mv in all_legal_moves(board, side) {
        board.apply(mv)?;
        let child = perft(board, side.opposite(), depth.saturating_sub(1));
        board.undo();
        rows.push((mv, child?.nodes));
    }
    Ok(rows)
}

fn classify_leaf(board: &mut Board, side: Side, mv: ChessMove) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };

    let mover = board.piece_at(mv.from);
    if board.piece_at(mv.to).is_some() || mv.special == Some(SpecialMove::EnPassant) {
        counts.captures += 1;
    }
    match mv.special {
        Some(SpecialMove::EnPassant) => counts.en_passant += 1,
        Some(SpecialMove::Castle) => counts.castles += 1,
        _ => {}
    }
    if mover.is_some_and(|p| p.kind == PieceKind::Pawn) && mv.to.rank == promotion_rank(side) {
        counts.promotions += 1;
    }

    board.apply(mv)?;
    let defender = side.opposite();
    if board.is_in_check(defender) {
        counts.checks += 1;
        if !has_any_legal_move(board, defender) {
            counts.checkmates += 1;
        }
    }
    board.undo();

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_divide, PerftCounts};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::Side;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut board = Board::new();
        let counts = perft(&mut board, Side::White, 0).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_reference_counts() {
        let mut board = Board::new();
        let before = board.clone();

        assert_eq!(perft(&mut board, Side::White, 1).expect("perft").nodes, 20);
        assert_eq!(perft(&mut board, Side::White, 2).expect("perft").nodes, 400);

        let depth3 = perft(&mut board, Side::White, 3).expect("perft");
        assert_eq!(depth3.nodes, 8902);
        assert_eq!(depth3.captures, 34);
        assert_eq!(depth3.checks, 12);
        assert_eq!(depth3.checkmates, 0);

        assert_eq!(board, before);
    }

    #[test]
    fn kiwipete_reference_counts() {
        let (mut board, side) =
            parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .expect("fen");

        let depth1 = perft(&mut board, side, 1).expect("perft");
        assert_eq!(depth1.nodes, 48);
        assert_eq!(depth1.captures, 8);
        assert_eq!(depth1.castles, 2);

        let depth2 = perft(&mut board, side, 2).expect("perft");
        assert_eq!(depth2.nodes, 2039);
        assert_eq!(depth2.captures, 351);
        assert_eq!(depth2.en_passant, 1);
        assert_eq!(depth2.castles, 91);
        assert_eq!(depth2.checks, 3);
    }

    #[test]
    fn endgame_position_reference_counts() {
        let (mut board, side) =
            parse_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").expect("fen");

        assert_eq!(perft(&mut board, side, 1).expect("perft").nodes, 14);
        let depth2 = perft(&mut board, side, 2).expect("perft");
        assert_eq!(depth2.nodes, 191);
        assert_eq!(depth2.captures, 14);
        assert_eq!(depth2.checks, 10);

        let depth3 = perft(&mut board, side, 3).expect("perft");
        assert_eq!(depth3.nodes, 2812);
        assert_eq!(depth3.captures, 209);
        assert_eq!(depth3.en_passant, 2);
        assert_eq!(depth3.checks, 267);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = Board::new();
        let rows = perft_divide(&mut board, Side::White, 2).expect("divide");
        assert_eq!(rows.len(), 20);
        assert!(rows.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(rows.iter().map(|(_, n)| n).sum::<usize>(), 400);
    }
}
