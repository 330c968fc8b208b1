//! Depth-limited minimax with alpha-beta pruning.
//!
//! The engine plays `player_side.opposite()` and maximizes; the player side
//! minimizes. The tree is walked on a single `Board` with make/undo, so the
//! board is unchanged when a search returns.
//!
//! The root collects every move that reaches the best score. Root children
//! are searched with the window `(alpha - 1, beta)`: a child that is strictly
//! worse than the running best can then only report a value below alpha,
//! which keeps the tie set exact even though pruning is active.

use log::{debug, trace};

use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{ChessMove, Side};
use crate::search::board_scoring::{BoardScorer, MaterialScorer};

/// Window sentinel. Never returned as a score.
pub const INFINITY: i32 = i32::MAX;
/// Base score for a checkmate, offset by the remaining depth so faster mates
/// rank higher.
pub const MATE_SCORE: i32 = 1_000_000;
pub const DRAW_SCORE: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search. Zero returns the static score and no moves.
    pub depth: u8,
    /// The side the engine plays against.
    pub player_side: Side,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            player_side: Side::White,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Every root move reaching `best_score`, in generation order.
    pub best_moves: Vec<ChessMove>,
    pub best_score: i32,
    pub depth: u8,
    pub nodes: u64,
}

/// Best moves for `player_side.opposite()` under the default material score.
pub fn minimax(board: &mut Board, depth: u8, player_side: Side) -> ChessResult<Vec<ChessMove>> {
    let config = SearchConfig { depth, player_side };
    Ok(search(board, config, &MaterialScorer::default())?.best_moves)
}

pub fn search<S: BoardScorer>(
    board: &mut Board,
    config: SearchConfig,
    scorer: &S,
) -> ChessResult<SearchResult> {
    let mut ctx = SearchContext {
        scorer,
        player_side: config.player_side,
        nodes: 0,
    };

    if config.depth == 0 {
        return Ok(SearchResult {
            best_moves: Vec::new(),
            best_score: scorer.score(board, config.player_side),
            depth: 0,
            nodes: 1,
        });
    }

    let engine_side = config.player_side.opposite();
    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best_score = -INFINITY;
    let mut best_moves = Vec::new();

    for from in board.piece_squares(engine_side) {
        for mv in board.legal_moves(from) {
            board.apply(mv)?;
            let score = ctx.minimize(board, config.depth - 1, alpha.saturating_sub(1), beta);
            board.undo();
            let score = score?;

            trace!("root move {mv} scored {score}");

            if score > best_score {
                best_score = score;
                best_moves.clear();
                best_moves.push(mv);
            } else if score == best_score {
                best_moves.push(mv);
            }
            alpha = alpha.max(best_score);
        }
    }

    if best_moves.is_empty() {
        best_score = ctx.no_move_score(board, engine_side, config.depth);
    }

    debug!(
        "minimax depth {} searched {} nodes: score {}, {} tied move(s)",
        config.depth,
        ctx.nodes,
        best_score,
        best_moves.len()
    );

    Ok(SearchResult {
        best_moves,
        best_score,
        depth: config.depth,
        nodes: ctx.nodes,
    })
}

struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    player_side: Side,
    nodes: u64,
}

impl<S: BoardScorer> SearchContext<'_, S> {
    fn maximize(&mut self, board: &mut Board, depth: u8, mut alpha: i32, beta: i32) -> ChessResult<i32> {
        self.nodes += 1;
        if depth == 0 {
            return Ok(self.scorer.score(board, self.player_side));
        }

        let side = self.player_side.opposite();
        let mut best = -INFINITY;
        let mut any_move = false;

        'pieces: for from in board.piece_squares(side) {
            for mv in board.legal_moves(from) {
                any_move = true;
                board.apply(mv)?;
                let score = self.minimize(board, depth - 1, alpha, beta);
                board.undo();

                best = best.max(score?);
                alpha = alpha.max(best);
                if alpha >= beta {
                    break 'pieces;
                }
            }
        }

        if !any_move {
            return Ok(self.no_move_score(board, side, depth));
        }
        Ok(best)
    }

    fn minimize(&mut self, board: &mut Board, depth: u8, alpha: i32, mut beta: i32) -> ChessResult<i32> {
        self.nodes += 1;
        if depth == 0 {
            return Ok(self.scorer.score(board, self.player_side));
        }

        let side = self.player_side;
        let mut best = INFINITY;
        let mut any_move = false;

        'pieces: for from in board.piece_squares(side) {
            for mv in board.legal_moves(from) {
                any_move = true;
                board.apply(mv)?;
                let score = self.maximize(board, depth - 1, alpha, beta);
                board.undo();

                best = best.min(score?);
                beta = beta.min(best);
                if alpha >= beta {
                    break 'pieces;
                }
            }
        }

        if !any_move {
            return Ok(self.no_move_score(board, side, depth));
        }
        Ok(best)
    }

    /// Score for a node where `side` to move has no legal moves.
    fn no_move_score(&self, board: &Board, side: Side, depth: u8) -> i32 {
        if !board.is_in_check(side) {
            return DRAW_SCORE;
        }
        let mate = MATE_SCORE + i32::from(depth);
        if side == self.player_side {
            mate
        } else {
            -mate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{minimax, search, SearchConfig, DRAW_SCORE, MATE_SCORE};
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{ChessMove, Side};
    use crate::search::board_scoring::{evaluate, MaterialScorer};
    use crate::utils::algebraic::parse_move;
    use crate::utils::fen_parser::parse_fen;

    fn mv(notation: &str) -> ChessMove {
        parse_move(notation).expect("test move should parse")
    }

    /// Unpruned reference search with the same terminal scoring.
    fn brute_force(board: &mut Board, depth: u8, player_side: Side, maximizing: bool) -> i32 {
        if depth == 0 {
            return evaluate(board, player_side);
        }
        let side = if maximizing {
            player_side.opposite()
        } else {
            player_side
        };
        let moves = board.all_legal_moves(side);
        if moves.is_empty() {
            if !board.is_in_check(side) {
                return DRAW_SCORE;
            }
            let mate = MATE_SCORE + i32::from(depth);
            return if maximizing { -mate } else { mate };
        }

        let scores = moves.into_iter().map(|m| {
            board.apply(m).expect("legal move should apply");
            let score = brute_force(board, depth - 1, player_side, !maximizing);
            board.undo();
            score
        });
        if maximizing {
            scores.max().expect("non-empty")
        } else {
            scores.min().expect("non-empty")
        }
    }

    fn brute_force_root(board: &mut Board, depth: u8, player_side: Side) -> (i32, Vec<ChessMove>) {
        let mut scored = Vec::new();
        for m in board.all_legal_moves(player_side.opposite()) {
            board.apply(m).expect("legal move should apply");
            scored.push((m, brute_force(board, depth - 1, player_side, false)));
            board.undo();
        }
        let best = scored.iter().map(|(_, s)| *s).max().expect("root has moves");
        let ties = scored
            .into_iter()
            .filter(|(_, s)| *s == best)
            .map(|(m, _)| m)
            .collect();
        (best, ties)
    }

    #[test]
    fn picks_dominant_capture_at_depth_one() {
        let (mut board, _) = parse_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").expect("FEN");
        let best = minimax(&mut board, 1, Side::Black).expect("search should run");
        assert_eq!(best, vec![mv("d1d5")]);
    }

    #[test]
    fn returns_every_tied_move() {
        let (mut board, _) = parse_fen("4k3/8/8/n6n/8/8/8/R3K2R w - - 0 1").expect("FEN");
        let best = minimax(&mut board, 1, Side::Black).expect("search should run");
        assert_eq!(best.len(), 2);
        assert!(best.contains(&mv("a1a5")));
        assert!(best.contains(&mv("h1h5")));
    }

    #[test]
    fn finds_mate_in_one_for_black() {
        let (mut board, _) =
            parse_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2")
                .expect("FEN");
        let result = search(
            &mut board,
            SearchConfig {
                depth: 2,
                player_side: Side::White,
            },
            &MaterialScorer::default(),
        )
        .expect("search should run");

        assert_eq!(result.best_moves, vec![mv("d8h4")]);
        assert_eq!(result.best_score, MATE_SCORE + 1);
        assert!(result.nodes > 0);
    }

    #[test]
    fn pruned_search_matches_brute_force() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];

        for fen in fens {
            let (board, side) = parse_fen(fen).expect("FEN");
            let player_side = side.opposite();
            for depth in 1..=2 {
                let mut pruned_board = board.clone();
                let pruned = search(
                    &mut pruned_board,
                    SearchConfig { depth, player_side },
                    &MaterialScorer::default(),
                )
                .expect("search should run");

                let mut reference_board = board.clone();
                let (score, ties) = brute_force_root(&mut reference_board, depth, player_side);

                assert_eq!(pruned.best_score, score, "score mismatch in {fen} at depth {depth}");
                assert_eq!(pruned.best_moves.len(), ties.len(), "tie count in {fen}");
                assert!(ties.iter().all(|m| pruned.best_moves.contains(m)));
            }
        }
    }

    #[test]
    fn search_leaves_board_unchanged() {
        let mut board = Board::new();
        board.apply(mv("e2e42")).expect("e2e4");
        let before = board.clone();

        let best = minimax(&mut board, 3, Side::White).expect("search should run");
        assert!(!best.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn depth_zero_returns_static_score() {
        let mut board = Board::new();
        let config = SearchConfig {
            depth: 0,
            ..SearchConfig::default()
        };
        let result = search(&mut board, config, &MaterialScorer::default()).expect("search should run");
        assert!(result.best_moves.is_empty());
        assert_eq!(result.best_score, 0);
    }

    #[test]
    fn checkmated_root_reports_mate_score() {
        let (mut board, side) = parse_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN");
        let result = search(
            &mut board,
            SearchConfig {
                depth: 2,
                player_side: side.opposite(),
            },
            &MaterialScorer::default(),
        )
        .expect("search should run");
        assert!(result.best_moves.is_empty());
        assert_eq!(result.best_score, -(MATE_SCORE + 2));
    }
}
