//! Crate root module declarations for the alphabeta_chess engine.
//!
//! Exposes the board model and game orchestration, legal-move generation,
//! minimax search, engines, and notation helpers so the console binary,
//! integration tests and benches can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game;
    pub mod piece;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_sliding;
    pub mod legal_moves_table;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod game_record;
    pub mod render_game_state;
}
