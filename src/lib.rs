//! Crate root module declarations for the rook_minimax chess engine.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines, and utility helpers) so binaries, tests, and external
//! tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod direction;
    pub mod game;
    pub mod player;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod castling;
    pub mod chess_move;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_targeting;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_manager;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod position_cache;
    pub mod threading;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_trait;
    pub mod minimax_engine;
}

pub mod utils {
    pub mod algebraic;
    pub mod logging;
    pub mod render_game_state;
}
