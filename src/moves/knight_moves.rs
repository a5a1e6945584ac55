use crate::game_state::board::Board;
use crate::game_state::chess_types::Piece;
use crate::moves::chess_move::ChessMove;
use crate::moves::move_targeting::{add_target, MoveType};

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub fn generate_knight_moves(piece: &Piece, board: &Board, moves: &mut Vec<ChessMove>) {
    let Some(origin) = piece.position else {
        return;
    };
    for (dx, dy) in KNIGHT_OFFSETS {
        add_target(piece, board, origin.offset(dx, dy), MoveType::Any, moves);
    }
}
