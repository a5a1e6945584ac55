use crate::game_state::board::Board;
use crate::game_state::chess_types::Piece;
use crate::game_state::direction::Direction;
use crate::moves::chess_move::ChessMove;
use crate::moves::move_targeting::add_sliding_targets;

#[inline]
pub fn generate_queen_moves(piece: &Piece, board: &Board, moves: &mut Vec<ChessMove>) {
    add_sliding_targets(piece, board, &Direction::ALL, moves);
}
