use crate::game_state::board::Board;
use crate::game_state::chess_types::Piece;
use crate::game_state::direction::Direction;
use crate::moves::castling::generate_castle_moves;
use crate::moves::chess_move::ChessMove;
use crate::moves::move_targeting::{add_target, MoveType};

/// One-square steps plus castling candidates. Castles are only checked for
/// geometry here; safety of the king's path is a legality question.
pub fn generate_king_moves(piece: &Piece, board: &Board, moves: &mut Vec<ChessMove>) {
    let Some(origin) = piece.position else {
        return;
    };
    for direction in Direction::ALL {
        let (dx, dy) = direction.delta();
        add_target(piece, board, origin.offset(dx, dy), MoveType::Any, moves);
    }
    generate_castle_moves(piece, board, moves);
}
