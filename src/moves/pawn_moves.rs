use crate::game_state::board::Board;
use crate::game_state::chess_rules::promotion_row;
use crate::game_state::chess_types::Piece;
use crate::moves::chess_move::ChessMove;
use crate::moves::move_targeting::{add_target, MoveType};

/// Pushes, the first-move double step, and diagonal captures. Any move that
/// lands on the last row promotes.
pub fn generate_pawn_moves(piece: &Piece, board: &Board, moves: &mut Vec<ChessMove>) {
    let Some(origin) = piece.position else {
        return;
    };
    let forward = piece.color.forward();
    let first = moves.len();

    let one_step = origin.offset(0, forward);
    if add_target(piece, board, one_step, MoveType::MoveOnly, moves) && !piece.has_moved() {
        add_target(
            piece,
            board,
            origin.offset(0, 2 * forward),
            MoveType::MoveOnly,
            moves,
        );
    }
    for dx in [-1, 1] {
        add_target(
            piece,
            board,
            origin.offset(dx, forward),
            MoveType::AttackOnly,
            moves,
        );
    }

    let last_row = promotion_row(piece.color, board.rows());
    for mv in &mut moves[first..] {
        if mv.to.y == last_row {
            *mv = mv.into_promotion();
        }
    }
}
