//! Castle candidate generation.
//!
//! Geometry only: the king and the rook must be unmoved, the rook must sit on
//! the edge of the king's home row and everything in between must be empty.
//! Whether the king starts, passes, or lands in check is decided by the
//! legality filter.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::home_row;
use crate::game_state::chess_types::{Piece, PieceKind, Position};
use crate::moves::chess_move::ChessMove;

pub fn generate_castle_moves(king: &Piece, board: &Board, moves: &mut Vec<ChessMove>) {
    let Some(origin) = king.position else {
        return;
    };
    if king.kind != PieceKind::King
        || king.has_moved()
        || origin.y != home_row(king.color, board.rows())
    {
        return;
    }

    for (rook_x, step) in [(0, -1), (board.columns() - 1, 1)] {
        let king_to = origin.offset(2 * step, 0);
        // King lands strictly between its origin and the rook.
        if (king_to.x - rook_x) * step >= 0 {
            continue;
        }

        let rook_from = Position::new(rook_x, origin.y);
        let Some(rook) = board.piece_at(rook_from) else {
            continue;
        };
        if rook.kind != PieceKind::Rook || rook.color != king.color || rook.has_moved() {
            continue;
        }

        if squares_between_empty(board, origin, rook_from) {
            moves.push(ChessMove::castle(*king, king_to, *rook, origin.offset(step, 0)));
        }
    }
}

fn squares_between_empty(board: &Board, a: Position, b: Position) -> bool {
    let (lo, hi) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
    ((lo + 1)..hi).all(|x| board.piece_at(Position::new(x, a.y)).is_none())
}
