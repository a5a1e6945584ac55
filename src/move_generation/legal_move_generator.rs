//! Legality filtering.
//!
//! Every candidate is tried on the live board: execute, test the mover's own
//! king, undo. Nothing here touches move history, so callers can probe freely.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::chess_move::{ChessMove, MoveKind};

/// Legal moves of every `color` piece, in board scan order.
pub fn legal_moves_for_color(board: &mut Board, color: Color) -> Vec<ChessMove> {
    let mut legal = Vec::new();
    for piece in board.pieces(color) {
        legal.extend(legal_moves_for_piece(board, &piece));
    }
    legal
}

pub fn legal_moves_for_piece(board: &mut Board, piece: &Piece) -> Vec<ChessMove> {
    let mut moves = piece.pseudo_legal_moves(board);
    moves.retain(|mv| is_move_legal(board, mv));
    moves
}

/// Whether any legal move exists for `color`; stops at the first one found.
pub fn has_legal_move(board: &mut Board, color: Color) -> bool {
    for piece in board.pieces(color) {
        for mv in piece.pseudo_legal_moves(board) {
            if is_move_legal(board, &mv) {
                return true;
            }
        }
    }
    false
}

/// Whether `mv` leaves its own king safe. Castles additionally require the
/// king not to start in check nor cross an attacked square.
pub fn is_move_legal(board: &mut Board, mv: &ChessMove) -> bool {
    let color = mv.piece.color;
    if matches!(mv.kind, MoveKind::Castle { .. }) && !castle_path_is_safe(board, mv) {
        return false;
    }
    mv.execute(board);
    let safe = !is_king_in_check(board, color);
    mv.undo(board);
    safe
}

/// Start square and every square strictly before the landing square. The
/// landing square itself is tested by the caller with the full castle
/// executed, so the rook is where it will really be.
fn castle_path_is_safe(board: &mut Board, castle: &ChessMove) -> bool {
    let color = castle.piece.color;
    if is_king_in_check(board, color) {
        return false;
    }
    let step = (castle.to.x - castle.from.x).signum();
    let mut square = castle.from.offset(step, 0);
    while square != castle.to {
        let probe = ChessMove::new(castle.piece, square, None);
        probe.execute(board);
        let attacked = is_king_in_check(board, color);
        probe.undo(board);
        if attacked {
            return false;
        }
        square = square.offset(step, 0);
    }
    true
}
