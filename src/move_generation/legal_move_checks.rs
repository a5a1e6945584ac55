use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind, Position};
use crate::game_state::direction::Direction;
use crate::moves::knight_moves::KNIGHT_OFFSETS;

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_square) = board.king_position(color) else {
        return false;
    };
    is_square_attacked(board, king_square, color.opposite())
}

/// Whether any piece of `attacker_color` has a pseudo-legal capture pattern
/// onto `square`. Scans outward from the target instead of generating the
/// attacker's moves.
pub fn is_square_attacked(board: &Board, square: Position, attacker_color: Color) -> bool {
    let attacker_at = |position: Position, kinds: &[PieceKind]| {
        board
            .piece_at(position)
            .is_some_and(|p| p.color == attacker_color && kinds.contains(&p.kind))
    };

    // A pawn attacks one row ahead of itself, so look one row "behind" the target.
    let pawn_row = -attacker_color.forward();
    if [-1, 1]
        .into_iter()
        .any(|dx| attacker_at(square.offset(dx, pawn_row), &[PieceKind::Pawn]))
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .into_iter()
        .any(|(dx, dy)| attacker_at(square.offset(dx, dy), &[PieceKind::Knight]))
    {
        return true;
    }

    if Direction::ALL.into_iter().any(|d| {
        let (dx, dy) = d.delta();
        attacker_at(square.offset(dx, dy), &[PieceKind::King])
    }) {
        return true;
    }

    slider_attacks(board, square, attacker_color, &Direction::ORTHOGONALS, PieceKind::Rook)
        || slider_attacks(board, square, attacker_color, &Direction::DIAGONALS, PieceKind::Bishop)
}

fn slider_attacks(
    board: &Board,
    square: Position,
    attacker_color: Color,
    directions: &[Direction],
    slider: PieceKind,
) -> bool {
    for direction in directions {
        let (dx, dy) = direction.delta();
        let mut cursor = square.offset(dx, dy);
        while board.is_valid_position(cursor) {
            if let Some(piece) = board.piece_at(cursor) {
                if piece.color == attacker_color
                    && (piece.kind == slider || piece.kind == PieceKind::Queen)
                {
                    return true;
                }
                break;
            }
            cursor = cursor.offset(dx, dy);
        }
    }
    false
}
