//! Shared square-targeting primitive used by every piece generator.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Position};
use crate::game_state::direction::Direction;
use crate::moves::chess_move::ChessMove;

/// Which kinds of target a step may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    /// Empty squares only (pawn pushes).
    MoveOnly,
    /// Enemy-occupied squares only (pawn captures).
    AttackOnly,
    Any,
}

/// Tries to add a move of `piece` to `target`.
///
/// Off-board and friendly-occupied targets are rejected. Empty targets are
/// added unless `move_type` is `AttackOnly`; enemy targets are added as
/// captures unless it is `MoveOnly`. Returns whether `target` is an empty
/// on-board square, whether or not a move was added.
pub fn add_target(
    piece: &Piece,
    board: &Board,
    target: Position,
    move_type: MoveType,
    moves: &mut Vec<ChessMove>,
) -> bool {
    let Some(square) = board.square(target) else {
        return false;
    };
    match square.piece() {
        None => {
            if move_type != MoveType::AttackOnly {
                moves.push(ChessMove::new(*piece, target, None));
            }
            true
        }
        Some(occupant) => {
            if occupant.color != piece.color && move_type != MoveType::MoveOnly {
                moves.push(ChessMove::new(*piece, target, Some(*occupant)));
            }
            false
        }
    }
}

/// Walks each direction outward until the first occupied square, including
/// it only when it holds an enemy piece.
pub fn add_sliding_targets(
    piece: &Piece,
    board: &Board,
    directions: &[Direction],
    moves: &mut Vec<ChessMove>,
) {
    let Some(origin) = piece.position else {
        return;
    };
    for direction in directions {
        let (dx, dy) = direction.delta();
        let mut target = origin.offset(dx, dy);
        while add_target(piece, board, target, MoveType::Any, moves) {
            target = target.offset(dx, dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn targeting_policy_by_occupant() {
        let pieces = vec![
            Piece::new(PieceKind::Rook, Color::White, pos(0, 0)),
            Piece::new(PieceKind::Pawn, Color::White, pos(0, 1)),
            Piece::new(PieceKind::Knight, Color::Black, pos(1, 0)),
        ];
        let board = Board::new(8, 8, pieces);
        let rook = *board.piece_at(pos(0, 0)).expect("rook");
        let mut moves = Vec::new();

        assert!(!add_target(&rook, &board, pos(-1, 0), MoveType::Any, &mut moves));
        assert!(!add_target(&rook, &board, pos(0, 1), MoveType::Any, &mut moves));
        assert!(moves.is_empty());

        assert!(!add_target(&rook, &board, pos(1, 0), MoveType::MoveOnly, &mut moves));
        assert!(moves.is_empty());
        assert!(!add_target(&rook, &board, pos(1, 0), MoveType::AttackOnly, &mut moves));
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].captured.map(|p| p.kind), Some(PieceKind::Knight));

        assert!(add_target(&rook, &board, pos(2, 2), MoveType::AttackOnly, &mut moves));
        assert_eq!(moves.len(), 1);
        assert!(add_target(&rook, &board, pos(2, 2), MoveType::MoveOnly, &mut moves));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn sliding_stops_at_first_blocker() {
        let pieces = vec![
            Piece::new(PieceKind::Rook, Color::White, pos(3, 3)),
            Piece::new(PieceKind::Pawn, Color::White, pos(3, 5)),
            Piece::new(PieceKind::Pawn, Color::Black, pos(5, 3)),
        ];
        let board = Board::new(8, 8, pieces);
        let rook = *board.piece_at(pos(3, 3)).expect("rook");
        let mut moves = Vec::new();
        add_sliding_targets(&rook, &board, &Direction::ORTHOGONALS, &mut moves);

        let targets: Vec<Position> = moves.iter().map(|m| m.to).collect();
        assert!(targets.contains(&pos(3, 4)));
        assert!(!targets.contains(&pos(3, 5)));
        assert!(targets.contains(&pos(5, 3)));
        assert!(!targets.contains(&pos(6, 3)));
        // north 1, south 3, east 2, west 3
        assert_eq!(moves.len(), 9);
    }
}
