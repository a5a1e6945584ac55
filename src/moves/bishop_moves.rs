use crate::game_state::board::Board;
use crate::game_state::chess_types::Piece;
use crate::game_state::direction::Direction;
use crate::moves::chess_move::ChessMove;
use crate::moves::move_targeting::add_sliding_targets;

#[inline]
pub fn generate_bishop_moves(piece: &Piece, board: &Board, moves: &mut Vec<ChessMove>) {
    add_sliding_targets(piece, board, &Direction::DIAGONALS, moves);
}

#[cfg(test)]
mod tests {
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Position};

    #[test]
    fn centralized_bishop_moves() {
        let bishop = Piece::new(PieceKind::Bishop, Color::Black, Position::new(3, 3));
        let board = Board::new(8, 8, vec![bishop]);
        assert_eq!(bishop.pseudo_legal_moves(&board).len(), 13);
    }

    #[test]
    fn bishops_are_boxed_in_at_start() {
        let board = Board::standard();
        let bishop = *board.piece_at(Position::new(2, 0)).expect("c1 bishop");
        assert!(bishop.pseudo_legal_moves(&board).is_empty());
    }
}
